//! Geometry helpers shared by resampling and conflict checks.

/// Computes sine and cosine for an angle in degrees.
pub(crate) fn sin_cos_deg(angle_deg: f32) -> (f32, f32) {
    angle_deg.to_radians().sin_cos()
}

/// Evenly spaced samples over `[start, end]`, both ends included.
///
/// A single step yields `[start]`; the last sample is exactly `end`.
pub(crate) fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (steps - 1) as f64;
            let mut values: Vec<f64> = (0..steps).map(|i| i as f64 * delta + start).collect();
            values[steps - 1] = end;
            values
        }
    }
}

/// Euclidean distance between two pixel positions.
pub(crate) fn distance(a: (usize, usize), b: (usize, usize)) -> f32 {
    let dx = a.0 as f32 - b.0 as f32;
    let dy = a.1 as f32 - b.1 as f32;
    (dx * dx + dy * dy).sqrt()
}
