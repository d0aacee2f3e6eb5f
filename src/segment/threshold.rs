//! Global thresholding of grayscale views into binary masks.

use crate::mask::BinaryMask;
use crate::util::ShapeMatchResult;
use crate::ImageView;

/// Foreground where `value < level` (dark ink on a light background).
pub fn threshold_below(gray: ImageView<'_, u8>, level: u8) -> ShapeMatchResult<BinaryMask> {
    map_pixels(gray, |v| v < level)
}

/// Foreground where `low < value < high`.
pub fn threshold_between(gray: ImageView<'_, u8>, low: u8, high: u8) -> ShapeMatchResult<BinaryMask> {
    map_pixels(gray, |v| v > low && v < high)
}

/// Otsu's threshold: the level maximizing between-class variance, where
/// class one is `value <= level`.
pub fn otsu_level(gray: ImageView<'_, u8>) -> u8 {
    let mut hist = [0u64; 256];
    for row in gray.rows() {
        for &v in row {
            hist[v as usize] += 1;
        }
    }
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return 0;
    }
    let total_f = total as f64;
    let mu_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &h)| i as f64 * h as f64)
        .sum::<f64>()
        / total_f;

    let mut best_level = 0u8;
    let mut best_sigma = 0.0f64;
    let mut q1 = 0.0f64;
    let mut mu1_sum = 0.0f64;
    for (level, &h) in hist.iter().enumerate() {
        q1 += h as f64 / total_f;
        mu1_sum += level as f64 * h as f64 / total_f;
        let q2 = 1.0 - q1;
        if q1 < f64::EPSILON || q2 < f64::EPSILON {
            continue;
        }
        let mu1 = mu1_sum / q1;
        let mu2 = (mu_total - mu1_sum) / q2;
        let sigma = q1 * q2 * (mu1 - mu2) * (mu1 - mu2);
        if sigma > best_sigma {
            best_sigma = sigma;
            best_level = level as u8;
        }
    }
    best_level
}

/// Inverted Otsu binarization: foreground where `value <= otsu_level`.
pub fn threshold_otsu_inv(gray: ImageView<'_, u8>) -> ShapeMatchResult<BinaryMask> {
    let level = otsu_level(gray);
    map_pixels(gray, |v| v <= level)
}

fn map_pixels<F>(gray: ImageView<'_, u8>, f: F) -> ShapeMatchResult<BinaryMask>
where
    F: Fn(u8) -> bool,
{
    BinaryMask::from_fn(gray.width(), gray.height(), |x, y| {
        gray.get(x, y).is_some_and(|&v| f(v))
    })
}
