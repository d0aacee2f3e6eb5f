//! Nearest-neighbour resampling for binary masks.
//!
//! Nearest sampling keeps masks strictly two-valued, which the pixel-count
//! cost and the binary correlation plan both rely on.

use crate::mask::BinaryMask;
use crate::util::math::sin_cos_deg;
use crate::util::ShapeMatchResult;

/// Resizes a mask to `width x height` with nearest-neighbour sampling.
///
/// Destination pixel `x` samples source column `floor(x * src_w / width)`,
/// clamped to the last column; rows are handled the same way.
pub fn resize_nearest(src: &BinaryMask, width: usize, height: usize) -> ShapeMatchResult<BinaryMask> {
    let (src_w, src_h) = src.size();
    let scale_x = src_w as f64 / width.max(1) as f64;
    let scale_y = src_h as f64 / height.max(1) as f64;
    let src_cols: Vec<usize> = (0..width)
        .map(|x| ((x as f64 * scale_x).floor() as usize).min(src_w - 1))
        .collect();

    BinaryMask::from_fn(width, height, |x, y| {
        let sy = ((y as f64 * scale_y).floor() as usize).min(src_h - 1);
        src.get(src_cols[x], sy)
    })
}

/// Resizes by a uniform factor; each side is `max(min_side, round(side * scale))`
/// with halfway values rounded to even.
pub fn scale_nearest(src: &BinaryMask, scale: f64, min_side: usize) -> ShapeMatchResult<BinaryMask> {
    let side = |len: usize| ((len as f64 * scale).round_ties_even() as usize).max(min_side).max(1);
    resize_nearest(src, side(src.width()), side(src.height()))
}

/// Rotates a mask about `(w / 2, h / 2)` by `angle_deg`, keeping its size.
///
/// Positive angles turn counter-clockwise on screen (y axis pointing down).
/// Each destination pixel is inverse-mapped into the source and rounded to
/// the nearest pixel; samples that land outside the source are background,
/// so corners of the source may be clipped.
pub fn rotate_nearest(src: &BinaryMask, angle_deg: f32) -> BinaryMask {
    let (width, height) = src.size();
    if angle_deg == 0.0 {
        return src.clone();
    }
    let (sin_a, cos_a) = sin_cos_deg(angle_deg);
    let cx = width as f32 * 0.5;
    let cy = height as f32 * 0.5;
    let max_x = width as f32 - 1.0;
    let max_y = height as f32 - 1.0;

    let mut out = src.clone();
    for y in 0..height {
        let dy = y as f32 - cy;
        for x in 0..width {
            let dx = x as f32 - cx;
            let src_x = (cos_a * dx - sin_a * dy + cx).round();
            let src_y = (sin_a * dx + cos_a * dy + cy).round();
            let inside = src_x >= 0.0 && src_y >= 0.0 && src_x <= max_x && src_y <= max_y;
            let value = inside && src.get(src_x as usize, src_y as usize);
            out.set(x, y, value);
        }
    }
    out
}
