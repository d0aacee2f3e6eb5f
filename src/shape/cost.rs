//! Pixel-disagreement cost between two shapes under coarse rotations.
//!
//! The cost is the number of pixels where the two masks disagree (sum of
//! absolute differences divided by 255). With rotation enabled the *query*
//! is rotated through [`COST_ANGLES_DEG`] and compared against the unrotated
//! candidate, keeping the minimum. Only the first argument is rotated, so
//! `match_cost(a, b)` and `match_cost(b, a)` can differ.

use crate::mask::resample::rotate_nearest;
use crate::mask::BinaryMask;
use crate::shape::NormalizedShape;
use crate::util::{ShapeMatchError, ShapeMatchResult};

/// Rotations tried in addition to the unrotated comparison.
pub const COST_ANGLES_DEG: [f32; 12] = [
    -60.0, -45.0, -30.0, -20.0, -10.0, 10.0, 20.0, 30.0, 45.0, 60.0, 90.0, -90.0,
];

/// Whether the cost searches over query rotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// Compare the masks as given.
    Disabled,
    /// Also compare every rotation in [`COST_ANGLES_DEG`].
    #[default]
    Enabled,
}

/// Counts pixels where `a` and `b` disagree.
pub fn mask_difference(a: &BinaryMask, b: &BinaryMask) -> ShapeMatchResult<f32> {
    if a.size() != b.size() {
        return Err(ShapeMatchError::SizeMismatch {
            left: a.size(),
            right: b.size(),
        });
    }
    let diff: u64 = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(&pa, &pb)| u64::from(pa.abs_diff(pb)))
        .sum();
    Ok(diff as f32 / 255.0)
}

/// Minimum disagreement between `query` (optionally rotated) and `candidate`.
pub fn match_cost(
    query: &BinaryMask,
    candidate: &BinaryMask,
    rotation: RotationMode,
) -> ShapeMatchResult<f32> {
    let mut best = mask_difference(query, candidate)?;
    if rotation == RotationMode::Disabled || best == 0.0 {
        return Ok(best);
    }
    for angle in COST_ANGLES_DEG {
        let rotated = rotate_nearest(query, angle);
        best = best.min(mask_difference(&rotated, candidate)?);
    }
    Ok(best)
}

/// [`match_cost`] over two normalized shapes.
pub fn shape_cost(
    query: &NormalizedShape,
    candidate: &NormalizedShape,
    rotation: RotationMode,
) -> ShapeMatchResult<f32> {
    match_cost(query.mask(), candidate.mask(), rotation)
}
