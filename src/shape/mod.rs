//! Canonical fixed-size shape representation.
//!
//! A shape is normalized by cropping its mask to the foreground, scaling it
//! uniformly (nearest-neighbour) so the longer side equals the symbol size,
//! and pasting it centered on a blank square canvas. The result no longer
//! depends on where the blob sat or how large it was.

use crate::mask::resample::resize_nearest;
use crate::mask::BinaryMask;
use crate::util::{ShapeMatchError, ShapeMatchResult};

pub mod cost;

/// Canvas and symbol sizes used by [`normalize_mask`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Side length of the square output canvas.
    pub canvas_size: usize,
    /// Length of the longer foreground side after scaling.
    pub symbol_size: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            canvas_size: 48,
            symbol_size: 34,
        }
    }
}

impl NormalizeConfig {
    /// Checks `0 < symbol_size <= canvas_size`.
    pub fn validate(&self) -> ShapeMatchResult<()> {
        if self.symbol_size == 0 {
            return Err(ShapeMatchError::InvalidConfig {
                reason: "symbol_size must be > 0",
            });
        }
        if self.symbol_size > self.canvas_size {
            return Err(ShapeMatchError::InvalidConfig {
                reason: "symbol_size must not exceed canvas_size",
            });
        }
        Ok(())
    }
}

/// Shape rescaled and centered on a fixed square canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedShape {
    canvas: BinaryMask,
}

impl NormalizedShape {
    /// Returns the canvas mask.
    pub fn mask(&self) -> &BinaryMask {
        &self.canvas
    }

    /// Returns the canvas side length.
    pub fn canvas_size(&self) -> usize {
        self.canvas.width()
    }
}

/// Normalizes `mask` onto a `canvas_size` square.
///
/// Returns [`ShapeMatchError::EmptyMask`] when the mask has no foreground.
pub fn normalize_mask(mask: &BinaryMask, cfg: NormalizeConfig) -> ShapeMatchResult<NormalizedShape> {
    cfg.validate()?;
    let crop = mask.crop_to_foreground().ok_or(ShapeMatchError::EmptyMask)?;
    let (w, h) = crop.size();

    let scale = cfg.symbol_size as f64 / w.max(h) as f64;
    let new_w = scaled_side(w, scale, cfg.canvas_size);
    let new_h = scaled_side(h, scale, cfg.canvas_size);
    let resized = resize_nearest(&crop, new_w, new_h)?;

    let mut canvas = BinaryMask::zeros(cfg.canvas_size, cfg.canvas_size)?;
    let ox = (cfg.canvas_size - new_w) / 2;
    let oy = (cfg.canvas_size - new_h) / 2;
    canvas.paste(&resized, ox, oy);
    Ok(NormalizedShape { canvas })
}

/// Halfway sides round to even, so 2 * 4.25 gives 8.
fn scaled_side(side: usize, scale: f64, canvas: usize) -> usize {
    ((side as f64 * scale).round_ties_even() as usize).clamp(1, canvas)
}
