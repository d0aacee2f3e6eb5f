//! Scale and angle grids for the template search.

use crate::util::math::linspace;
use crate::util::{ShapeMatchError, ShapeMatchResult};

/// Discrete angle grid in degrees over `[min_deg, max_deg]`, both ends included
/// when the range is a whole number of steps.
#[derive(Clone, Debug)]
pub struct AngleGrid {
    min_deg: f32,
    step_deg: f32,
    len: usize,
}

impl AngleGrid {
    /// Creates a grid stepping from `min_deg` up to `max_deg`.
    pub fn new(min_deg: f32, max_deg: f32, step_deg: f32) -> ShapeMatchResult<Self> {
        if !min_deg.is_finite() || !max_deg.is_finite() || !step_deg.is_finite() {
            return Err(ShapeMatchError::InvalidConfig {
                reason: "non-finite angle grid parameters",
            });
        }
        if step_deg <= 0.0 {
            return Err(ShapeMatchError::InvalidConfig {
                reason: "angle step must be > 0",
            });
        }
        if max_deg < min_deg {
            return Err(ShapeMatchError::InvalidConfig {
                reason: "max angle must not be below min angle",
            });
        }
        // Small tolerance so e.g. -90..=90 step 10 keeps its last sample.
        let len = ((max_deg - min_deg) / step_deg + 1e-4).floor() as usize + 1;
        Ok(Self {
            min_deg,
            step_deg,
            len,
        })
    }

    /// Returns the number of angles.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the grid has no angles.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the angle at `idx`.
    pub fn angle_at(&self, idx: usize) -> f32 {
        debug_assert!(idx < self.len);
        self.min_deg + idx as f32 * self.step_deg
    }

    /// Iterates over all angles.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.len).map(|idx| self.angle_at(idx))
    }
}

/// Evenly spaced scale factors over `[min, max]`.
#[derive(Clone, Debug)]
pub struct ScaleGrid {
    scales: Vec<f64>,
}

impl ScaleGrid {
    /// Creates `steps` scales from `min` to `max` inclusive.
    pub fn linspace(min: f64, max: f64, steps: usize) -> ShapeMatchResult<Self> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || max < min {
            return Err(ShapeMatchError::InvalidConfig {
                reason: "scale range must be positive and ordered",
            });
        }
        if steps == 0 {
            return Err(ShapeMatchError::InvalidConfig {
                reason: "scale steps must be > 0",
            });
        }
        Ok(Self {
            scales: linspace(min, max, steps),
        })
    }

    /// Returns the number of scales.
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    /// Returns true if the grid has no scales.
    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Returns the scale at `idx`.
    pub fn scale_at(&self, idx: usize) -> f64 {
        self.scales[idx]
    }

    /// Returns all scales in order.
    pub fn as_slice(&self) -> &[f64] {
        &self.scales
    }
}
