//! Scaled and rotated query templates for the correlation search.

use crate::mask::resample::rotate_nearest;
use crate::mask::BinaryMask;
use crate::util::{ShapeMatchError, ShapeMatchResult};

mod plan;

pub(crate) use plan::FOREGROUND_VALUE;
pub use plan::TemplatePlan;

/// Size limits a template must satisfy to be searched.
#[derive(Clone, Copy, Debug)]
pub struct TemplateLimits {
    /// Search region width; templates must be strictly narrower.
    pub region_width: usize,
    /// Search region height; templates must be strictly shorter.
    pub region_height: usize,
    /// Minimum number of foreground pixels.
    pub min_foreground: usize,
}

/// One scale/angle variant of a query template.
pub struct TemplateVariant {
    /// Index into the scale grid.
    pub scale_idx: usize,
    /// Index into the angle grid.
    pub angle_idx: usize,
    /// Cropped, rotated template mask.
    pub mask: BinaryMask,
    /// Correlation plan for `mask`.
    pub plan: TemplatePlan,
}

impl TemplateVariant {
    /// Rotates an already-scaled template, re-crops it to its foreground and
    /// checks it against `limits`.
    pub fn build(
        scaled: &BinaryMask,
        scale_idx: usize,
        angle_idx: usize,
        angle_deg: f32,
        limits: TemplateLimits,
    ) -> ShapeMatchResult<Self> {
        let rotated = rotate_nearest(scaled, angle_deg);
        let mask = rotated
            .crop_to_foreground()
            .ok_or(ShapeMatchError::DegenerateTemplate {
                reason: "no foreground",
            })?;
        if mask.width() >= limits.region_width || mask.height() >= limits.region_height {
            return Err(ShapeMatchError::DegenerateTemplate {
                reason: "not smaller than search region",
            });
        }
        if mask.count_foreground() < limits.min_foreground {
            return Err(ShapeMatchError::DegenerateTemplate {
                reason: "too few foreground pixels",
            });
        }
        let plan = TemplatePlan::from_mask(&mask)?;
        Ok(Self {
            scale_idx,
            angle_idx,
            mask,
            plan,
        })
    }
}
