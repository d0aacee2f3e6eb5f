//! Precomputed statistics for correlating a binary template.

use crate::mask::BinaryMask;
use crate::util::{ShapeMatchError, ShapeMatchResult};

/// Binary template prepared for zero-mean normalized cross-correlation.
///
/// For a template with `k` foreground pixels of value `v` out of `n`, the
/// zero-mean dot product against a window reduces to
/// `v * sum_fg(I) - mean * sum(I)`, so only foreground offsets are stored and
/// the window sum comes from an integral table.
pub struct TemplatePlan {
    width: usize,
    height: usize,
    foreground: Vec<(usize, usize)>,
    mean: f64,
    var_t: f64,
}

impl TemplatePlan {
    /// Builds a plan from a binary mask.
    ///
    /// Fails when the mask is empty or entirely foreground, since a uniform
    /// template has no variance to correlate.
    pub fn from_mask(mask: &BinaryMask) -> ShapeMatchResult<Self> {
        let (width, height) = mask.size();
        let mut foreground = Vec::new();
        for (y, row) in mask.view().rows().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value != 0 {
                    foreground.push((y, x));
                }
            }
        }

        let n = (width * height) as f64;
        let k = foreground.len() as f64;
        if foreground.is_empty() {
            return Err(ShapeMatchError::DegenerateTemplate {
                reason: "no foreground",
            });
        }
        if foreground.len() == width * height {
            return Err(ShapeMatchError::DegenerateTemplate {
                reason: "zero variance",
            });
        }

        let v = FOREGROUND_VALUE;
        Ok(Self {
            width,
            height,
            foreground,
            mean: v * k / n,
            var_t: v * v * k * (n - k) / n,
        })
    }

    /// Returns the template width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of pixels in the template window.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Returns `(row, column)` offsets of foreground pixels.
    pub fn foreground(&self) -> &[(usize, usize)] {
        &self.foreground
    }

    /// Returns the mean template intensity.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the sum of squared zero-mean template values.
    pub fn var_t(&self) -> f64 {
        self.var_t
    }
}

pub(crate) const FOREGROUND_VALUE: f64 = 255.0;

#[cfg(test)]
mod tests {
    use super::TemplatePlan;
    use crate::mask::BinaryMask;
    use crate::util::ShapeMatchError;

    #[test]
    fn statistics_match_definition() {
        let mask = BinaryMask::from_fn(4, 2, |x, _| x < 1).unwrap();
        let plan = TemplatePlan::from_mask(&mask).unwrap();
        assert_eq!(plan.foreground().len(), 2);
        let mean = 255.0 * 2.0 / 8.0;
        let var_t = 2.0 * (255.0f64 - mean).powi(2) + 6.0 * mean * mean;
        assert!((plan.mean() - mean).abs() < 1e-9);
        assert!((plan.var_t() - var_t).abs() < 1e-6);
    }

    #[test]
    fn uniform_templates_are_degenerate() {
        let full = BinaryMask::from_fn(3, 3, |_, _| true).unwrap();
        assert_eq!(
            TemplatePlan::from_mask(&full).err(),
            Some(ShapeMatchError::DegenerateTemplate {
                reason: "zero variance"
            })
        );
        let empty = BinaryMask::zeros(3, 3).unwrap();
        assert!(TemplatePlan::from_mask(&empty).is_err());
    }
}
