//! Scalar ZNCC kernel for binary templates.

use crate::kernel::{Kernel, Peak, ScanParams, SearchImage};
use crate::template::TemplatePlan;
use crate::util::{ShapeMatchError, ShapeMatchResult};

/// Zero-mean normalized cross-correlation (`TM_CCOEFF_NORMED` equivalent).
pub struct ZnccBinaryScalar;

impl ZnccBinaryScalar {
    pub(crate) fn offsets(image: &SearchImage<'_>, plan: &TemplatePlan) -> Vec<usize> {
        let stride = image.view().stride();
        plan.foreground()
            .iter()
            .map(|&(ty, tx)| ty * stride + tx)
            .collect()
    }

    fn score_with_offsets(
        image: &SearchImage<'_>,
        plan: &TemplatePlan,
        offsets: &[usize],
        x: usize,
        y: usize,
        params: ScanParams,
    ) -> f32 {
        let n = plan.area() as f64;
        let (sum, sum_sq) = image.tables().window(x, y, plan.width(), plan.height());
        let sum = sum as f64;
        let var_i = sum_sq as f64 - sum * sum / n;
        if var_i <= params.min_var_i {
            return f32::NEG_INFINITY;
        }

        let data = image.view().as_slice();
        let base = y * image.view().stride() + x;
        let sum_fg: u64 = offsets.iter().map(|&off| u64::from(data[base + off])).sum();
        let dot = crate::template::FOREGROUND_VALUE * sum_fg as f64 - plan.mean() * sum;
        let score = dot / (plan.var_t() * var_i).sqrt();
        if score.is_finite() {
            score as f32
        } else {
            f32::NEG_INFINITY
        }
    }

    /// Scans rows `y0..=y1` and returns the best peak.
    pub(crate) fn scan_rows(
        image: &SearchImage<'_>,
        plan: &TemplatePlan,
        offsets: &[usize],
        y0: usize,
        y1: usize,
        params: ScanParams,
    ) -> Option<Peak> {
        let max_x = image.width() - plan.width();
        let mut best: Option<Peak> = None;
        for y in y0..=y1 {
            for x in 0..=max_x {
                let score = Self::score_with_offsets(image, plan, offsets, x, y, params);
                if score == f32::NEG_INFINITY {
                    continue;
                }
                if best.map_or(true, |b| score > b.score) {
                    best = Some(Peak { x, y, score });
                }
            }
        }
        best
    }
}

pub(crate) fn check_fits(image: &SearchImage<'_>, plan: &TemplatePlan) -> ShapeMatchResult<()> {
    if plan.width() > image.width() || plan.height() > image.height() {
        return Err(ShapeMatchError::RoiOutOfBounds {
            x: 0,
            y: 0,
            width: plan.width(),
            height: plan.height(),
            img_width: image.width(),
            img_height: image.height(),
        });
    }
    Ok(())
}

impl Kernel for ZnccBinaryScalar {
    type Plan = TemplatePlan;

    fn score_at(
        image: &SearchImage<'_>,
        plan: &Self::Plan,
        x: usize,
        y: usize,
        params: ScanParams,
    ) -> f32 {
        if plan.width() > image.width() || plan.height() > image.height() {
            return f32::NEG_INFINITY;
        }
        if x > image.width() - plan.width() || y > image.height() - plan.height() {
            return f32::NEG_INFINITY;
        }
        let offsets = Self::offsets(image, plan);
        Self::score_with_offsets(image, plan, &offsets, x, y, params)
    }

    fn scan_best(
        image: &SearchImage<'_>,
        plan: &Self::Plan,
        params: ScanParams,
    ) -> ShapeMatchResult<Option<Peak>> {
        check_fits(image, plan)?;
        let offsets = Self::offsets(image, plan);
        let max_y = image.height() - plan.height();
        Ok(Self::scan_rows(image, plan, &offsets, 0, max_y, params))
    }
}
