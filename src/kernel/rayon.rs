//! Row-parallel ZNCC scan (feature-gated).
//!
//! Rows are scored independently and merged in row order, so the result is
//! identical to the scalar scan.

use crate::kernel::scalar::{check_fits, ZnccBinaryScalar};
use crate::kernel::{Peak, ScanParams, SearchImage};
use crate::template::TemplatePlan;
use crate::util::ShapeMatchResult;
use rayon::prelude::*;

/// Parallel counterpart of [`crate::kernel::Kernel::scan_best`] for
/// [`ZnccBinaryScalar`].
pub fn zncc_binary_scan_par(
    image: &SearchImage<'_>,
    plan: &TemplatePlan,
    params: ScanParams,
) -> ShapeMatchResult<Option<Peak>> {
    check_fits(image, plan)?;
    let offsets = ZnccBinaryScalar::offsets(image, plan);
    let max_y = image.height() - plan.height();

    let rows: Vec<Option<Peak>> = (0..=max_y)
        .into_par_iter()
        .map(|y| ZnccBinaryScalar::scan_rows(image, plan, &offsets, y, y, params))
        .collect();

    Ok(rows.into_iter().flatten().fold(None, |best: Option<Peak>, peak| {
        match best {
            Some(b) if b.score >= peak.score => Some(b),
            _ => Some(peak),
        }
    }))
}
