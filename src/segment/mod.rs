//! Mask extraction feeding the matcher: thresholds, morphology, blobs.
//!
//! These helpers turn grayscale regions into the query masks and candidate
//! blobs that [`crate::Recognizer`] consumes.

pub mod components;
pub mod morphology;
pub mod threshold;

use crate::assign::{Candidate, Point};
use crate::mask::BinaryMask;
use crate::segment::components::{label_components, Component};
use crate::segment::morphology::{open, Kernel};
use crate::segment::threshold::threshold_otsu_inv;
use crate::shape::NormalizeConfig;
use crate::util::ShapeMatchResult;
use crate::ImageView;

/// Size and shape limits for blobs accepted as candidates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobFilter {
    /// Minimum pixel area.
    pub min_area: usize,
    /// Maximum pixel area.
    pub max_area: usize,
    /// Minimum bounding-box width and height.
    pub min_side: usize,
    /// Maximum ratio of the longer to the shorter box side.
    pub max_aspect: f32,
}

impl Default for BlobFilter {
    fn default() -> Self {
        Self {
            min_area: 50,
            max_area: 6000,
            min_side: 10,
            max_aspect: 3.0,
        }
    }
}

impl BlobFilter {
    /// Returns true if `component` passes every limit.
    pub fn accepts(&self, component: &Component) -> bool {
        let w = component.bbox.width;
        let h = component.bbox.height;
        if component.area < self.min_area || component.area > self.max_area {
            return false;
        }
        if w < self.min_side || h < self.min_side {
            return false;
        }
        let aspect = w.max(h) as f32 / w.min(h).max(1) as f32;
        aspect <= self.max_aspect
    }
}

/// Labels `mask` and returns a normalized candidate per accepted blob.
///
/// Centers are the truncated component centroids in `mask` coordinates.
pub fn extract_candidates(
    mask: &BinaryMask,
    filter: &BlobFilter,
    normalize: NormalizeConfig,
) -> ShapeMatchResult<Vec<Candidate>> {
    let map = label_components(mask);
    let mut candidates = Vec::new();
    for component in map.components().iter().filter(|c| filter.accepts(c)) {
        let blob = map.component_mask(component)?;
        let center = Point::new(component.centroid.0 as usize, component.centroid.1 as usize);
        candidates.push(Candidate::from_mask(center, component.bbox, &blob, normalize)?);
    }
    Ok(candidates)
}

/// Splits `width` into `parts` contiguous column ranges; the first
/// `width % parts` ranges are one column wider.
pub fn split_columns(width: usize, parts: usize) -> Vec<std::ops::Range<usize>> {
    if parts == 0 {
        return Vec::new();
    }
    let base = width / parts;
    let extra = width % parts;
    let mut start = 0;
    (0..parts)
        .map(|i| {
            let len = base + usize::from(i < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// Binarizes one instruction cell: inverted Otsu, a cleared border band,
/// then a small opening to drop specks.
pub fn query_mask_from_cell(
    cell: ImageView<'_, u8>,
    border: usize,
    open_kernel: usize,
) -> ShapeMatchResult<BinaryMask> {
    let mut mask = threshold_otsu_inv(cell)?;
    mask.clear_border(border);
    if open_kernel > 1 {
        mask = open(&mask, Kernel::square(open_kernel))?;
    }
    Ok(mask)
}
