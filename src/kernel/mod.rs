//! Correlation kernels over a prepared search image.

use crate::image::integral::IntegralTables;
use crate::util::ShapeMatchResult;
use crate::ImageView;

#[cfg(feature = "rayon")]
pub mod rayon;
pub mod scalar;

/// Search image bundled with its integral tables.
pub struct SearchImage<'a> {
    view: ImageView<'a, u8>,
    tables: IntegralTables,
}

impl<'a> SearchImage<'a> {
    /// Builds the integral tables for `view`.
    pub fn new(view: ImageView<'a, u8>) -> Self {
        let tables = IntegralTables::build(view);
        Self { view, tables }
    }

    /// Returns the underlying view.
    pub fn view(&self) -> ImageView<'a, u8> {
        self.view
    }

    /// Returns the integral tables.
    pub fn tables(&self) -> &IntegralTables {
        &self.tables
    }

    /// Returns the image width.
    pub fn width(&self) -> usize {
        self.view.width()
    }

    /// Returns the image height.
    pub fn height(&self) -> usize {
        self.view.height()
    }
}

/// Best placement found by a scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// Column of the template's top-left corner.
    pub x: usize,
    /// Row of the template's top-left corner.
    pub y: usize,
    /// Correlation score in `[-1, 1]`.
    pub score: f32,
}

/// Scan configuration for kernel evaluations.
#[derive(Clone, Copy, Debug)]
pub struct ScanParams {
    /// Windows with variance at or below this are not scored.
    pub min_var_i: f64,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self { min_var_i: 1.0 }
    }
}

/// Kernel trait for scoring and scanning one template plan.
pub trait Kernel {
    type Plan;

    /// Scores the placement with top-left `(x, y)`; `-inf` if not scorable.
    fn score_at(
        image: &SearchImage<'_>,
        plan: &Self::Plan,
        x: usize,
        y: usize,
        params: ScanParams,
    ) -> f32;

    /// Scans every valid placement and returns the best one.
    ///
    /// Ties keep the first placement in raster order.
    fn scan_best(
        image: &SearchImage<'_>,
        plan: &Self::Plan,
        params: ScanParams,
    ) -> ShapeMatchResult<Option<Peak>>;
}
