//! Multi-scale, multi-rotation template search fallback.
//!
//! When blob matching is unreliable the raw query mask is searched directly
//! in the dense region mask. The query is cropped to its foreground, scaled
//! over a [`ScaleGrid`], rotated over an [`AngleGrid`], re-cropped, and each
//! surviving template is correlated against every placement. The single best
//! correlation across the grid is reported if it clears `min_score`.
//!
//! The grid reduction orders results by score, then scale index, then angle
//! index, so the parallel grid yields exactly the sequential result.

pub mod grid;

pub use grid::{AngleGrid, ScaleGrid};

use crate::assign::Point;
use crate::kernel::scalar::ZnccBinaryScalar;
use crate::kernel::{Kernel, ScanParams, SearchImage};
use crate::mask::resample::scale_nearest;
use crate::mask::BinaryMask;
use crate::template::{TemplateLimits, TemplateVariant};
use crate::trace::{trace_event, trace_span};
use crate::util::{ShapeMatchError, ShapeMatchResult};
use crate::ImageView;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Template search parameters. Defaults are empirically tuned for puzzle
/// images of roughly 300x200 pixels and are not invariants.
#[derive(Clone, Debug)]
pub struct TemplateSearchConfig {
    /// Smallest scale factor applied to the cropped query.
    pub scale_min: f64,
    /// Largest scale factor applied to the cropped query.
    pub scale_max: f64,
    /// Number of evenly spaced scales.
    pub scale_steps: usize,
    /// First rotation angle in degrees.
    pub angle_min_deg: f32,
    /// Last rotation angle in degrees.
    pub angle_max_deg: f32,
    /// Rotation step in degrees.
    pub angle_step_deg: f32,
    /// Queries whose cropped width or height is below this are not searched.
    pub min_query_side: usize,
    /// Minimum side of a scaled template before rotation.
    pub min_template_side: usize,
    /// Minimum foreground pixels in a rotated template.
    pub min_foreground: usize,
    /// Minimum correlation for a location to be reported.
    pub min_score: f32,
    /// Window variance floor for correlation.
    pub min_var_i: f64,
    /// Evaluate the grid with rayon (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for TemplateSearchConfig {
    fn default() -> Self {
        Self {
            scale_min: 1.1,
            scale_max: 3.4,
            scale_steps: 16,
            angle_min_deg: -90.0,
            angle_max_deg: 90.0,
            angle_step_deg: 10.0,
            min_query_side: 10,
            min_template_side: 8,
            min_foreground: 40,
            min_score: 0.60,
            min_var_i: 1.0,
            parallel: false,
        }
    }
}

/// Accepted template-search location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemplateHit {
    /// Template center in search-region coordinates.
    pub center: Point,
    /// Template top-left in search-region coordinates.
    pub top_left: Point,
    /// Template size `(width, height)`.
    pub size: (usize, usize),
    /// Correlation score.
    pub score: f32,
    /// Scale factor of the winning template.
    pub scale: f64,
    /// Rotation of the winning template in degrees.
    pub angle_deg: f32,
}

#[derive(Clone, Copy, Debug)]
struct GridBest {
    scale_idx: usize,
    angle_idx: usize,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    score: f32,
}

impl GridBest {
    fn beats(&self, other: &GridBest) -> bool {
        self.score > other.score
            || (self.score == other.score
                && (self.scale_idx, self.angle_idx) < (other.scale_idx, other.angle_idx))
    }
}

/// Template search over one dense region, reusable across queries.
pub struct TemplateSearcher<'a> {
    image: SearchImage<'a>,
    cfg: TemplateSearchConfig,
    scales: ScaleGrid,
    angles: AngleGrid,
}

impl<'a> TemplateSearcher<'a> {
    /// Prepares `region` (integral tables) and validates the grids.
    pub fn new(region: ImageView<'a, u8>, cfg: TemplateSearchConfig) -> ShapeMatchResult<Self> {
        let scales = ScaleGrid::linspace(cfg.scale_min, cfg.scale_max, cfg.scale_steps)?;
        let angles = AngleGrid::new(cfg.angle_min_deg, cfg.angle_max_deg, cfg.angle_step_deg)?;
        Ok(Self {
            image: SearchImage::new(region),
            cfg,
            scales,
            angles,
        })
    }

    /// Returns the search configuration.
    pub fn config(&self) -> &TemplateSearchConfig {
        &self.cfg
    }

    /// Locates `query_raw` in the region.
    ///
    /// Returns `Ok(None)` for an empty or too small query, when no template
    /// survives the size checks, or when the best score is below `min_score`.
    pub fn locate(&self, query_raw: &BinaryMask) -> ShapeMatchResult<Option<TemplateHit>> {
        let Some(crop) = query_raw.crop_to_foreground() else {
            return Ok(None);
        };
        if crop.width().min(crop.height()) < self.cfg.min_query_side {
            return Ok(None);
        }

        let _span = trace_span!(
            "template_search",
            scales = self.scales.len(),
            angles = self.angles.len()
        )
        .entered();

        let mut bases = Vec::with_capacity(self.scales.len());
        for &scale in self.scales.as_slice() {
            bases.push(scale_nearest(&crop, scale, self.cfg.min_template_side)?);
        }

        let best = self.search_grid(&bases)?;
        let Some(best) = best else {
            trace_event!("template_none", scales = self.scales.len());
            return Ok(None);
        };
        trace_event!(
            "template_best",
            score = best.score,
            scale_idx = best.scale_idx,
            angle_idx = best.angle_idx
        );
        if best.score < self.cfg.min_score {
            return Ok(None);
        }

        Ok(Some(TemplateHit {
            center: Point::new(best.x + best.width / 2, best.y + best.height / 2),
            top_left: Point::new(best.x, best.y),
            size: (best.width, best.height),
            score: best.score,
            scale: self.scales.scale_at(best.scale_idx),
            angle_deg: self.angles.angle_at(best.angle_idx),
        }))
    }

    fn limits(&self) -> TemplateLimits {
        TemplateLimits {
            region_width: self.image.width(),
            region_height: self.image.height(),
            min_foreground: self.cfg.min_foreground,
        }
    }

    /// Correlates one grid cell; degenerate templates yield `Ok(None)`.
    fn evaluate(
        &self,
        base: &BinaryMask,
        scale_idx: usize,
        angle_idx: usize,
    ) -> ShapeMatchResult<Option<GridBest>> {
        let angle = self.angles.angle_at(angle_idx);
        let variant = match TemplateVariant::build(base, scale_idx, angle_idx, angle, self.limits()) {
            Ok(variant) => variant,
            Err(ShapeMatchError::DegenerateTemplate { .. }) => return Ok(None),
            Err(err) => return Err(err),
        };
        let params = ScanParams {
            min_var_i: self.cfg.min_var_i,
        };
        let peak = ZnccBinaryScalar::scan_best(&self.image, &variant.plan, params)?;
        Ok(peak.map(|peak| GridBest {
            scale_idx: variant.scale_idx,
            angle_idx: variant.angle_idx,
            x: peak.x,
            y: peak.y,
            width: variant.plan.width(),
            height: variant.plan.height(),
            score: peak.score,
        }))
    }

    fn cells(&self) -> Vec<(usize, usize)> {
        (0..self.scales.len())
            .flat_map(|s| (0..self.angles.len()).map(move |a| (s, a)))
            .collect()
    }

    fn reduce(results: Vec<Option<GridBest>>) -> Option<GridBest> {
        results
            .into_iter()
            .flatten()
            .fold(None, |best: Option<GridBest>, cell| match best {
                Some(b) if !cell.beats(&b) => Some(b),
                _ => Some(cell),
            })
    }

    fn search_grid_seq(&self, bases: &[BinaryMask]) -> ShapeMatchResult<Option<GridBest>> {
        let results = self
            .cells()
            .into_iter()
            .map(|(s, a)| self.evaluate(&bases[s], s, a))
            .collect::<ShapeMatchResult<Vec<_>>>()?;
        Ok(Self::reduce(results))
    }

    #[cfg(feature = "rayon")]
    fn search_grid(&self, bases: &[BinaryMask]) -> ShapeMatchResult<Option<GridBest>> {
        if !self.cfg.parallel {
            return self.search_grid_seq(bases);
        }
        let results = self
            .cells()
            .into_par_iter()
            .map(|(s, a)| self.evaluate(&bases[s], s, a))
            .collect::<ShapeMatchResult<Vec<_>>>()?;
        Ok(Self::reduce(results))
    }

    #[cfg(not(feature = "rayon"))]
    fn search_grid(&self, bases: &[BinaryMask]) -> ShapeMatchResult<Option<GridBest>> {
        self.search_grid_seq(bases)
    }
}

/// One-shot convenience wrapper around [`TemplateSearcher`].
pub fn locate_with_template(
    query_raw: &BinaryMask,
    region: ImageView<'_, u8>,
    cfg: TemplateSearchConfig,
) -> ShapeMatchResult<Option<TemplateHit>> {
    TemplateSearcher::new(region, cfg)?.locate(query_raw)
}
