//! Puzzle-image layout: instruction strip, query cells and the main region.
//!
//! A scene image has a gray instruction strip near the top holding the query
//! symbols left to right, and a larger main region where the same symbols are
//! scattered as dark outlines. [`recognize_scene`] cuts both regions out by
//! fixed fractions of the image size, segments them, and runs the
//! [`Recognizer`] with the main region's offset so the returned points are in
//! full-image coordinates.

use crate::assign::{Point, QueryShape};
use crate::mask::BoundingBox;
use crate::recognize::{RecognizeConfig, Recognition, Recognizer};
use crate::segment::components::label_components;
use crate::segment::morphology::{close, open, Kernel};
use crate::segment::threshold::{threshold_below, threshold_between};
use crate::segment::{extract_candidates, query_mask_from_cell, split_columns, BlobFilter};
use crate::trace::{trace_event, trace_span};
use crate::util::{ShapeMatchError, ShapeMatchResult};
use crate::ImageView;

/// Rectangle expressed as fractions of the image size.
///
/// Pixel bounds are `floor(fraction * dimension)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionFractions {
    /// Top edge as a fraction of the height.
    pub top: f64,
    /// Bottom edge (exclusive) as a fraction of the height.
    pub bottom: f64,
    /// Left edge as a fraction of the width.
    pub left: f64,
    /// Right edge (exclusive) as a fraction of the width.
    pub right: f64,
}

impl RegionFractions {
    /// Resolves the fractions against a `width` x `height` image.
    pub fn to_box(&self, width: usize, height: usize) -> ShapeMatchResult<BoundingBox> {
        let valid = |lo: f64, hi: f64| (0.0..=1.0).contains(&lo) && (0.0..=1.0).contains(&hi) && lo < hi;
        if !valid(self.top, self.bottom) || !valid(self.left, self.right) {
            return Err(ShapeMatchError::InvalidConfig {
                reason: "region fractions must satisfy 0 <= start < end <= 1",
            });
        }
        let x0 = (self.left * width as f64) as usize;
        let x1 = (self.right * width as f64) as usize;
        let y0 = (self.top * height as f64) as usize;
        let y1 = (self.bottom * height as f64) as usize;
        if x1 <= x0 || y1 <= y0 {
            return Err(ShapeMatchError::InvalidDimensions {
                width: x1.saturating_sub(x0),
                height: y1.saturating_sub(y0),
            });
        }
        Ok(BoundingBox {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }

    fn view<'a>(&self, gray: ImageView<'a, u8>) -> ShapeMatchResult<(BoundingBox, ImageView<'a, u8>)> {
        let bbox = self.to_box(gray.width(), gray.height())?;
        let view = gray.roi(bbox.x, bbox.y, bbox.width, bbox.height)?;
        Ok((bbox, view))
    }
}

/// Segmentation and layout settings for a scene image.
///
/// The defaults fit puzzle images of roughly 300x200 pixels.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Area searched for the instruction strip.
    pub top_region: RegionFractions,
    /// Area holding the candidate symbols.
    pub main_region: RegionFractions,
    /// Strip pixels are strictly between these gray levels.
    pub strip_gray_low: u8,
    /// Upper gray level for strip pixels (exclusive).
    pub strip_gray_high: u8,
    /// Closing kernel size applied to the strip mask.
    pub strip_close: usize,
    /// Accepted strip width range (inclusive).
    pub strip_width: (usize, usize),
    /// Accepted strip height range (inclusive).
    pub strip_height: (usize, usize),
    /// The strip's top edge must lie within this fraction of the top region.
    pub strip_max_top: f64,
    /// Number of query cells in the strip.
    pub query_cells: usize,
    /// Border band cleared in every query cell.
    pub cell_border: usize,
    /// Opening kernel size for query cells.
    pub cell_open: usize,
    /// Symbol pixels in the main region are darker than this.
    pub symbol_threshold: u8,
    /// Opening kernel size for the symbol mask.
    pub symbol_open: usize,
    /// Dense pixels (template search target) are darker than this.
    pub dense_threshold: u8,
    /// Limits for candidate blobs.
    pub blobs: BlobFilter,
    /// Recognition settings.
    pub recognize: RecognizeConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            top_region: RegionFractions {
                top: 0.06,
                bottom: 0.25,
                left: 0.18,
                right: 0.82,
            },
            main_region: RegionFractions {
                top: 0.20,
                bottom: 0.88,
                left: 0.0,
                right: 0.96,
            },
            strip_gray_low: 110,
            strip_gray_high: 220,
            strip_close: 5,
            strip_width: (80, 220),
            strip_height: (18, 40),
            strip_max_top: 0.7,
            query_cells: 3,
            cell_border: 2,
            cell_open: 2,
            symbol_threshold: 60,
            symbol_open: 2,
            dense_threshold: 80,
            blobs: BlobFilter::default(),
            recognize: RecognizeConfig::default(),
        }
    }
}

/// Recognition result plus the layout it was computed from.
#[derive(Clone, Debug)]
pub struct SceneRecognition {
    /// Ordered points and scores.
    pub recognition: Recognition,
    /// Instruction strip in full-image coordinates.
    pub strip: BoundingBox,
    /// Main region in full-image coordinates.
    pub main_region: BoundingBox,
}

/// Finds the instruction strip inside `top`, in `top` coordinates.
///
/// The strip is the largest gray component whose box fits the size limits
/// and whose top edge is close enough to the top of the region.
pub fn locate_strip(top: ImageView<'_, u8>, cfg: &SceneConfig) -> ShapeMatchResult<BoundingBox> {
    let mut mask = threshold_between(top, cfg.strip_gray_low, cfg.strip_gray_high)?;
    if cfg.strip_close > 1 {
        mask = close(&mask, Kernel::square(cfg.strip_close))?;
    }
    let max_top = (cfg.strip_max_top * top.height() as f64) as usize;
    let (min_w, max_w) = cfg.strip_width;
    let (min_h, max_h) = cfg.strip_height;

    let map = label_components(&mask);
    let mut best: Option<(usize, BoundingBox)> = None;
    for c in map.components() {
        let b = c.bbox;
        if !(min_w..=max_w).contains(&b.width) || !(min_h..=max_h).contains(&b.height) {
            continue;
        }
        if b.y > max_top {
            continue;
        }
        if best.map_or(true, |(area, _)| c.area > area) {
            best = Some((c.area, b));
        }
    }
    best.map(|(_, b)| b).ok_or(ShapeMatchError::StripNotFound)
}

/// Splits the strip into cells and builds one query per cell.
pub fn extract_queries(
    strip: ImageView<'_, u8>,
    cfg: &SceneConfig,
) -> ShapeMatchResult<Vec<QueryShape>> {
    split_columns(strip.width(), cfg.query_cells)
        .into_iter()
        .filter(|cols| !cols.is_empty())
        .map(|cols| {
            let cell = strip.roi(cols.start, 0, cols.len(), strip.height())?;
            let raw = query_mask_from_cell(cell, cfg.cell_border, cfg.cell_open)?;
            QueryShape::new(raw, cfg.recognize.normalize)
        })
        .collect()
}

/// Runs the full pipeline on a grayscale scene image.
///
/// Fails with [`ShapeMatchError::StripNotFound`] when no strip is found and
/// with [`ShapeMatchError::NoCandidates`] when the main region has no
/// acceptable blobs.
pub fn recognize_scene(gray: ImageView<'_, u8>, cfg: &SceneConfig) -> ShapeMatchResult<SceneRecognition> {
    let _span = trace_span!("scene", width = gray.width(), height = gray.height()).entered();

    let (top_box, top) = cfg.top_region.view(gray)?;
    let strip_local = locate_strip(top, cfg)?;
    let strip_view = top.roi(strip_local.x, strip_local.y, strip_local.width, strip_local.height)?;
    let strip = strip_local.offset(top_box.x, top_box.y);
    trace_event!("strip_found", x = strip.x, y = strip.y, width = strip.width);

    let queries = extract_queries(strip_view, cfg)?;

    let (main_box, main) = cfg.main_region.view(gray)?;
    let mut symbols = threshold_below(main, cfg.symbol_threshold)?;
    if cfg.symbol_open > 1 {
        symbols = open(&symbols, Kernel::square(cfg.symbol_open))?;
    }
    let dense = threshold_below(main, cfg.dense_threshold)?;
    let candidates = extract_candidates(&symbols, &cfg.blobs, cfg.recognize.normalize)?;
    trace_event!("candidates_extracted", count = candidates.len());

    let recognizer = Recognizer::new().with_config(cfg.recognize.clone());
    let origin = Point::new(main_box.x, main_box.y);
    let recognition = recognizer.recognize(&queries, &candidates, Some(dense.view()), origin)?;

    Ok(SceneRecognition {
        recognition,
        strip,
        main_region: main_box,
    })
}
