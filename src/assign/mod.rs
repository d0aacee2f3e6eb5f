//! Query/candidate model and one-to-one assignment.

use crate::mask::{BinaryMask, BoundingBox};
use crate::shape::{normalize_mask, NormalizeConfig, NormalizedShape};
use crate::util::ShapeMatchResult;

mod greedy;

pub use greedy::{Assignment, GreedyAssigner};

/// Integer pixel position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl Point {
    /// Creates a point.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the point translated by `origin`.
    pub fn offset(self, origin: Point) -> Self {
        Self {
            x: self.x + origin.x,
            y: self.y + origin.y,
        }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        crate::util::math::distance((self.x, self.y), (other.x, other.y))
    }
}

/// Blob detected in the search region.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// Blob center in search-region coordinates.
    pub center: Point,
    /// Blob bounding box in search-region coordinates.
    pub bbox: BoundingBox,
    /// Normalized blob shape.
    pub normalized: NormalizedShape,
}

impl Candidate {
    /// Normalizes `mask` and builds a candidate; fails on an empty mask.
    pub fn from_mask(
        center: Point,
        bbox: BoundingBox,
        mask: &BinaryMask,
        cfg: NormalizeConfig,
    ) -> ShapeMatchResult<Self> {
        Ok(Self {
            center,
            bbox,
            normalized: normalize_mask(mask, cfg)?,
        })
    }
}

/// One instruction-strip cell.
#[derive(Clone, Debug)]
pub struct QueryShape {
    /// Mask before normalization, kept for template search.
    pub raw: BinaryMask,
    /// Normalized shape, absent when `raw` has no foreground.
    pub normalized: Option<NormalizedShape>,
}

impl QueryShape {
    /// Builds a query, leaving `normalized` empty for an empty mask.
    pub fn new(raw: BinaryMask, cfg: NormalizeConfig) -> ShapeMatchResult<Self> {
        cfg.validate()?;
        let normalized = normalize_mask(&raw, cfg).ok();
        Ok(Self { raw, normalized })
    }
}

/// Which phase produced a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOrigin {
    /// Greedy blob assignment.
    Blob,
    /// Template search fallback.
    Template,
}

/// Result for one query, in query order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    /// Click point in full-image coordinates, `None` if nothing was found.
    pub point: Option<Point>,
    /// Greedy cost (pixel disagreement); `+inf` when no blob was assigned.
    pub score: f32,
    /// Phase that produced `point`.
    pub origin: MatchOrigin,
    /// Correlation of an accepted template-search location.
    pub correlation: Option<f32>,
}

impl MatchResult {
    /// Result with no point and infinite cost.
    pub fn absent() -> Self {
        Self {
            point: None,
            score: f32::INFINITY,
            origin: MatchOrigin::Blob,
            correlation: None,
        }
    }

    /// Greedy blob match at `point` with `cost`.
    pub fn blob(point: Point, cost: f32) -> Self {
        Self {
            point: Some(point),
            score: cost,
            origin: MatchOrigin::Blob,
            correlation: None,
        }
    }

    /// Returns true if no point was assigned.
    pub fn is_absent(&self) -> bool {
        self.point.is_none()
    }
}
