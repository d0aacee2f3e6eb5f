//! Two-phase recognition: greedy blob assignment, then template fallback.
//!
//! Phase one assigns every query to a blob in strip order. Phase two visits
//! the queries again in the same order; any query that is absent or whose
//! cost is at least `weak_cost` is searched for in the dense region, and the
//! result goes through [`resolve_fallback`]. Later queries see the points
//! accepted for earlier ones.

use crate::assign::{Candidate, GreedyAssigner, MatchResult, Point, QueryShape};
use crate::resolve::{resolve_fallback, ConflictPolicy, Resolution};
use crate::search::{TemplateSearchConfig, TemplateSearcher};
use crate::shape::cost::RotationMode;
use crate::shape::NormalizeConfig;
use crate::trace::{trace_event, trace_span};
use crate::util::{ShapeMatchError, ShapeMatchResult};
use crate::ImageView;

/// Configuration for [`Recognizer`].
#[derive(Clone, Debug)]
pub struct RecognizeConfig {
    /// Normalization used for queries built by callers of this config.
    pub normalize: NormalizeConfig,
    /// Rotation search in the blob cost.
    pub rotation: RotationMode,
    /// Greedy costs at or above this trigger the template fallback.
    pub weak_cost: f32,
    /// Acceptance rules for fallback points.
    pub conflict: ConflictPolicy,
    /// Template search parameters.
    pub template: TemplateSearchConfig,
    /// Use rayon for candidate scoring and the template grid.
    pub parallel: bool,
}

impl Default for RecognizeConfig {
    fn default() -> Self {
        Self {
            normalize: NormalizeConfig::default(),
            rotation: RotationMode::Enabled,
            weak_cost: 280.0,
            conflict: ConflictPolicy::default(),
            template: TemplateSearchConfig::default(),
            parallel: false,
        }
    }
}

/// Ordered recognition output.
#[derive(Clone, Debug)]
pub struct Recognition {
    /// One result per query, in query order.
    pub matches: Vec<MatchResult>,
    /// Number of candidate blobs considered.
    pub candidates_count: usize,
}

impl Recognition {
    /// Click points in query order; `None` means no click for that position.
    pub fn points(&self) -> Vec<Option<Point>> {
        self.matches.iter().map(|m| m.point).collect()
    }
}

/// Runs the recognition phases for one request.
#[derive(Clone, Debug, Default)]
pub struct Recognizer {
    cfg: RecognizeConfig,
}

impl Recognizer {
    /// Creates a recognizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: RecognizeConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RecognizeConfig {
        &self.cfg
    }

    /// Builds a query shape with this recognizer's normalization.
    pub fn query(&self, raw: crate::mask::BinaryMask) -> ShapeMatchResult<QueryShape> {
        QueryShape::new(raw, self.cfg.normalize)
    }

    /// Matches `queries` against `candidates`.
    ///
    /// `search_region` is the dense mask for the fallback (skipped when
    /// `None`); `origin` is its top-left, and that of the candidate
    /// coordinates, in the full image.
    pub fn recognize(
        &self,
        queries: &[QueryShape],
        candidates: &[Candidate],
        search_region: Option<ImageView<'_, u8>>,
        origin: Point,
    ) -> ShapeMatchResult<Recognition> {
        if queries.is_empty() {
            return Err(ShapeMatchError::NoQueries);
        }
        if candidates.is_empty() {
            return Err(ShapeMatchError::NoCandidates);
        }
        let _span = trace_span!(
            "recognize",
            queries = queries.len(),
            candidates = candidates.len()
        )
        .entered();

        let assignment = GreedyAssigner::new(candidates, origin)
            .with_rotation(self.cfg.rotation)
            .with_parallel(self.cfg.parallel)
            .assign_all(queries)?;
        let mut matches = assignment.matches;

        if let Some(region) = search_region {
            self.apply_fallback(queries, &mut matches, region, origin)?;
        }

        Ok(Recognition {
            matches,
            candidates_count: candidates.len(),
        })
    }

    fn needs_fallback(&self, result: &MatchResult) -> bool {
        result.is_absent() || result.score >= self.cfg.weak_cost
    }

    fn apply_fallback(
        &self,
        queries: &[QueryShape],
        matches: &mut [MatchResult],
        region: ImageView<'_, u8>,
        origin: Point,
    ) -> ShapeMatchResult<()> {
        if !matches.iter().any(|m| self.needs_fallback(m)) {
            return Ok(());
        }
        let template_cfg = TemplateSearchConfig {
            parallel: self.cfg.parallel,
            ..self.cfg.template.clone()
        };
        let searcher = TemplateSearcher::new(region, template_cfg)?;

        for (idx, query) in queries.iter().enumerate() {
            if !self.needs_fallback(&matches[idx]) {
                continue;
            }
            trace_event!("fallback_triggered", query = idx, cost = matches[idx].score);
            let Some(hit) = searcher.locate(&query.raw)? else {
                continue;
            };
            let point = hit.center.offset(origin);
            let outcome = resolve_fallback(matches, idx, point, hit.score, &self.cfg.conflict);
            trace_event!(
                "fallback_resolved",
                query = idx,
                correlation = hit.score,
                accepted = outcome == Resolution::Accepted
            );
        }
        Ok(())
    }
}
