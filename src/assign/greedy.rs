//! Greedy query-order assignment with candidate removal.
//!
//! Queries are visited in strip order. Each takes the cheapest candidate not
//! yet consumed, and that candidate is removed from the pool for the rest of
//! the run. Later queries never displace earlier picks; weak picks are left
//! for the template fallback to correct.

use std::collections::BTreeSet;

use crate::assign::{Candidate, MatchResult, Point, QueryShape};
use crate::shape::cost::{shape_cost, RotationMode};
use crate::shape::NormalizedShape;
use crate::trace::{trace_event, trace_span};
use crate::util::ShapeMatchResult;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Output of a full greedy pass.
#[derive(Clone, Debug)]
pub struct Assignment {
    /// One result per query, in query order.
    pub matches: Vec<MatchResult>,
    /// Indices of candidates consumed during the pass.
    pub used: BTreeSet<usize>,
}

/// Assignment state for one recognition run.
pub struct GreedyAssigner<'a> {
    candidates: &'a [Candidate],
    origin: Point,
    rotation: RotationMode,
    #[cfg_attr(not(feature = "rayon"), allow(dead_code))]
    parallel: bool,
    used: BTreeSet<usize>,
}

impl<'a> GreedyAssigner<'a> {
    /// Creates an assigner over `candidates`; centers are reported relative
    /// to `origin`, the search region's top-left in the full image.
    pub fn new(candidates: &'a [Candidate], origin: Point) -> Self {
        Self {
            candidates,
            origin,
            rotation: RotationMode::Enabled,
            parallel: false,
            used: BTreeSet::new(),
        }
    }

    /// Sets the rotation mode used for the cost.
    pub fn with_rotation(mut self, rotation: RotationMode) -> Self {
        self.rotation = rotation;
        self
    }

    /// Scores candidates in parallel when the `rayon` feature is enabled.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the candidate indices consumed so far.
    pub fn used(&self) -> &BTreeSet<usize> {
        &self.used
    }

    /// Returns the number of candidates still available.
    pub fn remaining(&self) -> usize {
        self.candidates.len() - self.used.len()
    }

    /// Assigns the next query and consumes its candidate, if any.
    pub fn assign_next(&mut self, query: &QueryShape) -> ShapeMatchResult<MatchResult> {
        let Some(shape) = query.normalized.as_ref() else {
            return Ok(MatchResult::absent());
        };
        let Some((idx, cost)) = self.best_candidate(shape)? else {
            return Ok(MatchResult::absent());
        };
        self.used.insert(idx);
        let center = self.candidates[idx].center.offset(self.origin);
        trace_event!("greedy_match", candidate = idx, cost = cost);
        Ok(MatchResult::blob(center, cost))
    }

    /// Runs every query in order and returns the results with the consumed set.
    pub fn assign_all(mut self, queries: &[QueryShape]) -> ShapeMatchResult<Assignment> {
        let _span = trace_span!(
            "greedy_assign",
            queries = queries.len(),
            candidates = self.candidates.len()
        )
        .entered();

        let mut matches = Vec::with_capacity(queries.len());
        for query in queries {
            matches.push(self.assign_next(query)?);
        }
        Ok(Assignment {
            matches,
            used: self.used,
        })
    }

    fn best_candidate(&self, shape: &NormalizedShape) -> ShapeMatchResult<Option<(usize, f32)>> {
        let scored = self.score_available(shape)?;
        let mut best: Option<(usize, f32)> = None;
        for (idx, cost) in scored {
            if best.map_or(true, |(_, best_cost)| cost < best_cost) {
                best = Some((idx, cost));
            }
        }
        Ok(best)
    }

    fn available(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.candidates.len()).filter(|idx| !self.used.contains(idx))
    }

    #[cfg(feature = "rayon")]
    fn score_available(&self, shape: &NormalizedShape) -> ShapeMatchResult<Vec<(usize, f32)>> {
        if !self.parallel {
            return self.score_available_seq(shape);
        }
        let indices: Vec<usize> = self.available().collect();
        indices
            .into_par_iter()
            .map(|idx| {
                shape_cost(shape, &self.candidates[idx].normalized, self.rotation)
                    .map(|cost| (idx, cost))
            })
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    fn score_available(&self, shape: &NormalizedShape) -> ShapeMatchResult<Vec<(usize, f32)>> {
        self.score_available_seq(shape)
    }

    fn score_available_seq(&self, shape: &NormalizedShape) -> ShapeMatchResult<Vec<(usize, f32)>> {
        self.available()
            .map(|idx| {
                shape_cost(shape, &self.candidates[idx].normalized, self.rotation)
                    .map(|cost| (idx, cost))
            })
            .collect()
    }
}
