//! Reconciles template-search locations with existing assignments.

use crate::assign::{MatchOrigin, MatchResult, Point};

/// Rules for accepting a fallback location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConflictPolicy {
    /// A fallback point closer than this (pixels) to another query's point is
    /// rejected.
    pub min_separation: f32,
    /// A greedy match with cost below this is kept over a fallback point.
    pub strong_cost: f32,
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        Self {
            min_separation: 26.0,
            strong_cost: 340.0,
        }
    }
}

/// Outcome of [`resolve_fallback`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The fallback point replaced the query's previous value.
    Accepted,
    /// The fallback point collided with query `other`.
    TooClose { other: usize },
    /// The existing greedy match was trusted enough to keep.
    KeptGreedy,
}

/// Applies a fallback `point` for query `idx` according to `policy`.
///
/// Only `matches[idx]` can change; list length and order are preserved.
/// The greedy cost in `score` is left untouched because correlation is a
/// different metric; it is recorded separately in `correlation`.
pub fn resolve_fallback(
    matches: &mut [MatchResult],
    idx: usize,
    point: Point,
    correlation: f32,
    policy: &ConflictPolicy,
) -> Resolution {
    let collision = matches.iter().enumerate().find(|&(other, existing)| {
        other != idx
            && existing
                .point
                .is_some_and(|p| p.distance(point) < policy.min_separation)
    });
    if let Some((other, _)) = collision {
        return Resolution::TooClose { other };
    }

    let current = &mut matches[idx];
    if current.point.is_some() && current.score < policy.strong_cost {
        return Resolution::KeptGreedy;
    }

    current.point = Some(point);
    current.origin = MatchOrigin::Template;
    current.correlation = Some(correlation);
    Resolution::Accepted
}
