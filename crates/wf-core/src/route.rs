use serde::{Deserialize, Serialize};

use crate::id::{LocationId, PathId};

/// One edge traversal within a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    /// The path being traversed.
    pub path: PathId,
    /// Where the segment starts.
    pub from: LocationId,
    /// Where the segment ends.
    pub to: LocationId,
    /// Segment duration in game minutes.
    pub minutes: f64,
    /// Danger multiplier while on this segment.
    pub danger: f64,
}

/// An ordered chain of segments from one location to another.
///
/// Produced by the router and immutable afterwards; the travel machine
/// only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// The starting location.
    pub from: LocationId,
    /// The destination location.
    pub to: LocationId,
    /// Segments in travel order; empty when `from == to`.
    pub segments: Vec<RouteSegment>,
    /// Sum of segment durations, in game minutes.
    pub total_minutes: f64,
    /// Time-weighted average danger across segments.
    pub danger: f64,
}

impl Route {
    /// The zero-cost route from a location to itself.
    pub fn empty(at: LocationId) -> Self {
        Self {
            from: at,
            to: at,
            segments: Vec::new(),
            total_minutes: 0.0,
            danger: 0.0,
        }
    }

    /// Assemble a route from ordered segments, computing the totals.
    pub fn from_segments(from: LocationId, to: LocationId, segments: Vec<RouteSegment>) -> Self {
        let total_minutes: f64 = segments.iter().map(|s| s.minutes).sum();
        let danger = if total_minutes > 0.0 {
            segments.iter().map(|s| s.danger * s.minutes).sum::<f64>() / total_minutes
        } else {
            0.0
        };
        Self {
            from,
            to,
            segments,
            total_minutes,
            danger,
        }
    }

    /// Whether the route has no segments to travel.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}
