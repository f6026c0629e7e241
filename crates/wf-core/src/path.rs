use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryState;
use crate::geom::Point;
use crate::id::{LocationId, PathId};

/// The kind of a path. Nominal safety decreases left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    /// Maintained road between settlements.
    Road,
    /// Worn footpath.
    Trail,
    /// Unmarked terrain crossing.
    Wilderness,
    /// Concealed route known to few.
    Hidden,
}

impl PathKind {
    /// Travel minutes per unit of path length. Roads are the fastest any
    /// connection can be, which keeps the router heuristic admissible.
    pub fn minutes_per_unit(&self) -> f64 {
        match self {
            Self::Road => 1.0,
            Self::Trail => 1.3,
            Self::Hidden => 1.5,
            Self::Wilderness => 1.8,
        }
    }

    /// Danger multiplier applied to encounter rates and safety-biased
    /// routing. Wilderness is the most dangerous; hidden paths sit in the
    /// middle but above trails.
    pub fn danger(&self) -> f64 {
        match self {
            Self::Road => 0.8,
            Self::Trail => 1.0,
            Self::Hidden => 1.3,
            Self::Wilderness => 1.6,
        }
    }

    /// How far the curve midpoint may wander from the straight line, as a
    /// fraction of path length. Roads run nearly straight; hidden paths
    /// meander the most.
    pub fn curve_variance(&self) -> f64 {
        match self {
            Self::Road => 0.04,
            Self::Trail => 0.12,
            Self::Wilderness => 0.20,
            Self::Hidden => 0.30,
        }
    }

    /// All kinds, in declared order.
    pub fn all() -> [PathKind; 4] {
        [Self::Road, Self::Trail, Self::Wilderness, Self::Hidden]
    }
}

impl std::fmt::Display for PathKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Road => write!(f, "road"),
            Self::Trail => write!(f, "trail"),
            Self::Wilderness => write!(f, "wilderness"),
            Self::Hidden => write!(f, "hidden"),
        }
    }
}

/// An undirected path between two locations.
///
/// The control points exist for rendering and position interpolation only;
/// travel cost is carried separately so renderers can resample curves
/// freely. Every path yields exactly two mirrored [`Connection`]s when the
/// map rewrites connection lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    /// Unique identifier.
    pub id: PathId,
    /// Path kind, fixed at generation.
    pub kind: PathKind,
    /// One endpoint.
    pub a: LocationId,
    /// The other endpoint.
    pub b: LocationId,
    /// Curve control points from `a` to `b`, endpoints included.
    pub points: Vec<Point>,
    /// Travel time along the path, in game minutes.
    pub minutes: f64,
    /// Danger multiplier for this path.
    pub danger: f64,
    /// Reveal state of the path itself.
    pub discovery: DiscoveryState,
}

impl Path {
    /// The endpoint opposite `from`, if `from` is an endpoint at all.
    pub fn other_end(&self, from: LocationId) -> Option<LocationId> {
        if from == self.a {
            Some(self.b)
        } else if from == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Interpolate a position along the control polyline.
    ///
    /// `t` is the fraction of the path traversed from `a` toward `b`;
    /// pass `1.0 - t` to walk the other direction.
    pub fn position_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        if self.points.len() < 2 {
            return self.points.first().copied().unwrap_or_default();
        }
        let scaled = t * (self.points.len() - 1) as f64;
        let idx = (scaled.floor() as usize).min(self.points.len() - 2);
        let frac = scaled - idx as f64;
        self.points[idx].lerp(&self.points[idx + 1], frac)
    }
}

/// A directed view of a path, stored on the origin location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// The location this connection leads to.
    pub to: LocationId,
    /// The path this connection traverses.
    pub path: PathId,
    /// Travel time in game minutes.
    pub minutes: f64,
    /// Danger multiplier inherited from the path.
    pub danger: f64,
    /// Path kind inherited from the path.
    pub kind: PathKind,
}
