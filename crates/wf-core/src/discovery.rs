use serde::{Deserialize, Serialize};

/// How much of a location, zone, or path the player has revealed.
///
/// States only ever advance in the declared order;
/// [`DiscoveryState::advance`] silently refuses to regress.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryState {
    /// Never heard of.
    #[default]
    Unknown,
    /// Heard of, position and contents uncertain.
    Rumored,
    /// Known and routable.
    Discovered,
    /// Personally visited.
    Visited,
}

impl DiscoveryState {
    /// Advance to `to` if it is a later state. Returns whether anything
    /// changed; regression requests are ignored.
    pub fn advance(&mut self, to: DiscoveryState) -> bool {
        if to > *self {
            *self = to;
            true
        } else {
            false
        }
    }

    /// Whether this state is at least `floor`.
    pub fn at_least(&self, floor: DiscoveryState) -> bool {
        *self >= floor
    }
}

impl std::fmt::Display for DiscoveryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Rumored => write!(f, "rumored"),
            Self::Discovered => write!(f, "discovered"),
            Self::Visited => write!(f, "visited"),
        }
    }
}
