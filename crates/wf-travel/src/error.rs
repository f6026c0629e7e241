use wf_core::LocationId;

/// Convenience alias for travel results.
pub type TravelResult<T> = Result<T, TravelError>;

/// Errors from routing and simulation.
///
/// `NoRoute` is an expected outcome, not an exceptional one: callers are
/// meant to branch on it. State-machine misuse (resuming with nothing
/// pending, ticking while idle) is deliberately not an error at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TravelError {
    /// The referenced location is not in the map.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),

    /// No traversable path exists under the given options.
    #[error("no route from {from} to {to}")]
    NoRoute {
        /// Requested start.
        from: LocationId,
        /// Requested destination.
        to: LocationId,
    },
}
