use crate::id::{LocationId, PathId, ZoneId};

/// Convenience alias for core-model results.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors from the core world model.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced zone is not in the map.
    #[error("zone not found: {0}")]
    ZoneNotFound(ZoneId),

    /// The referenced location is not in the map.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),

    /// The referenced path is not in the map.
    #[error("path not found: {0}")]
    PathNotFound(PathId),

    /// A table insert reused an existing id.
    #[error("duplicate id: {0}")]
    DuplicateId(String),
}
