//! Error types for change-set construction

/// Failure turning an entity into a field record
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Entity serialized to something other than a JSON object
    #[error("entity must serialize to an object, found {found}")]
    NotAnObject {
        /// JSON type that was produced
        found: &'static str,
    },

    /// Entity could not be serialized
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
