use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResourceError>;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource {0} not found")]
    NotFound(String),

    #[error("transient error describing resource {resource_id}: {message}")]
    Transient { resource_id: String, message: String },
}

impl ResourceError {
    /// Mirrors the original `SecurityGroupError{Ignore: true}` pattern:
    /// a resource that vanished between the triggering event and the
    /// describe call should be skipped, not treated as a pipeline
    /// failure.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, ResourceError::NotFound(_) | ResourceError::Transient { .. })
    }
}
