use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Umbrella error the binary matches on to pick a process exit code.
/// Individual crates define narrower error enums and convert into this
/// one at their boundary rather than leaking their internals upward.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("resource description failed: {0}")]
    Resource(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("dispatch error: {0}")]
    Dispatch(String),

    #[error("action error: {0}")]
    Action(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Errors that represent a transient condition in an upstream
    /// dependency (the resource disappeared, a network call timed out)
    /// and should not fail the whole evaluation pass.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, CoreError::Resource(_))
    }
}
