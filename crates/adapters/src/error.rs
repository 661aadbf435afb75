use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdapterError>;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("queue error: {0}")]
    Queue(String),

    #[error("notification delivery failed: {0}")]
    Notify(String),

    #[error("keyed store error: {0}")]
    Store(String),

    #[error("resource description failed: {0}")]
    Resource(#[from] resource::ResourceError),
}

impl AdapterError {
    pub fn is_ignorable(&self) -> bool {
        match self {
            AdapterError::Resource(e) => e.is_ignorable(),
            _ => false,
        }
    }
}
