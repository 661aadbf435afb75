use thiserror::Error;

pub type Result<T> = std::result::Result<T, DispatchError>;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("malformed event body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("queue error: {0}")]
    Queue(#[from] adapters::AdapterError),

    #[error("store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("action error: {0}")]
    Action(#[from] actions::ActionError),
}

impl DispatchError {
    /// A message whose handling failed for a transient reason should
    /// stay on the queue for redelivery; anything else is acked so it
    /// doesn't poison the queue forever.
    pub fn is_retryable(&self) -> bool {
        match self {
            DispatchError::Queue(e) => !e.is_ignorable(),
            _ => false,
        }
    }
}
