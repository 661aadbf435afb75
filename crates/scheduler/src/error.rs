use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchedulerError>;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid cron schedule '{0}': {1}")]
    InvalidSchedule(String, cron::error::Error),

    #[error("store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("action error: {0}")]
    Action(#[from] actions::ActionError),
}
