use thiserror::Error;

pub type Result<T> = std::result::Result<T, ActionError>;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("unknown action '{0}' referenced")]
    UnknownAction(String),

    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("notification delivery failed: {0}")]
    Notify(#[from] adapters::AdapterError),
}

impl ActionError {
    pub fn category(&self) -> &'static str {
        match self {
            ActionError::UnknownAction(_) => "config",
            ActionError::Template(_) => "template",
            ActionError::Notify(_) => "delivery",
        }
    }
}
