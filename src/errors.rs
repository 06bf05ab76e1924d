use thiserror::Error;

pub type UiResult<T> = Result<T, UiError>;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("{0}")]
    Network(String),
    /// Non-2xx response. Only the action message is displayed; the status is
    /// kept for logging and the body is never read.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("missing element: {0}")]
    MissingElement(String),
    /// A browser API threw.
    #[error("script error: {0}")]
    Js(String),
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            UiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
