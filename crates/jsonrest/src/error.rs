use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("http client error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server response failed with code: {status}")]
    Server { status: u16 },
    #[error("failed to parse response body as json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected a json object, found {found}")]
    TypeMismatch { found: &'static str },
}

impl RestError {
    /// Status code carried by a rejected response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RestError::Server { status } => Some(*status),
            _ => None,
        }
    }
}
