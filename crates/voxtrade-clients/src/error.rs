use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The service answered with a non-success status; body kept verbatim.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Order rejected: {0}")]
    Rejected(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Status code and body when the failure came from the remote service itself.
    pub fn http_status(&self) -> Option<(u16, &str)> {
        match self {
            ClientError::Http { status, body } => Some((*status, body.as_str())),
            _ => None,
        }
    }
}
