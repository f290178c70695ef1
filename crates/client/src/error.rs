use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Uniform failure shape for every backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a usable response (network, malformed
    /// request, undecodable body).
    #[error("Client Error: {0}")]
    Client(String),
    /// The backend answered with a non-2xx status.
    #[error("Server Error: {status} - {status_text}")]
    Server { status: u16, status_text: String },
}

impl ClientError {
    pub fn server(status: StatusCode) -> Self {
        Self::Server {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Client(value.to_string())
    }
}
