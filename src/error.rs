use http::StatusCode;
use thiserror::Error;

use crate::resolver::ResolveError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to prepare request body")]
    PrepareBody(#[source] serde_json::Error),

    #[error("failed to build http client")]
    BuildClient(#[source] reqwest::Error),

    #[error("failed to create request")]
    CreateRequest(#[source] anyhow::Error),

    #[error("request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("failed to send request")]
    Send(#[source] reqwest::Error),

    #[error("failed to read response body")]
    Read(#[source] reqwest::Error),

    #[error("failed to resolve response")]
    Resolve(#[source] ResolveError),
}

impl Error {
    /// Status reported alongside an error raised before any response arrived.
    ///
    /// Timeouts report `408 Request Timeout` even though the server never
    /// answered; every other pre-response failure reports `0`.
    pub fn status_hint(&self) -> u16 {
        match self {
            Error::Timeout(_) => StatusCode::REQUEST_TIMEOUT.as_u16(),
            _ => 0,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }

    pub fn is_unsupported_content_type(&self) -> bool {
        matches!(
            self,
            Error::Resolve(ResolveError::UnsupportedContentType(_))
        )
    }
}

impl From<ResolveError> for Error {
    fn from(error: ResolveError) -> Self {
        Error::Resolve(error)
    }
}
