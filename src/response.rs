use http::header::CONTENT_TYPE;
use http::HeaderMap;

use crate::{Error, Result};

/// A fully buffered response.
#[derive(Debug, Default)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    /// The `Content-Type` header, or an empty string when it is missing or not
    /// valid UTF-8.
    pub fn content_type(&self) -> &str {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }
}

/// Everything a call produced: whatever part of the response was obtained,
/// plus the error that stopped it, if any.
///
/// Status, headers and body are kept even when `error` is set so a failed
/// decode can still be inspected.
#[derive(Debug)]
pub struct Outcome {
    response: Response,
    error: Option<Error>,
}

impl Outcome {
    pub fn complete(response: Response) -> Outcome {
        Outcome {
            response,
            error: None,
        }
    }

    pub fn partial(response: Response, error: Error) -> Outcome {
        Outcome {
            response,
            error: Some(error),
        }
    }

    /// A failure before any response was received.
    pub fn failed(error: Error) -> Outcome {
        let response = Response {
            status: error.status_hint(),
            ..Response::default()
        };
        Outcome::partial(response, error)
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.response.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.response.body
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_parts(self) -> (Response, Option<Error>) {
        (self.response, self.error)
    }

    /// Drops the partial response when an error occurred.
    pub fn into_result(self) -> Result<Response> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.response),
        }
    }
}
