//! # http-client-utils
//!
//! Declarative, blocking HTTP requests. Describe a request with a list of
//! options, send it, and get back the status, headers and body, optionally
//! decoded into a structure of your own.
//!
//! ## Usage
//!
//! ### A simple request
//!
//! ```rust,no_run
//! use http_client_utils::{make_http_request, with_method, with_url};
//!
//! let outcome = make_http_request(vec![
//!     with_method("DELETE"),
//!     with_url("http://localhost:8080/items/42"),
//! ]);
//! assert_eq!(204, outcome.status());
//! ```
//!
//! ### Decoding the response
//!
//! Any `serde` deserializable value can receive the response. JSON responses
//! are decoded directly; XML responses are first normalized to JSON.
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use http_client_utils::{make_http_request, with_body, with_method, with_resolve_response, with_url, Body};
//! use serde_json::json;
//!
//! let mut created: HashMap<String, String> = HashMap::new();
//! let outcome = make_http_request(vec![
//!     with_method("POST"),
//!     with_url("http://localhost:8080/items"),
//!     with_body(Body::json(json!({"name": "test"}))),
//!     with_resolve_response(&mut created),
//! ]);
//! if let Some(error) = outcome.error() {
//!     // the raw body is still there to look at
//!     eprintln!("{}: {}", error, String::from_utf8_lossy(outcome.body()));
//! }
//! ```
//!
//! ### The builder
//!
//! The same options are available as chained methods:
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use http_client_utils::RequestOptions;
//!
//! let outcome = RequestOptions::new()
//!     .url("http://localhost:8080/slow")
//!     .timeout(Duration::from_secs(1))
//!     .basic_auth("user", "secret")
//!     .send();
//! if outcome.error().map_or(false, |e| e.is_timeout()) {
//!     assert_eq!(408, outcome.status());
//! }
//! ```
//!
//! ### Request bodies
//!
//! * strings and byte vectors are sent as they are;
//! * [`Body::json`] encodes anything `serde` can serialize. `<`, `>` and `&`
//!   are escaped as `\u003c`, `\u003e` and `\u0026` unless
//!   [`with_disable_escape_html`] is set.
//!
//! ### Content types
//!
//! The decode path is picked from the `Content-Type` of the response:
//!
//! * `application/json` (parameters like `charset` are ignored);
//! * `application/xml`, converted to JSON first. The root element is the top
//!   level key, attributes are prefixed with `-`, text next to attributes or
//!   children is stored under `#text` and repeated elements become arrays. Use
//!   [`with_resolve_xml_to_json`] to also receive that JSON form;
//! * anything else fails with an unsupported content type error.

pub use crate::body::Body;
pub use crate::error::{Error, Result};
pub use crate::http_client::{ClientConfig, HttpClient, TlsConfig};
pub use crate::options::{
    with_basic_auth, with_body, with_disable_escape_html, with_headers, with_method,
    with_resolve_response, with_resolve_xml_to_json, with_timeout, with_tls_config, with_url,
    BasicAuth, RequestOption, RequestOptions,
};
pub use crate::resolver::{ContentKind, ResolveError, ResponseTarget, XmlError};
pub use crate::response::{Outcome, Response};

pub mod body;
mod error;
pub mod executor;
pub mod http_client;
pub mod options;
pub mod resolver;
mod response;

/// Builds a request from `options`, sends it and buffers the response.
///
/// Options are applied in order. Whatever was obtained before a failure is
/// kept in the returned [`Outcome`] next to the error.
pub fn make_http_request<'a, I>(options: I) -> Outcome
where
    I: IntoIterator<Item = RequestOption<'a>>,
{
    RequestOptions::from_options(options).send()
}
