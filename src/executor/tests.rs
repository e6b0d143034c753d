use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error as _;

use http::header::{HeaderValue, CONTENT_TYPE};
use http::HeaderMap;
use serde_json::{json, Value};

use crate::body::Body;
use crate::executor::execute_with;
use crate::http_client::{ClientConfig, HttpClient, PreparedRequest};
use crate::options::RequestOptions;
use crate::resolver::ResolveError;
use crate::{Error, Outcome, Response, Result};

/// Answers every request with the same response and remembers what it got.
struct CannedClient {
    status: u16,
    content_type: Option<&'static str>,
    body: &'static [u8],
    received: RefCell<Vec<PreparedRequest>>,
}

impl CannedClient {
    fn new(status: u16, content_type: Option<&'static str>, body: &'static [u8]) -> Self {
        CannedClient {
            status,
            content_type,
            body,
            received: RefCell::new(vec![]),
        }
    }
}

impl HttpClient for CannedClient {
    fn create(_: ClientConfig) -> Result<Self> {
        Ok(CannedClient::new(200, None, b""))
    }

    fn execute(&self, request: PreparedRequest) -> Outcome {
        self.received.borrow_mut().push(request);
        let mut headers = HeaderMap::new();
        if let Some(content_type) = self.content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        Outcome::complete(Response {
            status: self.status,
            headers,
            body: self.body.to_vec(),
        })
    }
}

#[test]
fn test_request_is_assembled_from_options() {
    let client = CannedClient::new(201, None, b"");
    let options = RequestOptions::new()
        .method("POST")
        .url("http://localhost/things")
        .header("X-Trace", "1")
        .basic_auth("user", "pass")
        .body(Body::json(json!({"name": "<test>"})))
        .disable_escape_html(true);

    let outcome = execute_with(&client, options);

    assert!(outcome.is_ok());
    let received = client.received.borrow();
    let request = &received[0];
    assert_eq!("POST", request.method);
    assert_eq!("http://localhost/things", request.url);
    assert_eq!(
        vec![("X-Trace".to_string(), "1".to_string())],
        request.headers
    );
    assert_eq!(Some("user"), request.basic_auth.as_ref().map(|auth| auth.username.as_str()));
    assert_eq!(
        Some(b"{\"name\":\"<test>\"}\n".to_vec()),
        request.body
    );
}

#[test]
fn test_body_failure_stops_before_sending() {
    let client = CannedClient::new(200, None, b"");
    let mut unencodable = HashMap::new();
    unencodable.insert((1, 2), "tuple keys");

    let outcome = execute_with(&client, RequestOptions::new().body(Body::json(unencodable)));

    assert!(matches!(outcome.error(), Some(Error::PrepareBody(_))));
    assert_eq!(0, outcome.status());
    assert!(client.received.borrow().is_empty());
}

#[test]
fn test_no_target_skips_resolution() {
    let client = CannedClient::new(200, Some("text/plain"), b"plain");

    let outcome = execute_with(&client, RequestOptions::new().url("http://localhost/"));

    assert!(outcome.is_ok());
    assert_eq!(b"plain", outcome.body());
}

#[test]
fn test_xml_target_alone_skips_resolution() {
    let client = CannedClient::new(200, Some("application/xml"), b"<a>1</a>");
    let mut raw = Value::Null;

    let outcome = execute_with(
        &client,
        RequestOptions::new()
            .url("http://localhost/")
            .resolve_xml_to_json(&mut raw),
    );

    assert!(outcome.is_ok());
    assert_eq!(Value::Null, raw);
}

#[test]
fn test_resolve_failure_keeps_response() {
    let client = CannedClient::new(200, Some("text/plain; charset=utf-8"), b"plain");
    let mut target = Value::Null;

    let outcome = execute_with(
        &client,
        RequestOptions::new()
            .url("http://localhost/")
            .resolve_response(&mut target),
    );

    assert!(matches!(
        outcome.error(),
        Some(Error::Resolve(ResolveError::UnsupportedContentType(_)))
    ));
    let error = outcome.error().unwrap();
    assert!(error.is_unsupported_content_type());
    assert_eq!("failed to resolve response", error.to_string());
    assert_eq!(
        "unsupported content type: text/plain",
        error.source().unwrap().to_string()
    );
    assert_eq!(200, outcome.status());
    assert_eq!(b"plain", outcome.body());
    assert_eq!(
        outcome.headers()[CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
}

#[test]
fn test_xml_resolves_into_both_targets() {
    let client = CannedClient::new(
        200,
        Some("application/xml"),
        b"<user id=\"7\"><name>Ada</name></user>",
    );
    let mut raw = Value::Null;
    let mut typed: HashMap<String, HashMap<String, String>> = HashMap::new();

    let outcome = execute_with(
        &client,
        RequestOptions::new()
            .url("http://localhost/")
            .resolve_response(&mut typed)
            .resolve_xml_to_json(&mut raw),
    );

    assert!(outcome.is_ok());
    assert_eq!(json!({"user": {"-id": "7", "name": "Ada"}}), raw);
    assert_eq!("Ada", typed["user"]["name"]);
}

#[test]
fn test_into_result() {
    let client = CannedClient::new(200, Some("application/json"), b"[1, 2]");
    let mut numbers: Vec<u8> = vec![];

    let response = execute_with(
        &client,
        RequestOptions::new()
            .url("http://localhost/")
            .resolve_response(&mut numbers),
    )
    .into_result()
    .unwrap();

    assert_eq!(b"[1, 2]", response.body.as_slice());
    assert_eq!(vec![1u8, 2], numbers);
}
