use anyhow::anyhow;
use http::header::{HeaderName, HeaderValue};
use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::HeaderMap;
use reqwest::Method;

use crate::http_client::{ClientConfig, HttpClient, PreparedRequest, TlsConfig};
use crate::options::{BasicAuth, DEFAULT_METHOD};
use crate::{Error, Outcome, Response, Result};

pub struct ReqwestHttpClient {
    client: Client,
}

impl HttpClient for ReqwestHttpClient {
    fn create(config: ClientConfig) -> Result<ReqwestHttpClient>
    where
        Self: Sized,
    {
        let ClientConfig { tls, timeout } = config;
        // the blocking client defaults to a 30 second deadline, an unset
        // timeout has to clear it
        let mut builder = Client::builder().timeout(timeout);
        if let Some(tls) = tls {
            builder = set_tls(tls, builder);
        }
        let client = builder.build().map_err(Error::BuildClient)?;

        Ok(ReqwestHttpClient { client })
    }

    fn execute(&self, request: PreparedRequest) -> Outcome {
        let request = match self.build(request) {
            Ok(request) => request,
            Err(e) => return Outcome::failed(Error::CreateRequest(e)),
        };
        debug!("sending {} {}", request.method(), request.url());

        let response = match self.client.execute(request) {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Outcome::failed(Error::Timeout(e)),
            Err(e) => return Outcome::failed(Error::Send(e)),
        };

        let mut partial = Response {
            status: response.status().as_u16(),
            headers: response.headers().clone(),
            body: vec![],
        };
        debug!("received {} from {}", partial.status, response.url());

        match response.bytes() {
            Ok(body) => {
                partial.body = body.to_vec();
                Outcome::complete(partial)
            }
            Err(e) => Outcome::partial(partial, Error::Read(e)),
        }
    }
}

impl ReqwestHttpClient {
    fn build(&self, request: PreparedRequest) -> anyhow::Result<reqwest::blocking::Request> {
        let PreparedRequest {
            method,
            url,
            headers,
            basic_auth,
            body,
        } = request;
        let method = match method.as_str() {
            "" => DEFAULT_METHOD,
            method => method,
        };
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|e| anyhow!("invalid method {:?}: {}", method, e))?;

        let mut request_builder = self.client.request(method, url.as_str());
        request_builder = request_builder.headers(set_headers(&headers)?);
        if let Some(BasicAuth { username, password }) = basic_auth {
            request_builder = request_builder.basic_auth(username, Some(password));
        }
        if let Some(body) = body {
            request_builder = set_body(body, request_builder);
        }

        Ok(request_builder.build()?)
    }
}

fn set_headers(headers: &[(String, String)]) -> anyhow::Result<HeaderMap> {
    let mut header_map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| anyhow!("invalid header name {:?}: {}", key, e))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| anyhow!("invalid value for header {:?}: {}", key, e))?;
        header_map.insert(name, value);
    }
    Ok(header_map)
}

fn set_body(body: Vec<u8>, request_builder: RequestBuilder) -> RequestBuilder {
    request_builder.body::<reqwest::blocking::Body>(body.into())
}

fn set_tls(
    tls: TlsConfig,
    mut client_builder: reqwest::blocking::ClientBuilder,
) -> reqwest::blocking::ClientBuilder {
    let TlsConfig {
        accept_invalid_certs,
        accept_invalid_hostnames,
        root_certificates,
        identity,
        min_version,
    } = tls;
    client_builder = client_builder
        .danger_accept_invalid_certs(accept_invalid_certs)
        .danger_accept_invalid_hostnames(accept_invalid_hostnames);
    for certificate in root_certificates {
        client_builder = client_builder.add_root_certificate(certificate);
    }
    if let Some(identity) = identity {
        client_builder = client_builder.identity(identity);
    }
    if let Some(version) = min_version {
        client_builder = client_builder.min_tls_version(version);
    }
    client_builder
}
