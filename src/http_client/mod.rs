use std::time::Duration;

use ::reqwest::tls::Version;
use ::reqwest::{Certificate, Identity};

use crate::options::BasicAuth;
use crate::{Outcome, Result};


pub mod reqwest;

/// Transport security settings applied to the per-call client.
#[derive(Clone, Default)]
pub struct TlsConfig {
    pub accept_invalid_certs: bool,
    pub accept_invalid_hostnames: bool,
    pub root_certificates: Vec<Certificate>,
    pub identity: Option<Identity>,
    pub min_version: Option<Version>,
}

impl TlsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn accept_invalid_hostnames(mut self, accept: bool) -> Self {
        self.accept_invalid_hostnames = accept;
        self
    }

    pub fn add_root_certificate(mut self, certificate: Certificate) -> Self {
        self.root_certificates.push(certificate);
        self
    }

    pub fn identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn min_version(mut self, version: Version) -> Self {
        self.min_version = Some(version);
        self
    }
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("accept_invalid_hostnames", &self.accept_invalid_hostnames)
            .field("root_certificates", &self.root_certificates.len())
            .field("identity", &self.identity.is_some())
            .field("min_version", &self.min_version)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub tls: Option<TlsConfig>,
    /// `None` means the request may take as long as it needs.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(tls: Option<TlsConfig>, timeout: Option<Duration>) -> Self {
        Self { tls, timeout }
    }
}

/// A request whose body is already serialized but which has not yet been
/// checked by the transport.
#[derive(Debug, Clone, Default)]
pub struct PreparedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub basic_auth: Option<BasicAuth>,
    pub body: Option<Vec<u8>>,
}

pub trait HttpClient {
    fn create(config: ClientConfig) -> Result<Self>
    where
        Self: Sized;

    /// Performs one round trip and buffers the whole response.
    fn execute(&self, request: PreparedRequest) -> Outcome;
}
