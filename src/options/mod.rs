use std::collections::HashMap;
use std::time::Duration;

use crate::body::Body;
use crate::executor;
use crate::http_client::TlsConfig;
use crate::resolver::ResponseTarget;
use crate::Outcome;


pub const DEFAULT_METHOD: &str = "GET";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// Everything needed to perform a single request.
///
/// Nothing is validated here; a bad method or URL is reported when the request
/// is created.
pub struct RequestOptions<'a> {
    pub method: String,
    pub url: String,
    pub body: Option<Body<'a>>,
    pub headers: HashMap<String, String>,
    pub tls: Option<TlsConfig>,
    pub timeout: Option<Duration>,
    pub basic_auth: Option<BasicAuth>,
    pub resolve_response: Option<&'a mut dyn ResponseTarget>,
    pub resolve_xml_to_json: Option<&'a mut dyn ResponseTarget>,
    pub disable_escape_html: bool,
}

impl Default for RequestOptions<'_> {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            url: String::new(),
            body: None,
            headers: HashMap::new(),
            tls: None,
            timeout: None,
            basic_auth: None,
            resolve_response: None,
            resolve_xml_to_json: None,
            disable_escape_html: false,
        }
    }
}

impl<'a> RequestOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies options in order; a later option wins over an earlier one for
    /// the same field.
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = RequestOption<'a>>,
    {
        options
            .into_iter()
            .fold(Self::default(), |request, option| request.apply(option))
    }

    pub fn apply(mut self, option: RequestOption<'a>) -> Self {
        let RequestOption(set) = option;
        set(&mut self);
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn body(mut self, body: impl Into<Body<'a>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Replaces all headers.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn resolve_response<T>(mut self, target: &'a mut T) -> Self
    where
        T: ResponseTarget + 'a,
    {
        self.resolve_response = Some(target);
        self
    }

    pub fn resolve_xml_to_json<T>(mut self, target: &'a mut T) -> Self
    where
        T: ResponseTarget + 'a,
    {
        self.resolve_xml_to_json = Some(target);
        self
    }

    pub fn disable_escape_html(mut self, disable: bool) -> Self {
        self.disable_escape_html = disable;
        self
    }

    pub fn send(self) -> Outcome {
        executor::execute(self)
    }
}

/// One deferred change to a [`RequestOptions`].
pub struct RequestOption<'a>(Box<dyn FnOnce(&mut RequestOptions<'a>) + 'a>);

impl<'a> RequestOption<'a> {
    fn new(set: impl FnOnce(&mut RequestOptions<'a>) + 'a) -> Self {
        RequestOption(Box::new(set))
    }
}

pub fn with_method<'a>(method: impl Into<String>) -> RequestOption<'a> {
    let method = method.into();
    RequestOption::new(move |options| options.method = method)
}

pub fn with_url<'a>(url: impl Into<String>) -> RequestOption<'a> {
    let url = url.into();
    RequestOption::new(move |options| options.url = url)
}

/// Text and bytes are sent as is; wrap anything else in [`Body::json`].
pub fn with_body<'a>(body: impl Into<Body<'a>>) -> RequestOption<'a> {
    let body = body.into();
    RequestOption::new(move |options| options.body = Some(body))
}

pub fn with_headers<'a>(headers: HashMap<String, String>) -> RequestOption<'a> {
    RequestOption::new(move |options| options.headers = headers)
}

pub fn with_tls_config<'a>(tls: TlsConfig) -> RequestOption<'a> {
    RequestOption::new(move |options| options.tls = Some(tls))
}

pub fn with_timeout<'a>(timeout: Duration) -> RequestOption<'a> {
    RequestOption::new(move |options| options.timeout = Some(timeout))
}

pub fn with_basic_auth<'a>(
    username: impl Into<String>,
    password: impl Into<String>,
) -> RequestOption<'a> {
    let basic_auth = BasicAuth {
        username: username.into(),
        password: password.into(),
    };
    RequestOption::new(move |options| options.basic_auth = Some(basic_auth))
}

/// Decodes the response body into `target` when the call succeeds.
pub fn with_resolve_response<'a, T>(target: &'a mut T) -> RequestOption<'a>
where
    T: ResponseTarget + 'a,
{
    RequestOption::new(move |options| options.resolve_response = Some(target))
}

/// Receives the JSON form of an XML response. Only used when a response
/// target is also set.
pub fn with_resolve_xml_to_json<'a, T>(target: &'a mut T) -> RequestOption<'a>
where
    T: ResponseTarget + 'a,
{
    RequestOption::new(move |options| options.resolve_xml_to_json = Some(target))
}

pub fn with_disable_escape_html<'a>(disable: bool) -> RequestOption<'a> {
    RequestOption::new(move |options| options.disable_escape_html = disable)
}
