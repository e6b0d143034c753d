use log::{debug, warn};

use crate::body;
use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::{ClientConfig, HttpClient, PreparedRequest};
use crate::options::RequestOptions;
use crate::resolver::{resolve, ResponseTarget};
use crate::{Error, Outcome, Result};

#[cfg(test)]
mod tests;

struct Targets<'a> {
    response: Option<&'a mut dyn ResponseTarget>,
    xml_to_json: Option<&'a mut dyn ResponseTarget>,
}

/// Runs one request on a client built just for it.
pub fn execute(options: RequestOptions) -> Outcome {
    let (request, config, targets) = match prepare(options) {
        Ok(prepared) => prepared,
        Err(e) => return Outcome::failed(e),
    };
    let client = match ReqwestHttpClient::create(config) {
        Ok(client) => client,
        Err(e) => return Outcome::failed(e),
    };
    send(&client, request, targets)
}

/// Runs one request on `client`, ignoring the TLS and timeout options.
pub fn execute_with<C: HttpClient>(client: &C, options: RequestOptions) -> Outcome {
    match prepare(options) {
        Ok((request, _, targets)) => send(client, request, targets),
        Err(e) => Outcome::failed(e),
    }
}

fn prepare(options: RequestOptions) -> Result<(PreparedRequest, ClientConfig, Targets)> {
    let RequestOptions {
        method,
        url,
        body,
        headers,
        tls,
        timeout,
        basic_auth,
        resolve_response,
        resolve_xml_to_json,
        disable_escape_html,
    } = options;

    let body = body::prepare(body, disable_escape_html).map_err(Error::PrepareBody)?;
    let request = PreparedRequest {
        method,
        url,
        headers: headers.into_iter().collect(),
        basic_auth,
        body,
    };
    let targets = Targets {
        response: resolve_response,
        xml_to_json: resolve_xml_to_json,
    };

    Ok((request, ClientConfig::new(tls, timeout), targets))
}

fn send<C: HttpClient>(client: &C, request: PreparedRequest, targets: Targets) -> Outcome {
    let outcome = client.execute(request);

    let Targets {
        response: target,
        xml_to_json,
    } = targets;
    let target = match target {
        Some(target) if outcome.is_ok() => target,
        _ => return outcome,
    };

    let (response, _) = outcome.into_parts();
    debug!(
        "resolving {} response with content type {:?}",
        response.status,
        response.content_type()
    );
    match resolve(
        response.content_type(),
        &response.body,
        Some(target),
        xml_to_json,
    ) {
        Ok(()) => Outcome::complete(response),
        Err(e) => {
            warn!("{} response could not be resolved: {}", response.status, e);
            Outcome::partial(response, Error::from(e))
        }
    }
}
