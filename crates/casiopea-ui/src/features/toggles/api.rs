//! Fetch transport for toggle requests.

use casiopea_api_models::ToggleResult;
use gloo_net::http::{Method as HttpMethod, Request};
use web_sys::RequestCredentials;

use crate::config::{Credentials, Method, RequestConfig};
use crate::features::toggles::controller::ToggleTransport;
use crate::features::toggles::error::TransportError;

/// Sends toggle requests with the browser fetch API.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl ToggleTransport for FetchTransport {
    async fn send(
        &self,
        url: &str,
        config: &RequestConfig,
    ) -> Result<ToggleResult, TransportError> {
        let mut req = Request::new(url)
            .method(http_method(config.method))
            .credentials(credentials(config.credentials));
        for (name, value) in &config.headers {
            req = req.header(name, value);
        }
        let resp = req
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;
        if !resp.ok() {
            return Err(TransportError::Status(resp.status()));
        }
        resp.json::<ToggleResult>()
            .await
            .map_err(|err| TransportError::Decode(err.to_string()))
    }
}

fn http_method(method: Method) -> HttpMethod {
    match method {
        Method::Get => HttpMethod::GET,
        Method::Post => HttpMethod::POST,
        Method::Put => HttpMethod::PUT,
        Method::Patch => HttpMethod::PATCH,
        Method::Delete => HttpMethod::DELETE,
    }
}

const fn credentials(credentials: Credentials) -> RequestCredentials {
    match credentials {
        Credentials::Omit => RequestCredentials::Omit,
        Credentials::SameOrigin => RequestCredentials::SameOrigin,
        Credentials::Include => RequestCredentials::Include,
    }
}
