//! `Transport` implementation backed by `reqwest`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use reqwest::{Client, Method};

use crate::error::{ApiError, BoxError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RedirectMode, Transport};

/// Network transport over `reqwest`.
///
/// Holds one client per redirect policy, all sharing a cookie jar so that
/// credentials mode "include" carries session cookies between calls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    follow: Client,
    manual: Client,
    reject: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ApiError> {
        let jar = Arc::new(Jar::default());
        let build = |policy: Policy| {
            Client::builder()
                .cookie_provider(Arc::clone(&jar))
                .redirect(policy)
                .build()
                .map_err(client_build_error)
        };
        Ok(Self {
            follow: build(Policy::default())?,
            manual: build(Policy::none())?,
            reject: build(Policy::custom(|attempt| attempt.error("redirects are not allowed")))?,
        })
    }

    fn client_for(&self, redirect: RedirectMode) -> &Client {
        match redirect {
            RedirectMode::Follow => &self.follow,
            RedirectMode::Manual => &self.manual,
            RedirectMode::Error => &self.reject,
        }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

/// A client that cannot be built is a setup fault, not a failed exchange.
fn client_build_error(e: reqwest::Error) -> ApiError {
    ApiError::Config(format!("http client could not be built: {e}"))
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let mut builder = self
            .client_for(request.redirect)
            .request(Self::to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_client_for_every_redirect_mode() {
        let transport = ReqwestTransport::new().unwrap();
        for mode in [RedirectMode::Follow, RedirectMode::Manual, RedirectMode::Error] {
            transport.client_for(mode);
        }
    }

    #[test]
    fn build_failures_are_config_errors() {
        let e = Client::new().get("not a url").build().unwrap_err();
        match client_build_error(e) {
            ApiError::Config(message) => {
                assert!(message.starts_with("http client could not be built"))
            }
            other => panic!("expected Config, got {other:?}"),
        }
    }
}
