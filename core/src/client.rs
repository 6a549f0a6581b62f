//! Typed request layer for the tools API.
//!
//! # Design
//! `ApiClient` holds the base address, an immutable `RequestDefaults` and a
//! shared `Transport`. A call goes through three steps:
//!
//! 1. `prepare`: merge caller options over the defaults (shallow, caller
//!    wins), force the verb if a verb helper asked for one and fold GET query
//!    parameters into the URL. Pure and synchronous. Bodies are encoded
//!    earlier still, when they are attached to `RequestOptions`.
//! 2. `race`: run the exchange on its own task and race it against a timer
//!    armed at call start.
//! 3. Decode the winning response body as JSON into the caller's `T`.
//!
//! # Timeout semantics
//! When the timer wins, the exchange task's `JoinHandle` is dropped. That
//! detaches the task rather than aborting it: the underlying request may
//! still run to completion in the background, and its result is thrown
//! away. Callers observe exactly one outcome per call.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ClientConfig, RequestDefaults};
use crate::endpoint::{build_url, QueryParams};
use crate::error::ApiError;
use crate::http::{
    CredentialsMode, HttpMethod, HttpRequest, HttpResponse, RedirectMode, RequestMode, Transport,
};
use crate::transport::ReqwestTransport;

/// Per-call options. Every field left as `None` falls back to the client's
/// `RequestDefaults`.
///
/// `params` only applies to GET requests; on any other method it is
/// silently dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Option<HttpMethod>,
    pub params: Option<QueryParams>,
    pub body: Option<Vec<u8>>,
    pub headers: Option<Vec<(String, String)>>,
    pub mode: Option<RequestMode>,
    pub credentials: Option<CredentialsMode>,
    pub redirect: Option<RedirectMode>,
    pub timeout_ms: Option<u64>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Attach `value` encoded as a JSON string. Struct fields keep their
    /// declaration order.
    ///
    /// Fails with `ApiError::Encoding` if `value` has no JSON form (for
    /// example a map with non-string keys); no request is made in that case.
    pub fn json<B: Serialize + ?Sized>(mut self, value: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_vec(value).map_err(ApiError::Encoding)?);
        Ok(self)
    }

    /// Attach an already-encoded payload, sent verbatim.
    pub fn raw(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.body = Some(bytes.into());
        self
    }

    /// Replaces the default header set wholesale.
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn redirect(mut self, redirect: RedirectMode) -> Self {
        self.redirect = Some(redirect);
        self
    }

    /// Per-call deadline. `0` is raised to 1 ms.
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms.max(1));
        self
    }
}

/// A request ready for the transport, plus the deadline to race it against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub request: HttpRequest,
    pub timeout_ms: u64,
}

/// Asynchronous, stateless client for the tools API.
///
/// Cloning is cheap; clones share the transport. Calls must run inside a
/// tokio runtime because each exchange is spawned onto it.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    defaults: RequestDefaults,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self::with_defaults(config, RequestDefaults::from_config(config), transport)
    }

    pub fn with_defaults(
        config: &ClientConfig,
        defaults: RequestDefaults,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            defaults,
            transport,
        }
    }

    /// Client over the network via `reqwest`.
    pub fn with_reqwest(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(config, Arc::new(ReqwestTransport::new()?)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn defaults(&self) -> &RequestDefaults {
        &self.defaults
    }

    /// Issue a request with the method taken from `options` (GET if unset).
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.issue(path, options, None).await
    }

    /// Issue a GET. The verb cannot be overridden by `options.method`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.issue(path, options, Some(HttpMethod::Get)).await
    }

    /// Issue a POST. The verb cannot be overridden by `options.method`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.issue(path, options, Some(HttpMethod::Post)).await
    }

    async fn issue<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
        forced_method: Option<HttpMethod>,
    ) -> Result<T, ApiError> {
        let prepared = self.prepare(path, options, forced_method);
        let response = self.race(prepared).await?;
        decode(&response)
    }

    /// Merge `options` over the defaults and build the outgoing request.
    pub fn prepare(
        &self,
        path: &str,
        options: RequestOptions,
        forced_method: Option<HttpMethod>,
    ) -> PreparedRequest {
        let RequestOptions {
            method,
            params,
            body,
            headers,
            mode,
            credentials,
            redirect,
            timeout_ms,
        } = options;
        let defaults = &self.defaults;

        let method = forced_method.or(method).unwrap_or(defaults.method);
        let params = params.filter(|_| method == HttpMethod::Get);
        let url = build_url(&self.base_url, path, params.as_ref());

        PreparedRequest {
            request: HttpRequest {
                method,
                url,
                headers: headers.unwrap_or_else(|| defaults.headers.clone()),
                body,
                mode: mode.unwrap_or(defaults.mode),
                credentials: credentials.unwrap_or(defaults.credentials),
                redirect: redirect.unwrap_or(defaults.redirect),
            },
            timeout_ms: timeout_ms.unwrap_or(defaults.timeout_ms).max(1),
        }
    }

    /// First of {exchange, timer} to settle wins. See the module docs for
    /// what happens to a losing exchange.
    async fn race(&self, prepared: PreparedRequest) -> Result<HttpResponse, ApiError> {
        let PreparedRequest {
            request,
            timeout_ms,
        } = prepared;
        let deadline = tokio::time::sleep(Duration::from_millis(timeout_ms));

        debug!(method = %request.method, url = %request.url, timeout_ms, "issuing request");
        let method = request.method;
        let url = request.url.clone();
        let transport = Arc::clone(&self.transport);
        let exchange = tokio::spawn(async move { transport.execute(request).await });

        tokio::select! {
            joined = exchange => match joined {
                Ok(Ok(response)) => Ok(response),
                Ok(Err(cause)) => {
                    debug!(%method, %url, error = %cause, "transport failed");
                    Err(ApiError::Network(cause))
                }
                Err(join_error) => Err(ApiError::Network(Box::new(join_error))),
            },
            () = deadline => {
                warn!(%method, %url, timeout_ms, "request timed out, discarding in-flight exchange");
                Err(ApiError::Timeout { timeout_ms })
            }
        }
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        debug!(status = response.status, "decoding non-2xx response body");
    }
    serde_json::from_slice(&response.body).map_err(ApiError::Decoding)
}
