//! Asynchronous client core for the AI-agent tools API.
//!
//! # Overview
//! A typed request layer over a REST backend that manages custom API tool
//! providers, built-in tool catalogs and apps. Every service call goes
//! through one path: service method -> `get`/`post` -> `ApiClient::request`
//! machinery -> `Transport`.
//!
//! # Design
//! - `ApiClient` is stateless apart from its immutable base address and
//!   default options.
//! - The `Transport` trait is the only I/O seam. `ReqwestTransport` talks to
//!   the network; tests plug in recording stubs.
//! - Each call races the exchange against a deadline. A timed-out exchange
//!   is detached, not cancelled (see `client`).
//! - No retries, caching or deduplication: one call, one attempt.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod services;
pub mod transport;
pub mod types;

pub use client::{ApiClient, PreparedRequest, RequestOptions};
pub use config::{ClientConfig, RequestDefaults};
pub use endpoint::{build_url, ParamValue, QueryParams};
pub use error::{ApiError, BoxError};
pub use http::{
    CredentialsMode, HttpMethod, HttpRequest, HttpResponse, RedirectMode, RequestMode, Transport,
};
pub use services::api_tool::PageQuery;
pub use transport::ReqwestTransport;
pub use types::{Envelope, HttpCode, Paginated, PaginatedEnvelope};
