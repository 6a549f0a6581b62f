//! Response envelopes and the per-resource DTOs.
//!
//! # Design
//! These types mirror the backend's JSON but are defined independently of
//! the mock-server crate; the integration tests catch schema drift. Fields
//! whose backend shape is not pinned down (header lists, tool lists) stay as
//! opaque `serde_json::Value`s rather than guessed structs.

pub mod api_tool;
pub mod app;
pub mod builtin_tool;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status vocabulary carried in every envelope's `code` field.
///
/// Informational only: the transport never inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HttpCode {
    Success,
    Fail,
    NotFound,
    Unauthorized,
    Forbidden,
    ValidateError,
    #[serde(other)]
    Unknown,
}

/// Plain response envelope: `{ code, message, data }`.
///
/// On a `success` reply `data` must decode as `T`. Any other code keeps the
/// reply readable: `data` is `None` when it does not fit `T` (error replies
/// usually carry `{}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub code: HttpCode,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == HttpCode::Success
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Envelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Wire {
            code: HttpCode,
            #[serde(default)]
            message: String,
            #[serde(default)]
            data: Value,
        }

        let Wire {
            code,
            message,
            data,
        } = Wire::deserialize(deserializer)?;
        let data = if code == HttpCode::Success {
            Some(serde_json::from_value(data).map_err(de::Error::custom)?)
        } else {
            serde_json::from_value(data).ok()
        };
        Ok(Self {
            code,
            message,
            data,
        })
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub list: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub page_size: u32,
}

pub type PaginatedEnvelope<T> = Envelope<Paginated<T>>;
