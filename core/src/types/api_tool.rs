use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Envelope, PaginatedEnvelope};

/// A custom API tool provider as it appears in the paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiToolProvider {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub headers: Vec<Value>,
    #[serde(default)]
    pub tools: Vec<Value>,
    pub created_at: i64,
}

/// Full detail of a single provider, including its OpenAPI schema text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiToolProviderDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub openapi_schema: String,
    #[serde(default)]
    pub headers: Vec<Value>,
    pub created_at: i64,
}

/// Payload for creating a provider. Updates send the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateApiToolProviderRequest {
    pub name: String,
    pub icon: String,
    pub openapi_schema: String,
    #[serde(default)]
    pub headers: Vec<Value>,
}

pub type UpdateApiToolProviderRequest = CreateApiToolProviderRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateOpenApiSchemaRequest {
    pub openapi_schema: String,
}

pub type GetApiToolProvidersWithPageResponse = PaginatedEnvelope<ApiToolProvider>;
pub type GetApiToolProviderResponse = Envelope<ApiToolProviderDetail>;
