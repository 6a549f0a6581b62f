use crate::client::{ApiClient, RequestOptions};
use crate::endpoint::QueryParams;
use crate::error::ApiError;
use crate::types::api_tool::{
    CreateApiToolProviderRequest, GetApiToolProviderResponse,
    GetApiToolProvidersWithPageResponse, UpdateApiToolProviderRequest,
    ValidateOpenApiSchemaRequest,
};
use crate::types::Envelope;

/// Paging and search input for provider listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub current_page: u32,
    pub page_size: u32,
    /// Substring filter; matching is up to the backend.
    pub search_word: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 20,
            search_word: String::new(),
        }
    }
}

impl PageQuery {
    pub fn new(current_page: u32, page_size: u32, search_word: &str) -> Self {
        Self {
            current_page,
            page_size,
            search_word: search_word.to_string(),
        }
    }

    /// Pages and sizes below 1 are raised to 1.
    fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .insert("current_page", self.current_page.max(1))
            .insert("page_size", self.page_size.max(1))
            .insert("search_word", self.search_word.as_str())
    }
}

impl ApiClient {
    /// `GET /api-tools?current_page=..&page_size=..&search_word=..`
    pub async fn get_api_tool_providers_with_page(
        &self,
        query: &PageQuery,
    ) -> Result<GetApiToolProvidersWithPageResponse, ApiError> {
        self.get("/api-tools", RequestOptions::new().params(query.to_params()))
            .await
    }

    pub async fn validate_openapi_schema(
        &self,
        openapi_schema: &str,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        let body = ValidateOpenApiSchemaRequest {
            openapi_schema: openapi_schema.to_string(),
        };
        self.post(
            "/api-tools/validate-openapi-schema",
            RequestOptions::new().json(&body)?,
        )
        .await
    }

    pub async fn create_api_tool_provider(
        &self,
        req: &CreateApiToolProviderRequest,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.post("/api-tools", RequestOptions::new().json(req)?).await
    }

    pub async fn update_api_tool_provider(
        &self,
        provider_id: &str,
        req: &UpdateApiToolProviderRequest,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.post(
            &format!("/api-tools/{provider_id}"),
            RequestOptions::new().json(req)?,
        )
        .await
    }

    /// `POST /api-tools/{id}/delete`, with no body.
    pub async fn delete_api_tool_provider(
        &self,
        provider_id: &str,
    ) -> Result<Envelope<serde_json::Value>, ApiError> {
        self.post(&format!("/api-tools/{provider_id}/delete"), RequestOptions::new())
            .await
    }

    pub async fn get_api_tool_provider(
        &self,
        provider_id: &str,
    ) -> Result<GetApiToolProviderResponse, ApiError> {
        self.get(&format!("/api-tools/{provider_id}"), RequestOptions::new())
            .await
    }
}
