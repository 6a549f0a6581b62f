use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::types::builtin_tool::{GetBuiltinToolsResponse, GetCategoriesResponse};

impl ApiClient {
    pub async fn get_categories(&self) -> Result<GetCategoriesResponse, ApiError> {
        self.get("/builtin-tools/categories", RequestOptions::new())
            .await
    }

    /// All built-in tool providers, unpaginated.
    pub async fn get_builtin_tools(&self) -> Result<GetBuiltinToolsResponse, ApiError> {
        self.get("/builtin-tools", RequestOptions::new()).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::http::HttpMethod;
    use crate::services::testing::client_replying;

    #[tokio::test]
    async fn categories_are_fetched_with_get() {
        let (client, recorder) = client_replying(json!({
            "code": "success", "message": "",
            "data": [{"category": "search", "icon": "<svg/>", "name": "Search"}]
        }));
        let resp = client.get_categories().await.unwrap();

        let req = recorder.last();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:5000/builtin-tools/categories");
        assert_eq!(resp.data.as_ref().unwrap()[0].category, "search");
    }

    #[tokio::test]
    async fn builtin_tools_decode_opaque_tool_lists() {
        let (client, recorder) = client_replying(json!({
            "code": "success", "message": "",
            "data": [{
                "name": "google", "label": "Google", "category": "search",
                "description": "web search", "background": "#fff",
                "tools": [{"name": "google_serper", "inputs": []}],
                "created_at": 1721460914
            }]
        }));
        let resp = client.get_builtin_tools().await.unwrap();

        assert_eq!(recorder.last().url, "http://localhost:5000/builtin-tools");
        assert_eq!(resp.data.as_ref().unwrap()[0].label, "Google");
        assert_eq!(resp.data.as_ref().unwrap()[0].tools[0]["name"], "google_serper");
    }

    #[tokio::test]
    async fn categories_fail_reply_is_readable() {
        let (client, _) = client_replying(json!({
            "code": "fail", "message": "catalog unavailable", "data": {}
        }));
        let resp = client.get_categories().await.unwrap();
        assert_eq!(resp.code, crate::HttpCode::Fail);
        assert_eq!(resp.message, "catalog unavailable");
        assert!(resp.data.is_none());
    }

    #[tokio::test]
    async fn shape_mismatch_is_a_decoding_error() {
        let (client, _) = client_replying(json!({"code": "success", "message": "", "data": 42}));
        let err = client.get_builtin_tools().await.unwrap_err();
        assert!(matches!(err, crate::ApiError::Decoding(_)));
    }
}
