use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::types::app::{DebugAppRequest, DebugAppResponse};

impl ApiClient {
    /// Send `query` to an app's debug endpoint and return its answer.
    pub async fn debug_app(&self, app_id: &str, query: &str) -> Result<DebugAppResponse, ApiError> {
        let body = DebugAppRequest {
            query: query.to_string(),
        };
        self.post(
            &format!("/apps/{app_id}/debug"),
            RequestOptions::new().json(&body)?,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::http::HttpMethod;
    use crate::services::testing::client_replying;

    #[tokio::test]
    async fn debug_posts_query() {
        let (client, recorder) = client_replying(json!({
            "code": "success", "message": "", "data": {"content": "hi there"}
        }));
        let resp = client.debug_app("app-1", "hello").await.unwrap();

        let req = recorder.last();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:5000/apps/app-1/debug");
        assert_eq!(req.body.as_deref(), Some(br#"{"query":"hello"}"#.as_slice()));
        assert_eq!(resp.data.as_ref().unwrap().content, "hi there");
    }
}
