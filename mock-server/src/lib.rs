use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiToolProvider {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub openapi_schema: String,
    pub headers: Vec<Value>,
    pub tools: Vec<Value>,
    pub created_at: i64,
}

#[derive(Deserialize)]
pub struct ProviderInput {
    pub name: String,
    pub icon: String,
    pub openapi_schema: String,
    #[serde(default)]
    pub headers: Vec<Value>,
}

#[derive(Deserialize)]
pub struct SchemaInput {
    pub openapi_schema: String,
}

#[derive(Deserialize)]
pub struct DebugInput {
    pub query: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub search_word: String,
}

fn first_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

/// Providers in creation order.
pub type Db = Arc<RwLock<Vec<ApiToolProvider>>>;

type Reply = (StatusCode, Json<Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api-tools", get(list_providers).post(create_provider))
        .route("/api-tools/validate-openapi-schema", post(validate_schema))
        .route("/api-tools/{id}", get(get_provider).post(update_provider))
        .route("/api-tools/{id}/delete", post(delete_provider))
        .route("/builtin-tools", get(list_builtin_tools))
        .route("/builtin-tools/categories", get(list_categories))
        .route("/apps/{id}/debug", post(debug_app))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock tools backend listening");
    }
    axum::serve(listener, app()).await
}

fn success(data: Value) -> Reply {
    (
        StatusCode::OK,
        Json(json!({"code": "success", "message": "", "data": data})),
    )
}

fn failure(status: StatusCode, code: &str, message: &str) -> Reply {
    (
        status,
        Json(json!({"code": code, "message": message, "data": {}})),
    )
}

fn not_found(id: &str) -> Reply {
    failure(
        StatusCode::NOT_FOUND,
        "not_found",
        &format!("tool provider {id} does not exist"),
    )
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// Tools described by an OpenAPI document: one per operation with an
/// `operationId`. Returns the validation message on failure.
pub fn parse_tools(openapi_schema: &str) -> Result<Vec<Value>, String> {
    let schema: Value =
        serde_json::from_str(openapi_schema).map_err(|e| format!("schema is not valid JSON: {e}"))?;
    let paths = schema
        .get("paths")
        .and_then(Value::as_object)
        .ok_or_else(|| "schema has no paths object".to_string())?;

    let mut tools = Vec::new();
    for (path, operations) in paths {
        let Some(operations) = operations.as_object() else {
            return Err(format!("path {path} must map methods to operations"));
        };
        for (method, operation) in operations {
            let Some(name) = operation.get("operationId").and_then(Value::as_str) else {
                return Err(format!("{method} {path} is missing operationId"));
            };
            tools.push(json!({
                "name": name,
                "description": operation.get("description").cloned().unwrap_or_default(),
                "method": method,
                "path": path,
            }));
        }
    }
    Ok(tools)
}

fn description_of(openapi_schema: &str) -> String {
    serde_json::from_str::<Value>(openapi_schema)
        .ok()
        .and_then(|s| s.get("description").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_default()
}

fn find(db: &[ApiToolProvider], id: &str) -> Option<usize> {
    db.iter().position(|p| p.id.to_string() == id)
}

async fn list_providers(State(db): State<Db>, Query(query): Query<ListQuery>) -> Reply {
    let providers = db.read().await;
    let matching: Vec<&ApiToolProvider> = providers
        .iter()
        .filter(|p| p.name.contains(&query.search_word))
        .collect();
    let page_size = query.page_size.max(1) as usize;
    let current_page = query.current_page.max(1) as usize;
    let list: Vec<Value> = matching
        .iter()
        .skip((current_page - 1) * page_size)
        .take(page_size)
        .map(|p| {
            json!({
                "id": p.id,
                "name": p.name,
                "icon": p.icon,
                "description": p.description,
                "headers": p.headers,
                "tools": p.tools,
                "created_at": p.created_at,
            })
        })
        .collect();
    success(json!({
        "list": list,
        "total": matching.len(),
        "current_page": current_page,
        "page_size": page_size,
    }))
}

async fn validate_schema(Json(input): Json<SchemaInput>) -> Reply {
    match parse_tools(&input.openapi_schema) {
        Ok(_) => success(json!({})),
        Err(message) => failure(StatusCode::BAD_REQUEST, "validate_error", &message),
    }
}

async fn create_provider(State(db): State<Db>, Json(input): Json<ProviderInput>) -> Reply {
    if input.name.trim().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "validate_error", "name is required");
    }
    let tools = match parse_tools(&input.openapi_schema) {
        Ok(tools) => tools,
        Err(message) => return failure(StatusCode::BAD_REQUEST, "validate_error", &message),
    };
    let provider = ApiToolProvider {
        id: Uuid::new_v4(),
        description: description_of(&input.openapi_schema),
        name: input.name,
        icon: input.icon,
        openapi_schema: input.openapi_schema,
        headers: input.headers,
        tools,
        created_at: now_secs(),
    };
    debug!(id = %provider.id, name = %provider.name, "created tool provider");
    db.write().await.push(provider);
    success(json!({}))
}

async fn get_provider(State(db): State<Db>, Path(id): Path<String>) -> Reply {
    let providers = db.read().await;
    match find(&providers, &id) {
        Some(idx) => {
            let p = &providers[idx];
            success(json!({
                "id": p.id,
                "name": p.name,
                "icon": p.icon,
                "openapi_schema": p.openapi_schema,
                "headers": p.headers,
                "created_at": p.created_at,
            }))
        }
        None => not_found(&id),
    }
}

async fn update_provider(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<ProviderInput>,
) -> Reply {
    if input.name.trim().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "validate_error", "name is required");
    }
    let tools = match parse_tools(&input.openapi_schema) {
        Ok(tools) => tools,
        Err(message) => return failure(StatusCode::BAD_REQUEST, "validate_error", &message),
    };
    let mut providers = db.write().await;
    let Some(idx) = find(&providers, &id) else {
        return not_found(&id);
    };
    let provider = &mut providers[idx];
    provider.description = description_of(&input.openapi_schema);
    provider.name = input.name;
    provider.icon = input.icon;
    provider.openapi_schema = input.openapi_schema;
    provider.headers = input.headers;
    provider.tools = tools;
    debug!(%id, "updated tool provider");
    success(json!({}))
}

async fn delete_provider(State(db): State<Db>, Path(id): Path<String>) -> Reply {
    let mut providers = db.write().await;
    match find(&providers, &id) {
        Some(idx) => {
            providers.remove(idx);
            debug!(%id, "deleted tool provider");
            success(json!({}))
        }
        None => not_found(&id),
    }
}

async fn list_categories() -> Reply {
    success(json!([
        {"category": "search", "name": "Search", "icon": "<svg>search</svg>"},
        {"category": "image", "name": "Image", "icon": "<svg>image</svg>"},
        {"category": "weather", "name": "Weather", "icon": "<svg>weather</svg>"},
    ]))
}

async fn list_builtin_tools() -> Reply {
    success(json!([
        {
            "name": "google",
            "label": "Google",
            "category": "search",
            "description": "Search the web with Google Serper.",
            "background": "#E5E7EB",
            "tools": [{"name": "google_serper", "label": "Google Serper", "inputs": []}],
            "created_at": 1721460914,
        },
        {
            "name": "gaode",
            "label": "Gaode",
            "category": "weather",
            "description": "Weather lookup by city.",
            "background": "#E0F2FE",
            "tools": [{"name": "gaode_weather", "label": "Gaode Weather", "inputs": []}],
            "created_at": 1721460914,
        },
    ]))
}

async fn debug_app(Path(id): Path<String>, Json(input): Json<DebugInput>) -> Reply {
    debug!(app_id = %id, "debugging app");
    success(json!({"content": format!("[{id}] {}", input.query)}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_come_from_operation_ids() {
        let schema = r#"{
            "description": "weather lookups",
            "paths": {"/now": {"get": {"operationId": "now", "description": "current"}}}
        }"#;
        let tools = parse_tools(schema).unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "now");
        assert_eq!(tools[0]["method"], "get");
        assert_eq!(description_of(schema), "weather lookups");
    }

    #[test]
    fn schema_without_paths_is_rejected() {
        let err = parse_tools(r#"{"openapi": "3.0.0"}"#).unwrap_err();
        assert!(err.contains("paths"));
    }

    #[test]
    fn schema_that_is_not_json_is_rejected() {
        let err = parse_tools("openapi: 3.0.0").unwrap_err();
        assert!(err.contains("not valid JSON"));
    }

    #[test]
    fn operation_without_id_is_rejected() {
        let err = parse_tools(r#"{"paths": {"/x": {"post": {}}}}"#).unwrap_err();
        assert!(err.contains("operationId"));
    }

    #[test]
    fn list_query_defaults() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.current_page, 1);
        assert_eq!(query.page_size, 20);
        assert!(query.search_word.is_empty());
    }
}
