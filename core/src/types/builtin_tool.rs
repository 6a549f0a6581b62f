use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Envelope;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltinCategory {
    pub category: String,
    pub icon: String,
    pub name: String,
}

/// A built-in tool provider and the tools it ships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltinToolProvider {
    pub name: String,
    pub label: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub tools: Vec<Value>,
    pub created_at: i64,
}

pub type GetCategoriesResponse = Envelope<Vec<BuiltinCategory>>;
pub type GetBuiltinToolsResponse = Envelope<Vec<BuiltinToolProvider>>;
