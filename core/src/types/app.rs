use serde::{Deserialize, Serialize};

use super::Envelope;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugAppRequest {
    pub query: String,
}

/// The app's answer to a debug query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugAppData {
    #[serde(default)]
    pub content: String,
}

pub type DebugAppResponse = Envelope<DebugAppData>;
