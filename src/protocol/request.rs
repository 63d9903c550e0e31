use serde::{Deserialize, Serialize};

use crate::engine::QueryMode;

/// JSON-RPC 2.0 ID, either a number or a string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<RpcId>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// Parameters for `index_files`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexFilesParams {
    pub file_paths: Vec<String>,
}

/// Parameters for `insert_text`. `metadata` is accepted for forward
/// compatibility and currently unused.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsertTextParams {
    pub text: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Parameters for `search_code`.
///
/// Integer fields accept i64 so that zero and negative values are rejected
/// with a clear message in the handler instead of a serde range error.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchCodeParams {
    pub query: String,
    #[serde(default)]
    pub mode: QueryMode,
    #[serde(default = "default_top_k")]
    pub top_k: i64,
    #[serde(default)]
    pub only_context: bool,
    #[serde(default = "default_response_type")]
    pub response_type: String,
    #[serde(default = "default_token_budget")]
    pub max_token_for_text_unit: i64,
    #[serde(default = "default_token_budget")]
    pub max_token_for_global_context: i64,
    #[serde(default = "default_token_budget")]
    pub max_token_for_local_context: i64,
    #[serde(default)]
    pub hl_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub ll_keywords: Option<Vec<String>>,
}

/// Parameters for `get_entity`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetEntityParams {
    pub entity_name: String,
}

/// Parameters for `get_relationships`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetRelationshipsParams {
    pub entity_name: String,
    #[serde(default)]
    pub relation_type: Option<String>,
    #[serde(default = "default_depth")]
    pub depth: i64,
}

/// Parameters for `visualize_subgraph`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisualizeSubgraphParams {
    pub query: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_max_nodes")]
    pub max_nodes: i64,
}

fn default_top_k() -> i64 {
    10
}

fn default_response_type() -> String {
    "Multiple Paragraphs".to_string()
}

fn default_token_budget() -> i64 {
    4000
}

fn default_depth() -> i64 {
    1
}

fn default_format() -> String {
    "mermaid".to_string()
}

fn default_max_nodes() -> i64 {
    20
}
