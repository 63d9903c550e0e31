use serde::Serialize;

use super::request::RpcId;

/// JSON-RPC 2.0 response envelope. Exactly one of `result`/`error` is set;
/// `id` is always serialized, as `null` when the request could not be parsed.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<RpcId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RpcId>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<RpcId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC 2.0 error object.
///
/// The bridge distinguishes two classes: parse errors (`-32700`, the frame
/// never became a request) and application errors (`-32603`, everything after
/// a successful parse). `data` carries a coarse category label for
/// diagnostics, never an internal trace.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub fn parse_error() -> Self {
        Self {
            code: -32700,
            message: "Parse error".into(),
            data: None,
        }
    }

    pub fn parse_error_with(detail: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: "Parse error".into(),
            data: Some(serde_json::Value::String(detail.into())),
        }
    }

    pub fn application(message: impl Into<String>, kind: &str) -> Self {
        Self {
            code: -32603,
            message: message.into(),
            data: Some(serde_json::json!({ "type": kind })),
        }
    }
}
