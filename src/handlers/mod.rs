pub mod get_entity;
pub mod get_relationships;
pub mod index_files;
pub mod indexing_status;
pub mod insert_text;
pub mod search_code;
pub mod visualize_subgraph;

use serde::de::DeserializeOwned;
use tracing::error;

use crate::engine::{EngineAdapter, EngineError};
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Failure raised between a successful parse and a completed handler.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown method: {0}")]
    UnknownMethod(String),
    #[error("Invalid params for {method}: {detail}")]
    InvalidParams { method: String, detail: String },
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl DispatchError {
    pub fn invalid_params(method: &str, detail: impl Into<String>) -> Self {
        Self::InvalidParams {
            method: method.to_string(),
            detail: detail.into(),
        }
    }

    /// Coarse category label for the error `data` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownMethod(_) => "unknown_method",
            Self::InvalidParams { .. } => "invalid_params",
            Self::Engine(e) => e.kind(),
        }
    }
}

impl From<DispatchError> for JsonRpcError {
    fn from(err: DispatchError) -> Self {
        JsonRpcError::application(err.to_string(), err.kind())
    }
}

/// Dispatch one parsed request to its handler and wrap the outcome in a
/// response envelope. Every request gets exactly one response; no handler
/// failure escapes this boundary.
pub async fn dispatch(req: &JsonRpcRequest, adapter: &EngineAdapter) -> JsonRpcResponse {
    if req.jsonrpc != "2.0" {
        return JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::application(
                format!("Unsupported protocol version: {}", req.jsonrpc),
                "invalid_request",
            ),
        );
    }

    match route(req, adapter).await {
        Ok(result) => JsonRpcResponse::success(req.id.clone(), result),
        Err(err) => {
            error!(method = %req.method, error = %err, "request failed");
            JsonRpcResponse::error(req.id.clone(), err.into())
        }
    }
}

async fn route(
    req: &JsonRpcRequest,
    adapter: &EngineAdapter,
) -> Result<serde_json::Value, DispatchError> {
    match req.method.as_str() {
        // Liveness probe; never touches the engine.
        "ping" => Ok(serde_json::Value::String("pong".into())),
        "index_files" => index_files::handle(bind(req)?, adapter).await,
        "insert_text" => insert_text::handle(bind(req)?, adapter).await,
        "search_code" => search_code::handle(bind(req)?, adapter).await,
        "get_entity" => get_entity::handle(bind(req)?, adapter).await,
        "get_relationships" => get_relationships::handle(bind(req)?, adapter).await,
        "visualize_subgraph" => visualize_subgraph::handle(bind(req)?, adapter).await,
        "get_indexing_status" => indexing_status::handle(adapter).await,
        other => Err(DispatchError::UnknownMethod(other.to_string())),
    }
}

/// Bind `params` to a handler's declared parameter struct. Omitted `params`
/// binds as the empty object; missing required or unexpected extra keys fail.
fn bind<T: DeserializeOwned>(req: &JsonRpcRequest) -> Result<T, DispatchError> {
    let value = req
        .params
        .clone()
        .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));
    serde_json::from_value(value)
        .map_err(|e| DispatchError::invalid_params(&req.method, e.to_string()))
}

/// Validate a parameter that must be a positive integer.
pub(crate) fn positive(method: &str, name: &str, value: i64) -> Result<usize, DispatchError> {
    if value <= 0 {
        return Err(DispatchError::invalid_params(
            method,
            format!("{name} must be a positive integer, got {value}"),
        ));
    }
    Ok(value as usize)
}
