use serde_json::json;
use tracing::info;

use super::DispatchError;
use crate::engine::{EngineAdapter, QueryMode, QueryOptions};
use crate::protocol::GetEntityParams;

/// Handle a `get_entity` request: probe the index with a natural-language
/// question about the entity, local mode, context only.
pub async fn handle(
    params: GetEntityParams,
    adapter: &EngineAdapter,
) -> Result<serde_json::Value, DispatchError> {
    info!(entity = %params.entity_name, "getting entity");

    let probe = format!(
        "Describe the entity '{}' in detail. Include its purpose, methods, and usage.",
        params.entity_name
    );
    let options = QueryOptions {
        mode: QueryMode::Local,
        only_need_context: true,
        top_k: 10,
        ..QueryOptions::default()
    };

    let engine = adapter.ensure_ready().await?;
    let description = engine.query(&probe, &options).await?;

    Ok(json!({
        "entity_name": params.entity_name,
        "description": description,
        "search_mode": "local",
    }))
}
