use serde_json::json;
use tracing::info;

use super::DispatchError;
use crate::engine::{EngineAdapter, QueryMode, QueryOptions};
use crate::protocol::GetRelationshipsParams;

/// Handle a `get_relationships` request: probe the index with a question
/// parameterized by relation type and depth, local mode.
pub async fn handle(
    params: GetRelationshipsParams,
    adapter: &EngineAdapter,
) -> Result<serde_json::Value, DispatchError> {
    let depth = super::positive("get_relationships", "depth", params.depth)?;

    info!(
        entity = %params.entity_name,
        relation_type = ?params.relation_type,
        depth,
        "getting relationships"
    );

    let probe = match &params.relation_type {
        Some(relation_type) => format!(
            "What {relation_type} relationships does '{}' have? Show dependencies up to depth {depth}.",
            params.entity_name
        ),
        None => format!(
            "What are all the relationships for '{}'? Include calls, inheritance, and dependencies up to depth {depth}.",
            params.entity_name
        ),
    };
    let options = QueryOptions {
        mode: QueryMode::Local,
        top_k: 20,
        ..QueryOptions::default()
    };

    let engine = adapter.ensure_ready().await?;
    let relationships = engine.query(&probe, &options).await?;

    Ok(json!({
        "entity_name": params.entity_name,
        "relation_type": params.relation_type.as_deref().unwrap_or("all"),
        "depth": depth,
        "relationships": relationships,
    }))
}
