use serde_json::json;
use tracing::info;

use super::DispatchError;
use crate::engine::{EngineAdapter, QueryMode, QueryOptions};
use crate::protocol::VisualizeSubgraphParams;

/// Handle a `visualize_subgraph` request.
///
/// Queries in hybrid mode with `top_k = max_nodes`, then renders a two-node
/// diagram. Presentation stub, not a graph renderer.
pub async fn handle(
    params: VisualizeSubgraphParams,
    adapter: &EngineAdapter,
) -> Result<serde_json::Value, DispatchError> {
    let max_nodes = super::positive("visualize_subgraph", "max_nodes", params.max_nodes)?;

    info!(query = %params.query, format = %params.format, max_nodes, "visualizing subgraph");

    let probe = format!("{}. List all entities and their relationships.", params.query);
    let options = QueryOptions {
        mode: QueryMode::Hybrid,
        top_k: max_nodes,
        ..QueryOptions::default()
    };

    let engine = adapter.ensure_ready().await?;
    let result = engine.query(&probe, &options).await?;

    let truncated: String = result.chars().take(100).collect();
    let diagram = format!(
        "graph TD\n    Query[\"{}\"]\n    Result[\"{truncated}...\"]\n    Query --> Result\n",
        params.query
    );

    Ok(json!({
        "query": params.query,
        "format": params.format,
        "diagram": diagram,
        "max_nodes": max_nodes,
    }))
}
