use serde_json::json;
use tracing::info;

use super::DispatchError;
use crate::engine::{EngineAdapter, QueryOptions};
use crate::protocol::SearchCodeParams;

/// Handle a `search_code` request.
///
/// Engine failures propagate as application errors: a failed search has no
/// partial-success shape to degrade into, unlike `insert_text`.
pub async fn handle(
    params: SearchCodeParams,
    adapter: &EngineAdapter,
) -> Result<serde_json::Value, DispatchError> {
    const METHOD: &str = "search_code";

    let top_k = super::positive(METHOD, "top_k", params.top_k)?;
    let max_token_for_text_unit =
        super::positive(METHOD, "max_token_for_text_unit", params.max_token_for_text_unit)?;
    let max_token_for_global_context = super::positive(
        METHOD,
        "max_token_for_global_context",
        params.max_token_for_global_context,
    )?;
    let max_token_for_local_context = super::positive(
        METHOD,
        "max_token_for_local_context",
        params.max_token_for_local_context,
    )?;

    info!(query = %params.query, mode = params.mode.as_str(), top_k, "searching");
    if let Some(kw) = &params.hl_keywords {
        info!(keywords = ?kw, "high-level keyword filter");
    }
    if let Some(kw) = &params.ll_keywords {
        info!(keywords = ?kw, "low-level keyword filter");
    }

    let options = QueryOptions {
        mode: params.mode,
        only_need_context: params.only_context,
        top_k,
        response_type: params.response_type.clone(),
        max_token_for_text_unit,
        max_token_for_global_context,
        max_token_for_local_context,
        hl_keywords: params.hl_keywords.clone().unwrap_or_default(),
        ll_keywords: params.ll_keywords.clone().unwrap_or_default(),
    };

    let engine = adapter.ensure_ready().await?;
    let answer = engine.query(&params.query, &options).await?;

    Ok(json!({
        "answer": answer,
        "query": params.query,
        "mode": params.mode,
        "top_k": top_k,
    }))
}
