use serde_json::json;
use tracing::{error, info};

use super::DispatchError;
use crate::engine::EngineAdapter;
use crate::protocol::InsertTextParams;

/// Handle an `insert_text` request.
///
/// Failures, readiness included, fold into `{success: false}`; this method
/// never produces an error envelope.
pub async fn handle(
    params: InsertTextParams,
    adapter: &EngineAdapter,
) -> Result<serde_json::Value, DispatchError> {
    let chars = params.text.chars().count();
    info!(chars, "inserting text content");

    let inserted = match adapter.ensure_ready().await {
        Ok(engine) => engine.insert(&params.text).await,
        Err(e) => Err(e),
    };

    Ok(match inserted {
        Ok(()) => json!({
            "success": true,
            "message": format!("Successfully inserted {chars} characters"),
        }),
        Err(e) => {
            let message = format!("Error inserting text: {e}");
            error!("{message}");
            json!({ "success": false, "message": message })
        }
    })
}
