use serde_json::json;
use tracing::{debug, info};

use super::DispatchError;
use crate::engine::EngineAdapter;
use crate::protocol::IndexFilesParams;

/// Handle an `index_files` request.
///
/// Each path is read in full and forwarded to the engine. A failing file is
/// recorded and the batch continues; `success_count + error_count == total`
/// always holds.
pub async fn handle(
    params: IndexFilesParams,
    adapter: &EngineAdapter,
) -> Result<serde_json::Value, DispatchError> {
    let engine = adapter.ensure_ready().await?;

    let total = params.file_paths.len();
    info!(files = total, "indexing files");

    let mut success_count = 0usize;
    let mut errors: Vec<String> = Vec::new();

    for file_path in &params.file_paths {
        let content = match tokio::fs::read_to_string(file_path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                errors.push(format!("File not found: {file_path}"));
                continue;
            }
            Err(e) => {
                errors.push(format!("Error indexing {file_path}: {e}"));
                continue;
            }
        };

        match engine.insert(&content).await {
            Ok(()) => {
                success_count += 1;
                debug!(path = %file_path, "indexed");
            }
            Err(e) => errors.push(format!("Error indexing {file_path}: {e}")),
        }
    }

    info!(success = success_count, total, "indexing complete");

    Ok(json!({
        "success_count": success_count,
        "error_count": errors.len(),
        "errors": errors,
        "total": total,
    }))
}
