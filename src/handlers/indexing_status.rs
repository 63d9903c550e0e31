use std::path::Path;

use serde_json::json;
use tracing::info;

use super::DispatchError;
use crate::engine::{EngineAdapter, EngineError};

/// Handle a `get_indexing_status` request: readiness, working-directory
/// footprint, and the selected storage backends.
pub async fn handle(adapter: &EngineAdapter) -> Result<serde_json::Value, DispatchError> {
    adapter.ensure_ready().await?;

    info!("getting indexing status");

    let working_dir = &adapter.config().working_dir;
    let size = dir_size(working_dir).map_err(EngineError::from)?;

    let backends = adapter
        .backends()
        .expect("backend selection runs during ensure_ready");

    Ok(json!({
        "initialized": adapter.initialized(),
        "working_dir": working_dir.display().to_string(),
        "working_dir_size_bytes": size,
        "storage_backends": {
            "vector": backends.vector.describe(),
            "graph": backends.graph.describe(),
        },
    }))
}

/// Total byte size of regular files under `root`, recursively. Symlinks are
/// not followed.
fn dir_size(root: &Path) -> Result<u64, std::io::Error> {
    if !root.is_dir() {
        return Ok(0);
    }

    let mut total = 0u64;
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            if file_type.is_symlink() {
                continue;
            }
            if file_type.is_dir() {
                stack.push(entry.path());
            } else if file_type.is_file() {
                total += entry.metadata()?.len();
            }
        }
    }
    Ok(total)
}
