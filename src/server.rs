use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

use crate::engine::EngineAdapter;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Maximum bytes per JSON-RPC frame (1 MiB).
const MAX_FRAME_BYTES: usize = 1024 * 1024;

/// Bridge server speaking newline-delimited JSON-RPC 2.0 over stdio.
pub struct BridgeServer {
    adapter: EngineAdapter,
}

impl BridgeServer {
    pub fn new(adapter: EngineAdapter) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &EngineAdapter {
        &self.adapter
    }

    /// Serve requests from stdin, responses to stdout, until end of stream.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        info!("bridge ready, listening on stdin");
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();
        self.serve(BufReader::new(stdin), stdout).await
    }

    /// Transport loop over arbitrary streams.
    ///
    /// One frame in, one frame out, flushed before the next read; blank lines
    /// are skipped without a response; end of stream terminates cleanly.
    /// Stream failures propagate and end the process.
    pub async fn serve<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let n = reader.read_until(b'\n', &mut raw).await?;
            if n == 0 {
                info!("end of stream, shutting down");
                break;
            }

            if n > MAX_FRAME_BYTES {
                warn!(bytes = n, "frame too large");
                write_response(
                    &mut writer,
                    &JsonRpcResponse::error(None, JsonRpcError::parse_error()),
                )
                .await?;
                continue;
            }

            let trimmed = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(e) => {
                    error!(error = %e, "frame is not valid UTF-8");
                    write_response(
                        &mut writer,
                        &JsonRpcResponse::error(None, JsonRpcError::parse_error_with(e.to_string())),
                    )
                    .await?;
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    error!(error = %e, "invalid frame");
                    write_response(
                        &mut writer,
                        &JsonRpcResponse::error(None, JsonRpcError::parse_error_with(e.to_string())),
                    )
                    .await?;
                    continue;
                }
            };

            let resp = handlers::dispatch(&req, &self.adapter).await;
            write_response(&mut writer, &resp).await?;
        }

        Ok(())
    }
}

async fn write_response<W>(
    writer: &mut W,
    resp: &JsonRpcResponse,
) -> Result<(), Box<dyn std::error::Error>>
where
    W: AsyncWrite + Unpin,
{
    let out = serde_json::to_string(resp)?;
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
