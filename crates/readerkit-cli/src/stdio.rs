//! Stdio transport: newline-delimited JSON-RPC over stdin/stdout

use readerkit::rpc::{self, JsonRpcResponse};
use readerkit::Adapter;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Run the MCP server over stdio until stdin closes
pub async fn run_server(adapter: Adapter) -> std::io::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve_lines(&adapter, stdin, stdout).await
}

/// Answer each request line with one response line
///
/// Requests are dispatched concurrently, so responses are written in
/// completion order and a slow tool call never holds up later requests.
/// Notifications get no response; unparseable lines get a parse error.
/// Returns once stdin is closed and every in-flight request is answered.
pub async fn serve_lines<R, W>(adapter: &Adapter, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
    let mut tx = Some(tx);
    let mut lines = reader.lines();

    loop {
        tokio::select! {
            line = lines.next_line(), if tx.is_some() => match line? {
                Some(line) => {
                    if let Some(tx) = &tx {
                        handle_line(adapter, &line, tx);
                    }
                }
                // In-flight tasks keep their own senders
                None => tx = None,
            },
            Some(response) = rx.recv() => {
                write_response(&mut writer, &response).await?;
            }
            else => break,
        }
    }

    Ok(())
}

/// Parse one line and hand its response to the writer
fn handle_line(adapter: &Adapter, line: &str, tx: &mpsc::UnboundedSender<JsonRpcResponse>) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    match rpc::parse_request(line) {
        Ok(request) if request.is_notification() => {
            debug!(method = %request.method, "Skipping notification");
        }
        Ok(request) => {
            let adapter = adapter.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let response = adapter.dispatch(request).await;
                // Receiver is gone only if the writer failed
                let _ = tx.send(response);
            });
        }
        Err(response) => {
            let _ = tx.send(response);
        }
    }
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = match serde_json::to_string(response) {
        Ok(json) => json,
        Err(e) => {
            error!(error = %e, "Failed to serialize response");
            return Ok(());
        }
    };

    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
