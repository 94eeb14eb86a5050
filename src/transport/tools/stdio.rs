//! Line-delimited JSON loop serving tool calls.
//!
//! Each input line is a request object:
//!
//! ```json
//! {"id": 1, "tool": "start_sprint", "arguments": {"sprint_id": "..."}}
//! ```
//!
//! and produces exactly one output line, either `{"id": 1, "ok": <result>}` or
//! `{"id": 1, "error": {"kind": "conflict", "message": "..."}}`. The `id` is
//! optional and echoed back unchanged. Blank lines are ignored.

use super::{
    error::{ToolError, ToolErrorKind},
    registry::ToolRegistry,
};
use crate::tracker::ports::TrackerStore;
use mockable::Clock;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct ToolCall {
    #[serde(default)]
    id: Option<Value>,
    tool: String,
    #[serde(default)]
    arguments: Value,
}

fn reply(request_id: Option<Value>, outcome: Result<Value, ToolError>) -> Value {
    let mut body = Map::new();
    if let Some(id) = request_id {
        body.insert("id".to_owned(), id);
    }
    match outcome {
        Ok(result) => {
            body.insert("ok".to_owned(), result);
        }
        Err(err) => {
            let rendered = serde_json::to_value(&err).unwrap_or_else(|_| {
                serde_json::json!({ "kind": "internal", "message": err.message() })
            });
            body.insert("error".to_owned(), rendered);
        }
    }
    Value::Object(body)
}

async fn handle_line<S, C>(registry: &ToolRegistry<S, C>, line: &str) -> Value
where
    S: TrackerStore,
    C: Clock + Send + Sync + 'static,
{
    match serde_json::from_str::<ToolCall>(line) {
        Ok(call) => {
            let outcome = registry.call(&call.tool, call.arguments).await;
            reply(call.id, outcome)
        }
        Err(err) => reply(
            None,
            Err(ToolError::new(
                ToolErrorKind::InvalidArgument,
                format!("malformed tool call: {err}"),
            )),
        ),
    }
}

/// Serves tool calls read from `input` until it reaches end of file.
///
/// # Errors
///
/// Returns an I/O error when reading `input` or writing `output` fails.
/// Failed tool calls are reported on `output` and do not end the loop.
pub async fn serve_lines<S, C, R, W>(
    registry: &ToolRegistry<S, C>,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    S: TrackerStore,
    C: Clock + Send + Sync + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("serving tool calls");
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let response = handle_line(registry, trimmed).await;
        let mut encoded = response.to_string();
        encoded.push('\n');
        output.write_all(encoded.as_bytes()).await?;
        output.flush().await?;
    }
    debug!("tool input closed");
    Ok(())
}
