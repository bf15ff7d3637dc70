//! JSON-lines transport for the contact tools.
//!
//! One request per line, one response per line:
//!
//! ```text
//! {"method":"list"}
//! {"method":"call","tool":"contact_get_by_id","input":{"contactId":1}}
//! ```
//!
//! Replies are `{"ok":true,"result":...}` or `{"ok":false,"error":{"code":...}}`.
//! A malformed line gets an `invalid_request` reply and the loop keeps reading.

use crate::tools::{ContactTools, ToolError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ToolRequest {
    List,
    Call {
        tool: String,
        #[serde(default)]
        input: Value,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ToolReply {
    Ok { ok: bool, result: Value },
    Err { ok: bool, error: ToolError },
}

impl ToolReply {
    fn from_result(r: Result<Value, ToolError>) -> Self {
        match r {
            Ok(result) => ToolReply::Ok { ok: true, result },
            Err(error) => ToolReply::Err { ok: false, error },
        }
    }
}

/// Handle one request line.
pub async fn handle_line(tools: &ContactTools, line: &str) -> ToolReply {
    let request: ToolRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => return ToolReply::from_result(Err(ToolError::invalid_request(e.to_string()))),
    };
    let result = match request {
        ToolRequest::List => serde_json::to_value(ContactTools::descriptors())
            .map_err(|e| ToolError::invalid_request(e.to_string())),
        ToolRequest::Call { tool, input } => tools.call(&tool, input).await,
    };
    if let Err(e) = &result {
        tracing::info!(code = %e.code, "tool call failed");
    }
    ToolReply::from_result(result)
}

/// Serve requests from `reader` until EOF, writing replies to `writer`.
pub async fn serve<R, W>(tools: &ContactTools, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = handle_line(tools, &line).await;
        let mut out = serde_json::to_vec(&reply)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
    }
    Ok(())
}
