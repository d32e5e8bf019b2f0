// ABOUTME: stdio transport: newline-delimited JSON-RPC frames over stdin/stdout
// ABOUTME: stdout carries protocol frames only; all logging goes to stderr
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use super::protocol::{McpRequest, McpResponse, ProtocolHandler};
use super::resources::ServerResources;
use crate::constants::jsonrpc_errors;
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Run the MCP server over stdin/stdout until stdin closes
///
/// # Errors
///
/// Returns an error when stdin or stdout fails.
pub async fn run_stdio_server(resources: Arc<ServerResources>) -> Result<()> {
    info!("stdio transport ready");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => ProtocolHandler::handle_request(request, &resources).await,
            Err(e) => {
                warn!(error = %e, "unparseable frame on stdin");
                Some(McpResponse::error(
                    Some(Value::Null),
                    jsonrpc_errors::ERROR_PARSE,
                    format!("Parse error: {e}"),
                ))
            }
        };

        if let Some(response) = response {
            let frame = serde_json::to_string(&response)?;
            stdout.write_all(frame.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    debug!("stdin closed, shutting down");
    Ok(())
}
