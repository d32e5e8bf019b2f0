// ABOUTME: Server binary: parses CLI flags, loads config, and runs the selected transport
// ABOUTME: Exits before binding any socket when the Recruitee credentials are missing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use anyhow::Result;
use clap::{Parser, ValueEnum};
use recruitee_mcp_server::config::ServerConfig;
use recruitee_mcp_server::constants::{network, routes};
use recruitee_mcp_server::logging;
use recruitee_mcp_server::mcp::resources::ServerResources;
use recruitee_mcp_server::mcp::stdio_transport::run_stdio_server;
use recruitee_mcp_server::routes::{build_sse_router, build_streamable_http_router, serve};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// Newline-delimited JSON-RPC over stdin/stdout
    Stdio,
    /// HTTP POST per request
    StreamableHttp,
    /// Server-Sent Events with a session message endpoint
    Sse,
}

#[derive(Debug, Parser)]
#[command(
    name = "recruitee-mcp-server",
    about = "MCP server exposing Recruitee applicant-tracking data",
    version
)]
struct Args {
    /// Transport to run
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Bind address for the HTTP transports
    #[arg(long, default_value = network::DEFAULT_HOST)]
    host: String,

    /// Bind port for the HTTP transports
    #[arg(long, default_value_t = network::DEFAULT_PORT)]
    port: u16,

    /// Mount path for the MCP endpoint (default /mcp, or /sse for the SSE transport)
    #[arg(long)]
    path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    // missing credentials abort startup before any socket is bound
    let config = ServerConfig::from_env()?;
    info!(config = %config.summary(), "configuration loaded");

    match args.transport {
        Transport::Stdio => {
            let resources = Arc::new(ServerResources::new(config, routes::DEFAULT_MCP_PATH)?);
            run_stdio_server(resources).await
        }
        Transport::StreamableHttp => {
            let path = args
                .path
                .unwrap_or_else(|| routes::DEFAULT_MCP_PATH.to_string());
            let resources = Arc::new(ServerResources::new(config, path)?);
            info!(path = %resources.mcp_path, "starting streamable HTTP transport");
            let router = build_streamable_http_router(resources);
            serve(router, &args.host, args.port).await
        }
        Transport::Sse => {
            let path = args
                .path
                .unwrap_or_else(|| routes::DEFAULT_SSE_PATH.to_string());
            let resources = Arc::new(ServerResources::new(config, path.clone())?);
            info!(path = %path, "starting SSE transport");
            let router = build_sse_router(resources, &path);
            serve(router, &args.host, args.port).await
        }
    }
}
