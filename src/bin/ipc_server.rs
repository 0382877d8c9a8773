#![allow(missing_docs)]
//! IPC Server for the Storefront Chat Plugin
//!
//! Runs as a subprocess and answers line-delimited JSON-RPC requests over
//! stdin/stdout, so the storefront's web tier (or any other runtime) can use
//! the Rust responder without linking it.
//!
//! ## Usage
//!
//! ```bash
//! cargo build --features ipc --bin storefront-chat-ipc
//! RUST_LOG=debug ./storefront-chat-ipc
//! ```
//!
//! ## Protocol
//!
//! ### Example Request
//! ```json
//! {"id": 1, "method": "respond", "params": {"input": "I need a quiet keyboard", "conversationId": "abc"}}
//! ```
//!
//! ### Example Response
//! ```json
//! {"id": 1, "result": {"text": "Why do you need a quiet keyboard?"}}
//! ```
//!
//! Send `{"id": 2, "method": "endSession", "params": {"conversationId": "abc"}}`
//! when a conversation closes to release its state.

use anyhow::Context;
use elizaos_plugin_storefront_chat::interop::{handle_ipc_request, IpcRequest, IpcResponse};
use elizaos_plugin_storefront_chat::ResponderConfig;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ResponderConfig::from_env().context("loading responder config")?;
    let config_json = serde_json::to_string(&config)?;
    elizaos_plugin_storefront_chat::interop::init_plugin(&config_json)
        .context("initializing plugin")?;

    info!("Server started, waiting for requests...");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<IpcRequest>(&line) {
            Ok(request) => handle_ipc_request(&request),
            Err(e) => {
                warn!(error = %e, "Rejected malformed request");
                IpcResponse::error(0, &format!("Invalid JSON: {}", e))
            }
        };

        match serde_json::to_string(&response) {
            Ok(output) => {
                stdout.write_all(output.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
            Err(e) => error!(error = %e, "Error serializing response"),
        }
    }

    info!("Server shutting down");
    Ok(())
}
