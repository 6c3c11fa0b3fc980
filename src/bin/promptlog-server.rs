// ABOUTME: Promptlog viewer server binary
// ABOUTME: Loads configuration, opens the existing log database and serves the viewer over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Promptlog Server Binary
//!
//! Serves the searchable listing of an existing LLM log database.
//!
//! ```bash
//! promptlog-server --database ~/.local/share/llm/logs.db
//! PROMPTLOG_DATABASE=logs.db HTTP_PORT=9000 promptlog-server
//! ```

use anyhow::Result;
use clap::Parser;
use promptlog::{
    config::{ConfigOverrides, ServerConfig},
    database::RecordStore,
    logging,
    resources::ServerResources,
    server,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "promptlog-server")]
#[command(about = "Promptlog - searchable web viewer for a local LLM prompt/response log")]
pub struct Args {
    /// Log database path or sqlite: URL (overrides PROMPTLOG_DATABASE / DATABASE_URL)
    #[arg(short, long)]
    database: Option<String>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let config = ServerConfig::load(&ConfigOverrides {
        database: args.database,
        host: args.host,
        http_port: args.http_port,
    })?;

    info!("Starting Promptlog viewer");
    info!("{}", config.summary());

    let store = RecordStore::connect(&config.database).await?;
    info!("Log database opened: {}", config.database);

    let resources = Arc::new(ServerResources::new(store, config));
    display_available_endpoints(&resources.config);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Display the endpoints this server answers
fn display_available_endpoints(config: &ServerConfig) {
    let address = config.bind_address();
    info!("=== Available Endpoints ===");
    info!("   Viewer:        GET  http://{address}/?q=");
    info!("   Delete:        POST http://{address}/");
    info!("   Health:        GET  http://{address}/health");
    info!("   Readiness:     GET  http://{address}/ready");
    info!("=== End of Endpoint List ===");
}
