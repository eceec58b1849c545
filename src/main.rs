//! Member groups API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ http::server ──▶ api::handlers ──▶ groups::repository
//!                    (request id,                        │            │
//!                     trace, limits)                     ▼            ▼
//!                                               identity::RoleStore  groups::MemberGroupService
//!                                                        │            │
//!     Client Response                                    └─────┬──────┘
//!     ◀───────────── http::response ◀── display::mapper ◀──────┘
//!
//!     config file ──▶ config::watcher ──▶ text catalog swap
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use member_groups::config::{load_config, watcher::ConfigWatcher, ServiceConfig};
use member_groups::http::HttpServer;
use member_groups::lifecycle::{build_state, signals, Shutdown};
use member_groups::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "member-groups")]
#[command(about = "HTTP API for member groups", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long, env = "MEMBER_GROUPS_CONFIG")]
    config: Option<PathBuf>,

    /// Reload localization texts when the config file changes.
    #[arg(long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("member-groups v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_path = %config.http.base_path,
        request_timeout_secs = config.timeouts.request_secs,
        seed_groups = config.seed.groups.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let state = build_state(&config).await?;

    // The watcher stops when dropped, so it lives until main returns.
    let (config_updates, _watcher) = match (&args.config, args.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path, config.clone());
            (updates, Some(watcher.run()?))
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::forward_signals(&signal_shutdown).await;
    });

    let server = HttpServer::new(config, state);
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
