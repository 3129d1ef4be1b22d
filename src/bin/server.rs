//! RosterDB Server Binary
//!
//! Loads the snapshot and starts the TCP server.

use std::sync::Arc;

use clap::Parser;
use rosterdb::config::SnapshotSync;
use rosterdb::network::Server;
use rosterdb::{Config, RecordStore};
use tracing_subscriber::{fmt, EnvFilter};

/// RosterDB Server
#[derive(Parser, Debug)]
#[command(name = "rosterdb-server")]
#[command(about = "Concurrent employee record store")]
#[command(version)]
struct Args {
    /// Snapshot file holding the employee collection
    #[arg(short, long, default_value = "./data.json")]
    snapshot: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Worker threads serving connections
    #[arg(short, long, default_value = "4")]
    workers: usize,

    /// Maximum concurrent connections
    #[arg(short, long, default_value = "1024")]
    max_connections: usize,

    /// Start empty if the snapshot file does not exist
    #[arg(long)]
    create: bool,

    /// Skip fsync on snapshot rewrites
    #[arg(long)]
    no_fsync: bool,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rosterdb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("RosterDB Server v{}", rosterdb::VERSION);
    tracing::info!("Snapshot file: {}", args.snapshot);
    tracing::info!("Listen address: {}", args.listen);

    let sync = if args.no_fsync {
        SnapshotSync::OsBuffered
    } else {
        SnapshotSync::EveryWrite
    };

    let config = Config::builder()
        .snapshot_path(&args.snapshot)
        .snapshot_sync(sync)
        .create_if_missing(args.create)
        .listen_addr(&args.listen)
        .worker_threads(args.workers)
        .max_connections(args.max_connections)
        .build();

    // A store that cannot load its snapshot must not serve traffic
    let store = match RecordStore::open(config.clone()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Failed to open record store: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Record store initialized with {} employees", store.len());

    let server = match Server::bind(config, store) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
