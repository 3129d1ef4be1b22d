//! TCP Server
//!
//! Accepts connections and dispatches to worker threads.

use std::io::{BufWriter, ErrorKind};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::{Connection, WorkerPool};
use crate::config::Config;
use crate::error::{Result, RosterError};
use crate::protocol::{write_response, Response};
use crate::store::RecordStore;

/// How long the accept loop sleeps when no connection is pending
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// TCP server for RosterDB
///
/// The listener is non-blocking so the accept loop can observe shutdown.
/// Connections above `max_connections` get a single `Error` response and
/// are closed.
pub struct Server {
    config: Config,
    store: Arc<RecordStore>,
    listener: TcpListener,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<AtomicBool>,
}

/// Signals a running server to stop accepting connections
#[derive(Debug, Clone)]
pub struct ShutdownHandle(Arc<AtomicBool>);

impl ShutdownHandle {
    /// Ask the accept loop to exit
    pub fn shutdown(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl Server {
    /// Bind the configured listen address
    pub fn bind(config: Config, store: Arc<RecordStore>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr).map_err(|e| {
            RosterError::Network(format!("cannot bind {}: {}", config.listen_addr, e))
        })?;
        listener.set_nonblocking(true)?;

        Ok(Self {
            config,
            store,
            listener,
            active_connections: Arc::new(AtomicUsize::new(0)),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle for stopping the server from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.shutdown))
    }

    /// Start the server (blocking)
    ///
    /// Returns after shutdown once every in-flight connection has finished.
    pub fn run(self) -> Result<()> {
        let pool = WorkerPool::new(self.config.worker_threads)?;
        tracing::info!(
            "Listening on {} with {} workers",
            self.local_addr()?,
            pool.size()
        );

        while !self.shutdown.load(Ordering::Relaxed) {
            match self.listener.accept() {
                Ok((stream, addr)) => {
                    if let Err(e) = self.dispatch(&pool, stream) {
                        tracing::warn!("Failed to dispatch connection from {}: {}", addr, e);
                    }
                }
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => {
                    tracing::warn!("Accept failed: {}", e);
                }
            }
        }

        tracing::info!("Shutting down, waiting for open connections");
        drop(pool);
        Ok(())
    }

    /// Hand an accepted stream to the worker pool
    fn dispatch(&self, pool: &WorkerPool, stream: TcpStream) -> Result<()> {
        stream.set_nonblocking(false)?;

        let active = self.active_connections.fetch_add(1, Ordering::SeqCst);
        let guard = ConnectionSlot(Arc::clone(&self.active_connections));

        if active >= self.config.max_connections {
            tracing::warn!(
                "Refusing connection: {} connections open (max {})",
                active,
                self.config.max_connections
            );
            let mut writer = BufWriter::new(stream);
            write_response(&mut writer, &Response::error("too many connections"))?;
            return Ok(());
        }

        let store = Arc::clone(&self.store);
        let (read_ms, write_ms) = (self.config.read_timeout_ms, self.config.write_timeout_ms);

        pool.spawn(move || {
            let _slot = guard;
            let result = Connection::new(stream, store).and_then(|mut conn| {
                conn.set_timeouts(read_ms, write_ms)?;
                conn.handle()
            });
            if let Err(e) = result {
                tracing::warn!("Connection ended with error: {}", e);
            }
        })
    }
}

/// Releases a connection slot when dropped
struct ConnectionSlot(Arc<AtomicUsize>);

impl Drop for ConnectionSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
