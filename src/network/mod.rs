//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - Worker thread pool for connections
//! - Requests routed through RecordStore

mod client;
mod connection;
mod pool;
mod server;

pub use client::Client;
pub use connection::{execute_request, Connection};
pub use pool::WorkerPool;
pub use server::{Server, ShutdownHandle};
