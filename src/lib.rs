//! # RosterDB
//!
//! A concurrent employee record store with:
//! - One authoritative in-memory collection, loaded once at startup
//! - A whole-collection JSON snapshot rewritten on every mutation
//! - Single-writer/multi-reader concurrency model
//! - TCP-based client protocol
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │                  (Multiple Clients)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    RecordStore                               │
//! │            (Single Writer / Multi Reader)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Collection  │          │  Snapshot   │
//!   │  (RwLock)   │          │ (JSON file) │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! Writes stage a copy of the collection, save it to the snapshot, and only
//! then make it visible to readers.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod collection;
pub mod snapshot;
pub mod network;
pub mod protocol;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, RosterError};
pub use config::Config;
pub use model::{Employee, EmployeeId, EmployeeWithReports};
pub use store::RecordStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of RosterDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
