//! Error types for RosterDB
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::model::EmployeeId;

/// Result type alias using RosterError
pub type Result<T> = std::result::Result<T, RosterError>;

/// Unified error type for RosterDB operations
///
/// A missing employee is not an error: lookups and deactivation return
/// `Option::None` for absent ids.
#[derive(Debug, Error)]
pub enum RosterError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Employee ID already exists: {0}")]
    DuplicateId(EmployeeId),

    #[error("Bootstrap failed: {0}")]
    Bootstrap(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid date '{0}': expected MM/dd/yyyy")]
    InvalidDate(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Server error: {0}")]
    Remote(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for RosterError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports underlying read/write failures as io errors
        if e.is_io() {
            return RosterError::Io(e.into());
        }
        RosterError::Serialization(e.to_string())
    }
}
