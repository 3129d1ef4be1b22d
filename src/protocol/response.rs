//! Response definitions
//!
//! Represents responses to clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Ok,
    NotFound,
    BadRequest,
    Error,
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Result for `Ok`, message for `BadRequest`/`Error`, null otherwise
    #[serde(default)]
    pub body: Value,
}

impl Response {
    /// Create an OK response carrying `body`
    pub fn ok(body: Value) -> Self {
        Self {
            status: Status::Ok,
            body,
        }
    }

    /// Create an OK response by serializing `value`
    pub fn ok_json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::ok(serde_json::to_value(value)?))
    }

    /// Create a NOT_FOUND response
    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            body: Value::Null,
        }
    }

    /// Create a BAD_REQUEST response
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: Status::BadRequest,
            body: Value::String(message.to_string()),
        }
    }

    /// Create an ERROR response
    pub fn error(message: &str) -> Self {
        Self {
            status: Status::Error,
            body: Value::String(message.to_string()),
        }
    }

    /// The body as a message string, if it is one
    pub fn message(&self) -> Option<&str> {
        self.body.as_str()
    }
}
