//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, RosterError};
use crate::protocol::{read_request, write_response, Request, Response};
use crate::store::RecordStore;

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Reference to the record store
    store: Arc<RecordStore>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O
    pub fn new(stream: TcpStream, store: Arc<RecordStore>) -> Result<Self> {
        // Get peer address for logging before the stream is split
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm, responses are small
        stream.set_nodelay(true)?;

        // Separate handles for buffered read and write
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            store,
            peer_addr,
        })
    }

    /// Configure connection timeouts. Zero leaves a direction unbounded.
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        if read_ms > 0 {
            self.reader
                .get_ref()
                .set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            self.writer
                .get_ref()
                .set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }
        Ok(())
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads requests in a loop and sends responses.
    /// Returns when the client disconnects, goes idle past the read timeout,
    /// or an I/O error occurs.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        loop {
            // Read next request
            let request = match read_request(&mut self.reader) {
                Ok(request) => request,
                Err(RosterError::Io(ref e)) if is_disconnect(e.kind()) => {
                    // Client went away, not a server error
                    tracing::debug!("Client {} disconnected ({:?})", self.peer_addr, e.kind());
                    return Ok(());
                }
                Err(RosterError::Io(ref e))
                    if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
                {
                    // WouldBlock on unix, TimedOut on windows
                    tracing::debug!("Read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(RosterError::Protocol(msg)) => {
                    // Line already consumed, keep serving this client
                    tracing::debug!("Bad request from {}: {}", self.peer_addr, msg);
                    self.send_response(Response::bad_request(&msg))?;
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    // Send error response if possible
                    let _ = self.send_response(Response::error(&e.to_string()));
                    return Err(e);
                }
            };

            tracing::trace!("Received {} from {}", request.op(), self.peer_addr);

            // Execute request
            let response = execute_request(&self.store, request);

            // Send response
            if let Err(e) = self.send_response(response) {
                // A client that disconnected before the reply is not a server error
                if let RosterError::Io(ref io_err) = e {
                    if is_disconnect(io_err.kind()) {
                        tracing::debug!(
                            "Client {} disconnected before response could be sent: {}",
                            self.peer_addr,
                            e
                        );
                        return Ok(());
                    }
                }
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                return Err(e);
            }
        }
    }

    /// Send a response to the client
    fn send_response(&mut self, response: Response) -> Result<()> {
        write_response(&mut self.writer, &response)
    }
}

/// Run one request against the store and map the outcome to a response
///
/// - absent id → `NotFound`
/// - duplicate id → `BadRequest`
/// - anything else failing → `Error`
pub fn execute_request(store: &RecordStore, request: Request) -> Response {
    let result = match request {
        Request::ListActive => Response::ok_json(&store.list_active_sorted()),
        Request::Get { id } => match store.get_with_reports(id) {
            Some(view) => Response::ok_json(&view),
            None => Ok(Response::not_found()),
        },
        Request::HiredBetween { start, end } => {
            Response::ok_json(&store.list_by_hire_range(start, end))
        }
        Request::Insert { employee } => store
            .insert(employee)
            .and_then(|stored| Response::ok_json(&stored)),
        Request::Deactivate { id } => match store.deactivate(id) {
            Ok(Some(updated)) => Response::ok_json(&updated),
            Ok(None) => Ok(Response::not_found()),
            Err(e) => Err(e),
        },
        Request::Ping => Ok(Response::ok(serde_json::Value::String("PONG".to_string()))),
    };

    match result {
        Ok(response) => response,
        Err(RosterError::DuplicateId(_)) => Response::bad_request("Employee ID already exists"),
        Err(e) => Response::error(&format!("Error processing request: {}", e)),
    }
}

/// Error kinds meaning the peer closed or dropped the connection
fn is_disconnect(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::UnexpectedEof
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
    )
}
