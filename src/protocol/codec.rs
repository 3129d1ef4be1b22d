//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────┬──────┐
//! │        JSON object (UTF-8)          │ '\n' │
//! └─────────────────────────────────────┴──────┘
//! ```
//!
//! Blank lines between messages are skipped. A line that fails to decode is
//! consumed whole, so the stream stays aligned for the next message. This
//! includes lines over `MAX_LINE_SIZE`, which are discarded up to their
//! newline.

use std::io::{BufRead, ErrorKind, Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Request, Response};
use crate::error::{Result, RosterError};

/// Maximum line size (16 MB)
pub const MAX_LINE_SIZE: usize = 16 * 1024 * 1024;

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a request as a single newline-terminated line
pub fn encode_request(request: &Request) -> Result<Vec<u8>> {
    encode_line(request)
}

/// Decode a request from one line (with or without the trailing newline)
pub fn decode_request(line: &[u8]) -> Result<Request> {
    decode_line(line, "request")
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response as a single newline-terminated line
pub fn encode_response(response: &Response) -> Result<Vec<u8>> {
    encode_line(response)
}

/// Decode a response from one line (with or without the trailing newline)
pub fn decode_response(line: &[u8]) -> Result<Response> {
    decode_line(line, "response")
}

// =============================================================================
// Stream Helpers
// =============================================================================

/// Read the next request from a stream.
///
/// Returns an `UnexpectedEof` IO error when the peer closed the stream
/// cleanly, and `Protocol` when the line is not a valid request.
pub fn read_request<R: BufRead>(reader: &mut R) -> Result<Request> {
    let line = read_line(reader)?;
    decode_request(&line)
}

/// Write a request to a stream and flush it
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    writer.write_all(&encode_request(request)?)?;
    writer.flush()?;
    Ok(())
}

/// Read the next response from a stream
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Response> {
    let line = read_line(reader)?;
    decode_response(&line)
}

/// Write a response to a stream and flush it
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(&encode_response(response)?)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Internals
// =============================================================================

fn encode_line<T: Serialize>(message: &T) -> Result<Vec<u8>> {
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    Ok(line)
}

fn decode_line<T: DeserializeOwned>(line: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(trim_newline(line))
        .map_err(|e| RosterError::Protocol(format!("invalid {}: {}", what, e)))
}

/// Read one non-blank line, without its terminator
fn read_line<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    loop {
        let mut line = Vec::new();
        let read = reader
            .by_ref()
            .take(MAX_LINE_SIZE as u64 + 1)
            .read_until(b'\n', &mut line)?;

        if read == 0 {
            return Err(std::io::Error::new(ErrorKind::UnexpectedEof, "stream closed").into());
        }
        if line.last() != Some(&b'\n') && line.len() > MAX_LINE_SIZE {
            // Drop the rest of the oversized line before reporting it
            skip_line(reader)?;
            return Err(RosterError::Protocol(format!(
                "Line too large: more than {} bytes",
                MAX_LINE_SIZE
            )));
        }

        let trimmed = trim_newline(&line);
        if trimmed.iter().all(u8::is_ascii_whitespace) {
            if line.last() != Some(&b'\n') {
                // whitespace then EOF
                return Err(std::io::Error::new(ErrorKind::UnexpectedEof, "stream closed").into());
            }
            continue;
        }

        let len = trimmed.len();
        line.truncate(len);
        return Ok(line);
    }
}

/// Discard input up to and including the next newline (or EOF)
fn skip_line<R: BufRead>(reader: &mut R) -> Result<()> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(());
        }
        match buf.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

fn trim_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
