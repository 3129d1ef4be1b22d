//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (V1 - JSON Lines)
//!
//! Every message is one JSON object terminated by `\n`, in both directions.
//! A connection carries any number of request/response pairs in order.
//!
//! ### Requests
//! ```text
//! {"op":"list_active"}
//! {"op":"get","id":1}
//! {"op":"hired_between","start":"01/01/2020","end":"12/31/2020"}
//! {"op":"insert","employee":{...}}
//! {"op":"deactivate","id":1}
//! {"op":"ping"}
//! ```
//!
//! ### Response Format
//! ```text
//! {"status":"Ok","body":<json>}
//! ```
//!
//! ### Status Codes
//! - Ok:         body carries the result
//! - NotFound:   id not in the collection
//! - BadRequest: malformed request or duplicate id, body is a message
//! - Error:      server-side failure, body is a message

mod codec;
mod command;
mod response;

pub use codec::{
    decode_request, decode_response, encode_request, encode_response, read_request,
    read_response, write_request, write_response, MAX_LINE_SIZE,
};
pub use command::Request;
pub use response::{Response, Status};
