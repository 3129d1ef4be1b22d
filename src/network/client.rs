//! TCP Client
//!
//! Typed calls against a running RosterDB server.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::error::{Result, RosterError};
use crate::model::{Employee, EmployeeId, EmployeeWithReports};
use crate::protocol::{read_response, write_request, Request, Response, Status};

/// A connection to a RosterDB server
///
/// One request is in flight at a time; each call waits for its response.
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to the server at `addr`
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        let read_stream = stream.try_clone()?;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Send a raw request and wait for its response
    pub fn call(&mut self, request: &Request) -> Result<Response> {
        write_request(&mut self.writer, request)?;
        read_response(&mut self.reader)
    }

    /// Health check
    pub fn ping(&mut self) -> Result<()> {
        self.expect_ok::<serde_json::Value>(&Request::Ping).map(|_| ())
    }

    /// Active employees sorted by surname
    pub fn list_active(&mut self) -> Result<Vec<Employee>> {
        self.expect_ok(&Request::ListActive)
    }

    /// One employee with direct report names, `None` if absent
    pub fn get(&mut self, id: EmployeeId) -> Result<Option<EmployeeWithReports>> {
        self.optional(&Request::Get { id })
    }

    /// Employees hired within `[start, end]`, most recent first
    pub fn hired_between(&mut self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Employee>> {
        self.expect_ok(&Request::HiredBetween { start, end })
    }

    /// Insert an employee; a taken id surfaces as `DuplicateId`
    pub fn insert(&mut self, employee: Employee) -> Result<Employee> {
        let id = employee.id;
        let response = self.call(&Request::Insert { employee })?;
        match response.status {
            Status::BadRequest => Err(RosterError::DuplicateId(id)),
            _ => decode_ok(response),
        }
    }

    /// Deactivate an employee, `None` if absent
    pub fn deactivate(&mut self, id: EmployeeId) -> Result<Option<Employee>> {
        self.optional(&Request::Deactivate { id })
    }

    fn expect_ok<T: DeserializeOwned>(&mut self, request: &Request) -> Result<T> {
        let response = self.call(request)?;
        decode_ok(response)
    }

    fn optional<T: DeserializeOwned>(&mut self, request: &Request) -> Result<Option<T>> {
        let response = self.call(request)?;
        if response.status == Status::NotFound {
            return Ok(None);
        }
        decode_ok(response).map(Some)
    }
}

fn decode_ok<T: DeserializeOwned>(response: Response) -> Result<T> {
    match response.status {
        Status::Ok => Ok(serde_json::from_value(response.body)?),
        Status::NotFound => Err(RosterError::Remote("not found".to_string())),
        Status::BadRequest => Err(RosterError::Protocol(
            response.message().unwrap_or("bad request").to_string(),
        )),
        Status::Error => Err(RosterError::Remote(
            response.message().unwrap_or("unknown error").to_string(),
        )),
    }
}
