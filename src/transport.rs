//! Network seam: a line-oriented request/response link.
//!
//! The controller only ever needs two things from the network: accept an
//! inbound connection and read one line from it, or issue a GET-style query
//! and read one line of the response. Both reads are bounded by a timeout
//! and report what they collected instead of blocking.

use crate::config::{ApiConfig, QUERY_BUFFER_LEN};
use crate::status::{STATE_KEY, Status};
use core::fmt::{self, Write};
use heapless::String;

/// Outcome of a bounded line read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineRead {
    /// A full line of `n` bytes was received (terminator not included).
    ///
    /// A line longer than the buffer is returned in buffer-sized pieces.
    Line(usize),
    /// The timeout expired after `n` bytes were collected (possibly 0).
    TimedOut(usize),
}

impl LineRead {
    /// Number of bytes written to the buffer.
    pub fn len(&self) -> usize {
        match *self {
            LineRead::Line(n) | LineRead::TimedOut(n) => n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn timed_out(&self) -> bool {
        matches!(self, LineRead::TimedOut(_))
    }
}

/// Trait for anything that yields newline-terminated lines.
pub trait ReadLine {
    /// Reads up to one line into `buf`, waiting at most `timeout_ms`.
    fn read_line(&mut self, buf: &mut [u8], timeout_ms: u64) -> LineRead;
}

/// An accepted inbound connection. Dropping it closes the connection.
pub trait Connection: ReadLine {
    /// Sends a single status line back to the peer.
    fn respond(&mut self, status_line: &str);
}

/// Trait for the best-effort link to the status service.
pub trait Link {
    /// Inbound connection type.
    type Inbound: Connection;

    /// Outbound response type. Dropping it releases the request.
    type Response: ReadLine;

    /// Returns a pending inbound connection without waiting.
    fn accept(&mut self) -> Option<Self::Inbound>;

    /// Issues a GET-style request to `url`.
    fn get(&mut self, url: &str) -> Result<Self::Response, TransportError>;
}

/// Errors that can occur while talking to the status service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The service could not be reached.
    Unreachable,
    /// The request URL does not fit the query buffer.
    QueryTooLong,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Unreachable => write!(f, "status service unreachable"),
            TransportError::QueryTooLong => write!(f, "request URL exceeds query buffer"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}

/// Builds the outbound query URL for `status`.
///
/// A known status is pushed with
/// `<endpoint>:<port><set_path>?state=<name>&remote`; `Undefined` pulls with
/// `<endpoint>:<port><get_path>?remote`. The `remote` flag keeps this light
/// registered for pushed updates.
///
/// # Errors
/// * `QueryTooLong` - The URL does not fit `QUERY_BUFFER_LEN` bytes
pub fn status_query(
    api: &ApiConfig,
    status: Status,
) -> Result<String<QUERY_BUFFER_LEN>, TransportError> {
    let mut query = String::new();
    let written = if status.is_known() {
        write!(
            query,
            "{}:{}{}?{}={}&remote",
            api.endpoint,
            api.port,
            api.set_path,
            STATE_KEY,
            status.as_str()
        )
    } else {
        write!(query, "{}:{}{}?remote", api.endpoint, api.port, api.get_path)
    };
    written.map_err(|_| TransportError::QueryTooLong)?;
    Ok(query)
}
