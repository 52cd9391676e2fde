//! Status values, their wire names and the payload line scanner.
//!
//! Payloads are single-line JSON objects such as `{"state": "call"}`. They
//! are not decoded as JSON: the scanner looks for the key, skips whitespace,
//! the colon and the opening quote, and matches the value against the five
//! known names by prefix. Anything it does not recognise is
//! [`Status::Undefined`], which callers treat as "no update".

use core::fmt;
use core::str::FromStr;

/// Payload key written by this crate and preferred when reading.
pub const STATE_KEY: &str = "state";

/// Older payload key, still accepted on receive.
pub const LEGACY_STATE_KEY: &str = "status";

/// The presence status shown by the light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// No information yet, or a payload could not be understood.
    #[default]
    Undefined,
    None,
    Call,
    Video,
    Request,
    Coffee,
}

impl Status {
    /// All statuses that can be sent or received.
    pub const KNOWN: [Status; 5] = [
        Status::None,
        Status::Call,
        Status::Video,
        Status::Request,
        Status::Coffee,
    ];

    /// Wire name of the status. `Undefined` has one for diagnostics but is never sent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Undefined => "undefined",
            Status::None => "none",
            Status::Call => "call",
            Status::Video => "video",
            Status::Request => "request",
            Status::Coffee => "coffee",
        }
    }

    /// Returns true for every status except `Undefined`.
    pub fn is_known(&self) -> bool {
        *self != Status::Undefined
    }

    /// Matches the start of `text` against the known wire names.
    ///
    /// Trailing characters (a closing quote, a comma) are ignored.
    pub fn from_prefix(text: &str) -> Status {
        Status::KNOWN
            .into_iter()
            .find(|status| text.starts_with(status.as_str()))
            .unwrap_or(Status::Undefined)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a status name fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownStatus;

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status name")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownStatus {}

/// Exact-name parsing; `"undefined"` is not accepted.
impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::KNOWN
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(UnknownStatus)
    }
}

/// Extracts the status from one payload line.
///
/// Tries the `"state"` key first and falls back to the legacy `"status"` key.
pub fn parse_payload(line: &str) -> Status {
    match scan_key(line, STATE_KEY) {
        Status::Undefined => scan_key(line, LEGACY_STATE_KEY),
        status => status,
    }
}

/// Same as [`parse_payload`] for a raw byte buffer.
///
/// Bytes after the first invalid UTF-8 sequence are ignored.
pub fn parse_payload_bytes(bytes: &[u8]) -> Status {
    let text = match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let valid = &bytes[..err.valid_up_to()];
            core::str::from_utf8(valid).unwrap_or_default()
        }
    };
    parse_payload(text)
}

fn scan_key(line: &str, key: &str) -> Status {
    let mut rest = line;
    while let Some(pos) = rest.find('"') {
        rest = &rest[pos + 1..];
        let Some(after_key) = rest.strip_prefix(key).and_then(|r| r.strip_prefix('"')) else {
            continue;
        };

        let value = after_key
            .trim_start()
            .strip_prefix(':')
            .map(str::trim_start)
            .and_then(|v| v.strip_prefix('"'));
        if let Some(value) = value {
            return Status::from_prefix(value);
        }
    }
    Status::Undefined
}
