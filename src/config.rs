//! Compile-time constants and startup configuration.
//!
//! Timing and buffer limits live here so they can be tuned in one place.
//! The structs describe what the board layer loads once at startup.

use crate::pin::Pin;
use crate::status::Status;

/// Maximum wait for one line from an inbound connection or a response (ms).
pub const READ_TIMEOUT_MS: u64 = 10;

/// Bytes kept from one payload line; longer lines are cut.
pub const LINE_BUFFER_LEN: usize = 80;

/// Capacity of the outbound query URL.
pub const QUERY_BUFFER_LEN: usize = 128;

/// Number of button bindings a controller can hold.
pub const MAX_BUTTONS: usize = 4;

/// Non-JSON lines skipped before an inbound request is given up.
pub const MAX_PREAMBLE_LINES: usize = 32;

/// Number of adopted statuses kept for diagnostics.
pub const HISTORY_LEN: usize = 8;

/// Reply sent to every accepted inbound connection.
pub const ACK_LINE: &str = "HTTP/1.1 200 OK\n";

/// Port of the status service.
pub const DEFAULT_PORT: u16 = 9000;

/// Port the light listens on for pushed updates.
pub const DEFAULT_REMOTE_PORT: u16 = 9001;

pub const DEFAULT_GET_PATH: &str = "/state/get";
pub const DEFAULT_SET_PATH: &str = "/state/set";

/// Where and how to reach the status service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ApiConfig {
    /// Scheme and host, e.g. `http://192.168.1.20`.
    pub endpoint: &'static str,
    /// Path queried to pull the current status.
    pub get_path: &'static str,
    /// Path queried to push a new status.
    pub set_path: &'static str,
    /// Port of the status service.
    pub port: u16,
    /// Local port the link listens on for pushed updates.
    pub remote_port: u16,
    /// Bound on every line read, in milliseconds.
    pub read_timeout_ms: u64,
}

impl ApiConfig {
    /// Configuration with default ports, paths and timeout.
    pub const fn new(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            get_path: DEFAULT_GET_PATH,
            set_path: DEFAULT_SET_PATH,
            port: DEFAULT_PORT,
            remote_port: DEFAULT_REMOTE_PORT,
            read_timeout_ms: READ_TIMEOUT_MS,
        }
    }
}

/// Strip wiring and output options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedConfig {
    pub data_pin: Pin,
    pub pixel_count: u16,
    pub brightness: u8,
    pub gamma: bool,
}

/// One status button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    pub status: Status,
    pub pin: Pin,
    pub debounce_ms: u64,
}

impl ButtonConfig {
    pub const fn new(status: Status, pin: Pin, debounce_ms: u64) -> Self {
        Self {
            status,
            pin,
            debounce_ms,
        }
    }
}
