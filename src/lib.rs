#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`StatusLight`**: Owns the current status, button bindings, live animation and idle-sync timer
//! - **`Status`**: The presence value mirrored on the LEDs (`None`, `Call`, `Video`, `Request`, `Coffee`)
//! - **`Animation`**: Closed set of per-status color generators (`Wave`, `Blink`, `Rainbow`)
//! - **`Timer`**: Non-blocking interval timer evaluated against a supplied instant
//! - **`Debouncer`** / **`DebouncedSwitch`**: Settle-time filtering of sampled inputs
//! - **`BoundedMap`** / **`BoundedSeq`**: Fixed-capacity containers with fallback values
//! - **`LedStrip`**, **`PinIo`**, **`Link`**: Traits to implement for your LEDs, GPIO and network
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Colors are `Srgb<u8>`; every animation produces one 24-bit sample per render
//! tick and the whole strip is flooded with it.

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod animation;
pub mod collection;
pub mod color;
pub mod config;
pub mod controller;
pub mod debouncer;
pub mod led;
pub mod pin;
pub mod status;
pub mod time;
pub mod timer;
pub mod transport;

pub use animation::{Animation, AnimationKind, Blink, Rainbow, Wave};
pub use collection::{BoundedMap, BoundedSeq, CollectionError};
pub use color::{AMBER, BLACK, CYAN, Color, RED};
pub use config::{ApiConfig, ButtonConfig, LedConfig};
pub use controller::{RegisterError, StatusLight};
pub use debouncer::{DebouncedSwitch, Debouncer};
pub use led::{LedStrip, PixelStrip};
pub use pin::{Pin, PinIo, PinMode};
pub use status::{Status, UnknownStatus, parse_payload, parse_payload_bytes};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use timer::Timer;
pub use transport::{Connection, LineRead, Link, ReadLine, TransportError};
