//! # Error Types
//!
//! Custom error types for Pad Bridge using `thiserror`.

use thiserror::Error;

/// Main error type for Pad Bridge
#[derive(Debug, Error)]
pub enum PadBridgeError {
    /// A report could not be transmitted to the host
    #[error("report transmission failed: {0}")]
    Transport(#[source] std::io::Error),

    /// No writable HID gadget device was found
    #[error("HID gadget device not found (tried: {0})")]
    GadgetNotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors outside the report transport (e.g. config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A raw value outside its documented domain
    #[error("{what} out of range: {value}")]
    InvalidRange { what: &'static str, value: i64 },
}

/// Result type alias for Pad Bridge
pub type Result<T> = std::result::Result<T, PadBridgeError>;
