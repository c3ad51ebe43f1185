//! Error types for the codec and its transport glue.
//!
//! All fallible operations in this crate return [`Result<T>`], which uses
//! the [`Error`] enum for error variants.

/// Errors that can occur while decoding, encoding or moving datagrams.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fewer bytes than the fixed header plus magic cookie (240).
    #[error("Datagram too short: {len} bytes (minimum 240)")]
    TruncatedHeader { len: usize },

    /// The four bytes at offset 236 are not `99.130.83.99`.
    #[error("Invalid magic cookie: {0:?}")]
    InvalidMagicCookie([u8; 4]),

    /// A datagram was larger than the receive buffer and arrived cut short.
    #[error("Datagram exceeds receive buffer of {limit} bytes")]
    OversizedDatagram { limit: usize },

    /// An option declared more bytes than remain in the datagram.
    ///
    /// A code byte with no length byte after it is reported with
    /// `declared = 1` and `available = 0`.
    #[error("Option {code} truncated: declared {declared} bytes, {available} available")]
    TruncatedOption {
        code: u8,
        declared: usize,
        available: usize,
    },

    /// An option payload does not fit in the one-byte length field.
    #[error("Option {code} payload is {len} bytes (maximum 255)")]
    OptionTooLarge { code: u8, len: usize },

    /// Pad (0) and End (255) cannot be carried as option records.
    #[error("Option code {0} is reserved and has no payload")]
    ReservedCode(u8),

    /// A decoded value was supplied for an option code that carries a
    /// different kind of value.
    #[error("Option {code} expects a {expected} value")]
    MismatchedValue { code: u8, expected: &'static str },

    /// File system or network I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error (config file or dump output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid listener configuration.
    ///
    /// Returned by [`Config::validate`](crate::Config::validate).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Socket creation or configuration error.
    ///
    /// Typically occurs when binding to port 67 without administrator privileges.
    #[error("Socket error: {0}")]
    Socket(String),
}

/// A specialized Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
