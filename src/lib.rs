//! # dhcpwire
//!
//! A DHCPv4/BOOTP message codec implementing RFC 2131 (message format) and
//! RFC 2132 (options).
//!
//! ## Features
//!
//! - Strict decoding of the 236-byte fixed header and magic cookie
//! - Option stream with pad/end handling and explicit truncation errors
//! - Table-driven decoding of option payloads into typed values, with the
//!   raw bytes always kept alongside
//! - Symmetric encoding: `decode(encode(m)) == m`
//! - Thin async UDP listener for feeding datagrams to the codec
//!
//! ## Quick Start
//!
//! ```
//! use dhcpwire::{DhcpOption, Message, MessageType, OptionValue, registry};
//!
//! # fn main() -> dhcpwire::Result<()> {
//! let message = Message {
//!     xid: 0x3903f326,
//!     options: vec![DhcpOption::from_value(
//!         registry::MESSAGE_TYPE,
//!         OptionValue::U8(MessageType::Discover as u8),
//!     )?],
//!     ..Default::default()
//! };
//!
//! let bytes = dhcpwire::encode(&message)?;
//! let decoded = dhcpwire::decode(&bytes)?;
//! assert_eq!(decoded, message);
//! assert_eq!(decoded.message_type(), Some(MessageType::Discover));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`format`] - address, hardware address and text conversions
//! - [`registry`] - option code table and [`OptionValue`]
//! - [`stream`] - [`OptionStream`] TLV scanner over the option area
//! - [`Message`] - header plus ordered [`DhcpOption`] list
//! - [`Listener`] - UDP transport glue, configured by [`Config`]

pub mod config;
pub mod error;
pub mod format;
pub mod listener;
pub mod message;
pub mod registry;
pub mod stream;

pub use config::Config;
pub use error::{Error, Result};
pub use listener::Listener;
pub use message::{DhcpOption, Message};
pub use registry::{MessageType, OptionValue};
pub use stream::{OptionStream, RawOption};

/// Decodes one datagram. See [`Message::decode`].
pub fn decode(data: &[u8]) -> Result<Message> {
    Message::decode(data)
}

/// Encodes one message. See [`Message::encode`].
pub fn encode(message: &Message) -> Result<Vec<u8>> {
    message.encode()
}
