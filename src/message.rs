//! DHCP message decoding and encoding per RFC 2131.
//!
//! A message consists of a fixed 236-byte header followed by a 4-byte
//! magic cookie and a variable-length option area.
//!
//! # Message Structure
//!
//! ```text
//! 0                   1                   2                   3
//! 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |     op (1)    |   htype (1)   |   hlen (1)    |   hops (1)    |
//! +---------------+---------------+---------------+---------------+
//! |                            xid (4)                            |
//! +-------------------------------+-------------------------------+
//! |           secs (2)            |           flags (2)           |
//! +-------------------------------+-------------------------------+
//! |                          ciaddr (4)                           |
//! +---------------------------------------------------------------+
//! |                          yiaddr (4)                           |
//! +---------------------------------------------------------------+
//! |                          siaddr (4)                           |
//! +---------------------------------------------------------------+
//! |                          giaddr (4)                           |
//! +---------------------------------------------------------------+
//! |                          chaddr (16)                          |
//! +---------------------------------------------------------------+
//! |                          sname (64)                           |
//! +---------------------------------------------------------------+
//! |                          file (128)                           |
//! +---------------------------------------------------------------+
//! |                    magic cookie (4) = 99.130.83.99            |
//! +---------------------------------------------------------------+
//! |                          options (variable)                   |
//! +---------------------------------------------------------------+
//! ```
//!
//! Decoding copies everything it keeps, so a [`Message`] never borrows the
//! datagram it came from.

use std::net::Ipv4Addr;

use serde::Serialize;
use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::format;
use crate::registry::{self, END, MESSAGE_TYPE, MessageType, OptionValue, PAD};
use crate::stream::OptionStream;

/// Sentinel that opens the option area.
pub const MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];

const CHADDR_OFFSET: usize = 28;
const CHADDR_SIZE: usize = 16;
const SNAME_OFFSET: usize = CHADDR_OFFSET + CHADDR_SIZE;
const SNAME_SIZE: usize = 64;
const FILE_OFFSET: usize = SNAME_OFFSET + SNAME_SIZE;
const FILE_SIZE: usize = 128;

/// Size of the fixed header, excluding the magic cookie.
pub const HEADER_SIZE: usize = FILE_OFFSET + FILE_SIZE;

/// Offset of the first option record.
pub const OPTIONS_OFFSET: usize = HEADER_SIZE + MAGIC_COOKIE.len();

/// Largest payload one option record can carry.
pub const MAX_OPTION_PAYLOAD: usize = u8::MAX as usize;

/// BOOTP/DHCP operation code for client requests.
pub const BOOTREQUEST: u8 = 1;

/// BOOTP/DHCP operation code for server replies.
pub const BOOTREPLY: u8 = 2;

/// Hardware type for Ethernet.
pub const HTYPE_ETHERNET: u8 = 1;

/// Hardware address length for Ethernet.
pub const HLEN_ETHERNET: u8 = 6;

/// Broadcast bit of the `flags` field.
pub const FLAG_BROADCAST: u16 = 0x8000;

/// One option record: its code, the payload as received and the value the
/// registry decoded from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DhcpOption {
    code: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'static str>,
    payload: Vec<u8>,
    value: OptionValue,
}

impl DhcpOption {
    /// Builds an option from a raw payload, decoding it through the registry.
    pub fn from_raw(code: u8, payload: impl Into<Vec<u8>>) -> Self {
        let payload = payload.into();
        let value = registry::decode(code, &payload);
        Self {
            code,
            name: registry::lookup(code).map(|spec| spec.name),
            payload,
            value,
        }
    }

    /// Builds an option from a decoded value, encoding it through the registry.
    ///
    /// The stored value is decoded back from the encoded payload, so it is
    /// exactly what a receiver of this option will see (text loses any NULs).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedValue`] if `value` is not the kind the
    /// registry lists for `code`.
    pub fn from_value(code: u8, value: OptionValue) -> Result<Self> {
        let payload = registry::encode(code, &value)?;
        Ok(Self::from_raw(code, payload))
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    /// Registry name, `None` for unregistered codes.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    /// Appends `[code][length][payload]` to `out`.
    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.code == PAD || self.code == END {
            return Err(Error::ReservedCode(self.code));
        }
        if self.payload.len() > MAX_OPTION_PAYLOAD {
            return Err(Error::OptionTooLarge {
                code: self.code,
                len: self.payload.len(),
            });
        }
        out.push(self.code);
        out.push(self.payload.len() as u8);
        out.extend_from_slice(&self.payload);
        Ok(())
    }
}

/// A decoded DHCP/BOOTP message.
///
/// Used for both client requests and server replies. Decode with
/// [`decode`](Self::decode) and encode with [`encode`](Self::encode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Operation code: [`BOOTREQUEST`] (1) or [`BOOTREPLY`] (2).
    pub op: u8,

    /// Hardware address type. [`HTYPE_ETHERNET`] (1) for Ethernet.
    pub htype: u8,

    /// Hardware address length. [`HLEN_ETHERNET`] (6) for Ethernet.
    pub hlen: u8,

    /// Hop count, incremented by relay agents.
    pub hops: u8,

    /// Transaction ID chosen by the client, echoed in replies.
    pub xid: u32,

    /// Seconds elapsed since the client began acquisition.
    pub secs: u16,

    /// Flags. Bit 15 ([`FLAG_BROADCAST`]) requests broadcast replies.
    pub flags: u16,

    pub ciaddr: Ipv4Addr,
    pub yiaddr: Ipv4Addr,
    pub siaddr: Ipv4Addr,
    pub giaddr: Ipv4Addr,

    /// Client hardware address. Only the first `hlen` bytes are meaningful;
    /// encoding writes zeros past them.
    pub chaddr: [u8; CHADDR_SIZE],

    /// Server host name, at most 64 bytes on the wire.
    pub sname: String,

    /// Boot file name, at most 128 bytes on the wire.
    pub file: String,

    /// Options in wire order. Duplicates are kept.
    pub options: Vec<DhcpOption>,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            op: BOOTREQUEST,
            htype: HTYPE_ETHERNET,
            hlen: HLEN_ETHERNET,
            hops: 0,
            xid: 0,
            secs: 0,
            flags: 0,
            ciaddr: Ipv4Addr::UNSPECIFIED,
            yiaddr: Ipv4Addr::UNSPECIFIED,
            siaddr: Ipv4Addr::UNSPECIFIED,
            giaddr: Ipv4Addr::UNSPECIFIED,
            chaddr: [0; CHADDR_SIZE],
            sname: String::new(),
            file: String::new(),
            options: Vec::new(),
        }
    }
}

impl Message {
    /// Decodes a message from raw datagram bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::TruncatedHeader`] if `data` is shorter than 240 bytes
    /// - [`Error::InvalidMagicCookie`] if bytes 236..240 are not `99.130.83.99`
    /// - [`Error::TruncatedOption`] if an option runs past the end of `data`
    ///
    /// Unregistered option codes are not an error.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < OPTIONS_OFFSET {
            return Err(Error::TruncatedHeader { len: data.len() });
        }

        let cookie = [
            data[HEADER_SIZE],
            data[HEADER_SIZE + 1],
            data[HEADER_SIZE + 2],
            data[HEADER_SIZE + 3],
        ];
        if cookie != MAGIC_COOKIE {
            return Err(Error::InvalidMagicCookie(cookie));
        }

        let mut chaddr = [0u8; CHADDR_SIZE];
        chaddr.copy_from_slice(&data[CHADDR_OFFSET..SNAME_OFFSET]);

        let mut options = Vec::new();
        for record in OptionStream::at(data, OPTIONS_OFFSET) {
            let record = record?;
            trace!("Option {} ({} bytes)", record.code, record.payload.len());
            options.push(DhcpOption::from_raw(record.code, record.payload));
        }

        Ok(Self {
            op: data[0],
            htype: data[1],
            hlen: data[2],
            hops: data[3],
            xid: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            secs: u16::from_be_bytes([data[8], data[9]]),
            flags: u16::from_be_bytes([data[10], data[11]]),
            ciaddr: Ipv4Addr::new(data[12], data[13], data[14], data[15]),
            yiaddr: Ipv4Addr::new(data[16], data[17], data[18], data[19]),
            siaddr: Ipv4Addr::new(data[20], data[21], data[22], data[23]),
            giaddr: Ipv4Addr::new(data[24], data[25], data[26], data[27]),
            chaddr,
            sname: format::text(&data[SNAME_OFFSET..FILE_OFFSET]),
            file: format::text(&data[FILE_OFFSET..HEADER_SIZE]),
            options,
        })
    }

    /// Encodes the message for transmission.
    ///
    /// Output is the header, the magic cookie, each option as
    /// `[code][length][payload]` in order, then one end marker. `sname` and
    /// `file` longer than their fields are cut to fit.
    ///
    /// # Errors
    ///
    /// - [`Error::OptionTooLarge`] if an option payload exceeds 255 bytes
    /// - [`Error::ReservedCode`] if an option uses code 0 or 255
    pub fn encode(&self) -> Result<Vec<u8>> {
        let options_len: usize = self.options.iter().map(|option| option.payload.len() + 2).sum();
        let mut packet = Vec::with_capacity(OPTIONS_OFFSET + options_len + 1);

        packet.push(self.op);
        packet.push(self.htype);
        packet.push(self.hlen);
        packet.push(self.hops);

        packet.extend_from_slice(&self.xid.to_be_bytes());
        packet.extend_from_slice(&self.secs.to_be_bytes());
        packet.extend_from_slice(&self.flags.to_be_bytes());

        packet.extend_from_slice(&self.ciaddr.octets());
        packet.extend_from_slice(&self.yiaddr.octets());
        packet.extend_from_slice(&self.siaddr.octets());
        packet.extend_from_slice(&self.giaddr.octets());

        let mut chaddr = [0u8; CHADDR_SIZE];
        let hlen = (self.hlen as usize).min(CHADDR_SIZE);
        chaddr[..hlen].copy_from_slice(&self.chaddr[..hlen]);
        packet.extend_from_slice(&chaddr);

        let (sname, truncated) = format::fixed_text::<SNAME_SIZE>(&self.sname);
        if truncated {
            warn!("sname truncated to {} bytes", SNAME_SIZE);
        }
        packet.extend_from_slice(&sname);

        let (file, truncated) = format::fixed_text::<FILE_SIZE>(&self.file);
        if truncated {
            warn!("file truncated to {} bytes", FILE_SIZE);
        }
        packet.extend_from_slice(&file);

        packet.extend_from_slice(&MAGIC_COOKIE);

        for option in &self.options {
            option.write_to(&mut packet)?;
        }

        packet.push(END);

        Ok(packet)
    }

    /// The sentinel every decoded or encoded message carries.
    pub fn magic_cookie(&self) -> [u8; 4] {
        MAGIC_COOKIE
    }

    /// First option with `code`, if any.
    pub fn option(&self, code: u8) -> Option<&DhcpOption> {
        self.options.iter().find(|option| option.code == code)
    }

    /// Every option with `code`, in wire order.
    pub fn options_with_code(&self, code: u8) -> impl Iterator<Item = &DhcpOption> {
        self.options.iter().filter(move |option| option.code == code)
    }

    /// Returns the DHCP message type (Option 53) if present and known.
    ///
    /// Returns `None` for BOOTP messages, which don't carry this option.
    pub fn message_type(&self) -> Option<MessageType> {
        match self.option(MESSAGE_TYPE)?.value() {
            OptionValue::U8(value) => MessageType::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Returns the client hardware address bytes (respecting hlen).
    pub fn chaddr_bytes(&self) -> &[u8] {
        &self.chaddr[..(self.hlen as usize).min(CHADDR_SIZE)]
    }

    /// Formats the client hardware address as a colon-separated string.
    ///
    /// For Ethernet, returns format like "aa:bb:cc:dd:ee:ff".
    pub fn hardware_address(&self) -> String {
        format::hardware_address(&self.chaddr, self.hlen)
    }

    /// Returns true if the broadcast flag (bit 15) is set.
    pub fn is_broadcast(&self) -> bool {
        (self.flags & FLAG_BROADCAST) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{HOST_NAME, PARAMETER_REQUEST_LIST, REQUESTED_IP_ADDRESS, ROUTER};

    fn header() -> Vec<u8> {
        let mut packet = vec![0u8; OPTIONS_OFFSET];
        packet[0] = BOOTREQUEST;
        packet[1] = HTYPE_ETHERNET;
        packet[2] = HLEN_ETHERNET;
        packet[236..240].copy_from_slice(&MAGIC_COOKIE);
        packet
    }

    fn with_options(options: &[u8]) -> Vec<u8> {
        let mut packet = header();
        packet.extend_from_slice(options);
        packet
    }

    fn create_test_packet(message_type: MessageType) -> Vec<u8> {
        let mut packet = header();
        packet[4..8].copy_from_slice(&0x12345678u32.to_be_bytes());
        packet[10..12].copy_from_slice(&FLAG_BROADCAST.to_be_bytes());
        packet[28..34].copy_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        packet.extend_from_slice(&[MESSAGE_TYPE, 1, message_type as u8]);
        packet.extend_from_slice(&[REQUESTED_IP_ADDRESS, 4, 192, 168, 1, 100]);
        packet.extend_from_slice(&[HOST_NAME, 9]);
        packet.extend_from_slice(b"test-host");
        packet.push(END);
        packet
    }

    #[test]
    fn test_decode_and_roundtrip() {
        let data = create_test_packet(MessageType::Discover);
        let message = Message::decode(&data).unwrap();

        assert_eq!(message.op, BOOTREQUEST);
        assert_eq!(message.xid, 0x12345678);
        assert!(message.is_broadcast());
        assert_eq!(message.message_type(), Some(MessageType::Discover));
        assert_eq!(message.hardware_address(), "aa:bb:cc:dd:ee:ff");
        assert_eq!(
            message.option(REQUESTED_IP_ADDRESS).unwrap().value(),
            &OptionValue::Address(Ipv4Addr::new(192, 168, 1, 100))
        );
        assert_eq!(
            message.option(HOST_NAME).unwrap().value(),
            &OptionValue::Text("test-host".to_string())
        );

        let encoded = message.encode().unwrap();
        assert_eq!(encoded, data);
        assert_eq!(Message::decode(&encoded).unwrap(), message);
    }

    #[test]
    fn test_header_field_offsets() {
        let mut packet = header();
        packet[0..4].copy_from_slice(&[0x01, 0x01, 0x06, 0x00]);
        packet[4..8].copy_from_slice(&0xDEADBEEFu32.to_be_bytes());
        packet[8..10].copy_from_slice(&1234u16.to_be_bytes());
        packet[10..12].copy_from_slice(&0x8000u16.to_be_bytes());
        packet[12..16].copy_from_slice(&[10, 0, 0, 1]);
        packet[16..20].copy_from_slice(&[10, 0, 0, 2]);
        packet[20..24].copy_from_slice(&[10, 0, 0, 3]);
        packet[24..28].copy_from_slice(&[10, 0, 0, 4]);
        packet[28..34].copy_from_slice(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        packet[44..52].copy_from_slice(b"testname");
        packet[108..116].copy_from_slice(b"bootfile");

        let message = Message::decode(&packet).unwrap();
        assert_eq!(message.op, 1);
        assert_eq!(message.htype, 1);
        assert_eq!(message.hlen, 6);
        assert_eq!(message.hops, 0);
        assert_eq!(message.xid, 0xDEADBEEF);
        assert_eq!(message.secs, 1234);
        assert_eq!(message.flags, 0x8000);
        assert_eq!(message.ciaddr, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(message.yiaddr, Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(message.siaddr, Ipv4Addr::new(10, 0, 0, 3));
        assert_eq!(message.giaddr, Ipv4Addr::new(10, 0, 0, 4));
        assert_eq!(message.chaddr_bytes(), &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        assert_eq!(message.sname, "testname");
        assert_eq!(message.file, "bootfile");
        assert_eq!(message.magic_cookie(), MAGIC_COOKIE);
        assert!(message.options.is_empty());
    }

    #[test]
    fn test_encode_produces_correct_offsets() {
        let message = Message {
            op: BOOTREPLY,
            hops: 3,
            xid: 0x12345678,
            secs: 999,
            flags: FLAG_BROADCAST,
            ciaddr: Ipv4Addr::new(192, 168, 1, 10),
            yiaddr: Ipv4Addr::new(192, 168, 1, 20),
            siaddr: Ipv4Addr::new(192, 168, 1, 1),
            giaddr: Ipv4Addr::new(192, 168, 2, 1),
            chaddr: [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            sname: "server".to_string(),
            file: "pxelinux.0".to_string(),
            options: vec![DhcpOption::from_value(MESSAGE_TYPE, OptionValue::U8(MessageType::Offer as u8)).unwrap()],
            ..Default::default()
        };

        let encoded = message.encode().unwrap();

        assert_eq!(encoded[0], BOOTREPLY);
        assert_eq!(encoded[1], HTYPE_ETHERNET);
        assert_eq!(encoded[2], HLEN_ETHERNET);
        assert_eq!(encoded[3], 3);
        assert_eq!(&encoded[4..8], &0x12345678u32.to_be_bytes());
        assert_eq!(&encoded[8..10], &999u16.to_be_bytes());
        assert_eq!(&encoded[10..12], &0x8000u16.to_be_bytes());
        assert_eq!(&encoded[12..16], &[192, 168, 1, 10]);
        assert_eq!(&encoded[16..20], &[192, 168, 1, 20]);
        assert_eq!(&encoded[20..24], &[192, 168, 1, 1]);
        assert_eq!(&encoded[24..28], &[192, 168, 2, 1]);
        assert_eq!(&encoded[28..34], &[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(&encoded[44..50], b"server");
        assert!(encoded[50..108].iter().all(|byte| *byte == 0));
        assert_eq!(&encoded[108..118], b"pxelinux.0");
        assert!(encoded[118..236].iter().all(|byte| *byte == 0));
        assert_eq!(&encoded[236..240], &MAGIC_COOKIE);
        assert_eq!(&encoded[240..], &[MESSAGE_TYPE, 1, 2, END]);
    }

    #[test]
    fn test_short_datagrams_rejected() {
        assert!(matches!(
            Message::decode(&[0u8; 100]),
            Err(Error::TruncatedHeader { len: 100 })
        ));
        assert!(matches!(
            Message::decode(&[0u8; 239]),
            Err(Error::TruncatedHeader { len: 239 })
        ));
        assert!(matches!(Message::decode(&[]), Err(Error::TruncatedHeader { len: 0 })));
    }

    #[test]
    fn test_invalid_magic_cookie() {
        let mut packet = header();
        packet[236..240].copy_from_slice(&[0, 0, 0, 0]);
        packet.push(END);
        assert!(matches!(
            Message::decode(&packet),
            Err(Error::InvalidMagicCookie([0, 0, 0, 0]))
        ));
    }

    #[test]
    fn test_minimum_valid_message() {
        let message = Message::decode(&header()).unwrap();
        assert_eq!(message.op, BOOTREQUEST);
        assert!(message.options.is_empty());
        assert!(message.message_type().is_none());
    }

    #[test]
    fn test_pads_skipped_and_trailing_bytes_ignored() {
        let packet = with_options(&[0x00, 0x00, 0x03, 0x04, 0xAA, 0xBB, 0xCC, 0xDD, 0xFF, 0x35, 0x01]);
        let message = Message::decode(&packet).unwrap();
        assert_eq!(message.options.len(), 1);
        assert_eq!(message.options[0].code(), ROUTER);
        assert_eq!(message.options[0].payload(), &[0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_truncated_option() {
        let packet = with_options(&[0x35, 0x01, 0x01, 0x32, 0x04, 0xAA, 0xBB]);
        assert!(matches!(
            Message::decode(&packet),
            Err(Error::TruncatedOption {
                code: 0x32,
                declared: 4,
                available: 2
            })
        ));
    }

    #[test]
    fn test_unknown_option_preserved() {
        let packet = with_options(&[200, 2, 0x01, 0x02, END]);
        let message = Message::decode(&packet).unwrap();
        let option = message.option(200).unwrap();
        assert_eq!(option.name(), None);
        assert_eq!(option.payload(), &[0x01, 0x02]);
        assert_eq!(option.value(), &OptionValue::Unrecognized(vec![0x01, 0x02]));
    }

    #[test]
    fn test_end_of_buffer_without_marker() {
        let packet = with_options(&[0x35, 0x01, 0x03, 0x0c, 0x02, b'p', b'c']);
        let message = Message::decode(&packet).unwrap();
        assert_eq!(message.options.len(), 2);
        assert_eq!(message.message_type(), Some(MessageType::Request));
        assert_eq!(
            message.option(HOST_NAME).unwrap().value(),
            &OptionValue::Text("pc".to_string())
        );
    }

    #[test]
    fn test_duplicate_options_kept_in_order() {
        let packet = with_options(&[MESSAGE_TYPE, 1, 1, HOST_NAME, 1, b'a', MESSAGE_TYPE, 1, 3, END]);
        let message = Message::decode(&packet).unwrap();
        assert_eq!(message.options.len(), 3);
        assert_eq!(message.message_type(), Some(MessageType::Discover));
        let types: Vec<_> = message
            .options_with_code(MESSAGE_TYPE)
            .map(|option| option.payload()[0])
            .collect();
        assert_eq!(types, vec![1, 3]);
    }

    #[test]
    fn test_option_with_zero_and_max_length() {
        let packet = with_options(&[PARAMETER_REQUEST_LIST, 0, END]);
        let message = Message::decode(&packet).unwrap();
        assert_eq!(
            message.option(PARAMETER_REQUEST_LIST).unwrap().value(),
            &OptionValue::Bytes(vec![])
        );

        let mut options = vec![PARAMETER_REQUEST_LIST, 255];
        options.extend(0..255u8);
        options.push(END);
        let message = Message::decode(&with_options(&options)).unwrap();
        assert_eq!(message.option(PARAMETER_REQUEST_LIST).unwrap().payload().len(), 255);
        assert_eq!(message.encode().unwrap(), with_options(&options));
    }

    #[test]
    fn test_option_too_large() {
        let message = Message {
            options: vec![DhcpOption::from_raw(HOST_NAME, vec![b'a'; 256])],
            ..Default::default()
        };
        assert!(matches!(
            message.encode(),
            Err(Error::OptionTooLarge { code: HOST_NAME, len: 256 })
        ));
    }

    #[test]
    fn test_reserved_codes_rejected_on_encode() {
        for code in [PAD, END] {
            let message = Message {
                options: vec![DhcpOption::from_raw(code, vec![])],
                ..Default::default()
            };
            assert!(matches!(message.encode(), Err(Error::ReservedCode(c)) if c == code));
        }
    }

    #[test]
    fn test_chaddr_zeroed_beyond_hlen() {
        let message = Message {
            hlen: 4,
            chaddr: [0x11; 16],
            ..Default::default()
        };
        let encoded = message.encode().unwrap();
        assert_eq!(&encoded[28..32], &[0x11; 4]);
        assert!(encoded[32..44].iter().all(|byte| *byte == 0));

        let decoded = Message::decode(&encoded).unwrap();
        assert_eq!(decoded.chaddr_bytes(), &[0x11; 4]);
        assert_eq!(decoded.hardware_address(), "11:11:11:11");
    }

    #[test]
    fn test_hardware_address_with_zero_bytes() {
        let mut packet = header();
        packet[28..34].copy_from_slice(&[0x00, 0x1b, 0x00, 0x0a, 0x00, 0x01]);
        let message = Message::decode(&packet).unwrap();
        assert_eq!(message.hardware_address(), "00:1b:00:0a:00:01");
    }

    #[test]
    fn test_long_sname_and_file_truncated() {
        let message = Message {
            sname: "s".repeat(70),
            file: "f".repeat(130),
            ..Default::default()
        };
        let decoded = Message::decode(&message.encode().unwrap()).unwrap();
        assert_eq!(decoded.sname, "s".repeat(64));
        assert_eq!(decoded.file, "f".repeat(128));
    }

    #[test]
    fn test_from_value_matches_from_raw() {
        let built = DhcpOption::from_value(ROUTER, OptionValue::Addresses(vec![Ipv4Addr::new(10, 0, 0, 1)])).unwrap();
        assert_eq!(built.payload(), &[10, 0, 0, 1]);
        assert_eq!(built.name(), Some("Router"));
        assert_eq!(built, DhcpOption::from_raw(ROUTER, vec![10, 0, 0, 1]));

        assert!(matches!(
            DhcpOption::from_value(ROUTER, OptionValue::U8(1)),
            Err(Error::MismatchedValue { code: ROUTER, .. })
        ));
    }

    #[test]
    fn test_unicast_flag() {
        let mut packet = create_test_packet(MessageType::Discover);
        packet[10..12].copy_from_slice(&0x0000u16.to_be_bytes());
        let message = Message::decode(&packet).unwrap();
        assert!(!message.is_broadcast());
    }

    #[test]
    fn test_serializes_to_json() {
        let message = Message::decode(&create_test_packet(MessageType::Request)).unwrap();
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["xid"], 0x12345678);
        assert_eq!(json["options"][0]["name"], "MessageType");
        assert_eq!(json["options"][1]["value"]["type"], "address");
        assert_eq!(json["options"][1]["value"]["value"], "192.168.1.100");
    }
}
