//! Option code table as defined in RFC 2132 and its successors.
//!
//! Every registered code maps to an [`OptionSpec`] naming the option, the
//! kind of value it carries and the payload length the RFC expects. Decoding
//! is best-effort: a payload whose length disagrees with the table is still
//! decoded where possible, and callers always keep the raw bytes alongside
//! the value. Codes without an entry decode to [`OptionValue::Unrecognized`].
//!
//! # References
//!
//! - RFC 2132: DHCP Options and BOOTP Vendor Extensions
//! - RFC 2241, 2242, 2610, 3004, 4702: later option assignments

use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::format;
use LengthClass::MultipleOf;
use ValueKind::*;

/// Pad option: a single zero byte with no length or payload.
pub const PAD: u8 = 0;
/// End option: terminates the option area.
pub const END: u8 = 255;

pub const SUBNET_MASK: u8 = 1;
pub const ROUTER: u8 = 3;
pub const DOMAIN_NAME_SERVER: u8 = 6;
pub const HOST_NAME: u8 = 12;
pub const DOMAIN_NAME: u8 = 15;
pub const REQUESTED_IP_ADDRESS: u8 = 50;
pub const LEASE_TIME: u8 = 51;
pub const MESSAGE_TYPE: u8 = 53;
pub const SERVER_IDENTIFIER: u8 = 54;
pub const PARAMETER_REQUEST_LIST: u8 = 55;
pub const CLIENT_IDENTIFIER: u8 = 61;

/// The kind of value an option payload decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Address,
    AddressList,
    U8,
    U16,
    U16List,
    U32,
    I32,
    Flag,
    Text,
    Bytes,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::AddressList => "address list",
            Self::U8 => "8-bit integer",
            Self::U16 => "16-bit integer",
            Self::U16List => "16-bit integer list",
            Self::U32 => "32-bit integer",
            Self::I32 => "signed 32-bit integer",
            Self::Flag => "flag",
            Self::Text => "text",
            Self::Bytes => "byte string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload length the RFC prescribes for an option.
///
/// Only a hint: a mismatch is logged, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthClass {
    /// Exactly this many bytes.
    Fixed(usize),
    /// A non-empty multiple of this many bytes (address lists, address pairs).
    MultipleOf(usize),
    /// Any length.
    Variable,
}

impl LengthClass {
    pub fn accepts(self, len: usize) -> bool {
        match self {
            Self::Fixed(expected) => len == expected,
            Self::MultipleOf(unit) => len > 0 && len.is_multiple_of(unit),
            Self::Variable => true,
        }
    }
}

/// A decoded option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OptionValue {
    Address(Ipv4Addr),
    Addresses(Vec<Ipv4Addr>),
    U8(u8),
    U16(u16),
    U16List(Vec<u16>),
    U32(u32),
    I32(i32),
    Flag(bool),
    Text(String),
    Bytes(Vec<u8>),
    /// No decoder is registered for the code, or the payload was too short
    /// for its registered kind.
    Unrecognized(Vec<u8>),
}

impl OptionValue {
    /// The registered kind this value belongs to; `None` for
    /// [`Unrecognized`](Self::Unrecognized).
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Address(_) => Some(ValueKind::Address),
            Self::Addresses(_) => Some(ValueKind::AddressList),
            Self::U8(_) => Some(ValueKind::U8),
            Self::U16(_) => Some(ValueKind::U16),
            Self::U16List(_) => Some(ValueKind::U16List),
            Self::U32(_) => Some(ValueKind::U32),
            Self::I32(_) => Some(ValueKind::I32),
            Self::Flag(_) => Some(ValueKind::Flag),
            Self::Text(_) => Some(ValueKind::Text),
            Self::Bytes(_) => Some(ValueKind::Bytes),
            Self::Unrecognized(_) => None,
        }
    }

    /// Serializes the value into an option payload.
    pub fn to_payload(&self) -> Vec<u8> {
        match self {
            Self::Address(address) => address.octets().to_vec(),
            Self::Addresses(addresses) => format::ipv4_list_bytes(addresses),
            Self::U8(value) => vec![*value],
            Self::U16(value) => value.to_be_bytes().to_vec(),
            Self::U16List(values) => values.iter().flat_map(|value| value.to_be_bytes()).collect(),
            Self::U32(value) => value.to_be_bytes().to_vec(),
            Self::I32(value) => value.to_be_bytes().to_vec(),
            Self::Flag(value) => vec![u8::from(*value)],
            Self::Text(text) => text.as_bytes().to_vec(),
            Self::Bytes(bytes) | Self::Unrecognized(bytes) => bytes.clone(),
        }
    }
}

/// One row of the option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub code: u8,
    pub name: &'static str,
    pub kind: ValueKind,
    pub length: LengthClass,
}

impl OptionSpec {
    const fn new(code: u8, name: &'static str, kind: ValueKind) -> Self {
        let length = match kind {
            ValueKind::Address | ValueKind::U32 | ValueKind::I32 => LengthClass::Fixed(4),
            ValueKind::AddressList => LengthClass::MultipleOf(4),
            ValueKind::U8 | ValueKind::Flag => LengthClass::Fixed(1),
            ValueKind::U16 => LengthClass::Fixed(2),
            ValueKind::U16List => LengthClass::MultipleOf(2),
            ValueKind::Text | ValueKind::Bytes => LengthClass::Variable,
        };
        Self {
            code,
            name,
            kind,
            length,
        }
    }

    const fn with_length(mut self, length: LengthClass) -> Self {
        self.length = length;
        self
    }

    /// Decodes a payload according to this entry's kind.
    ///
    /// Fixed-width kinds read their leading bytes and ignore any excess;
    /// a payload too short for the kind yields
    /// [`OptionValue::Unrecognized`].
    pub fn decode(&self, payload: &[u8]) -> OptionValue {
        if !self.length.accepts(payload.len()) {
            debug!(
                "Option {} ({}) has unexpected length {} (expected {:?})",
                self.code,
                self.name,
                payload.len(),
                self.length
            );
        }

        let value = match self.kind {
            ValueKind::Address => payload.get(..4).and_then(format::ipv4).map(OptionValue::Address),
            ValueKind::AddressList => Some(OptionValue::Addresses(format::ipv4_list(payload))),
            ValueKind::U8 => payload.first().map(|byte| OptionValue::U8(*byte)),
            ValueKind::U16 => leading::<2>(payload).map(|bytes| OptionValue::U16(u16::from_be_bytes(bytes))),
            ValueKind::U16List => Some(OptionValue::U16List(
                payload
                    .chunks_exact(2)
                    .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                    .collect(),
            )),
            ValueKind::U32 => leading::<4>(payload).map(|bytes| OptionValue::U32(u32::from_be_bytes(bytes))),
            ValueKind::I32 => leading::<4>(payload).map(|bytes| OptionValue::I32(i32::from_be_bytes(bytes))),
            ValueKind::Flag => payload.first().map(|byte| OptionValue::Flag(*byte == 1)),
            ValueKind::Text => Some(OptionValue::Text(format::text(payload))),
            ValueKind::Bytes => Some(OptionValue::Bytes(payload.to_vec())),
        };

        value.unwrap_or_else(|| OptionValue::Unrecognized(payload.to_vec()))
    }

    /// Encodes a value for this entry, rejecting values of another kind.
    pub fn encode(&self, value: &OptionValue) -> Result<Vec<u8>> {
        match value.kind() {
            Some(kind) if kind != self.kind => Err(Error::MismatchedValue {
                code: self.code,
                expected: self.kind.name(),
            }),
            _ => Ok(value.to_payload()),
        }
    }
}

fn leading<const N: usize>(payload: &[u8]) -> Option<[u8; N]> {
    payload.get(..N)?.try_into().ok()
}

/// The option table, sorted by code.
static REGISTRY: &[OptionSpec] = &[
    OptionSpec::new(1, "SubnetMask", Address),
    OptionSpec::new(2, "TimeOffset", I32),
    OptionSpec::new(3, "Router", AddressList),
    OptionSpec::new(4, "TimeServer", AddressList),
    OptionSpec::new(5, "NameServer", AddressList),
    OptionSpec::new(6, "DomainNameServer", AddressList),
    OptionSpec::new(7, "LogServer", AddressList),
    OptionSpec::new(8, "CookieServer", AddressList),
    OptionSpec::new(9, "LprServer", AddressList),
    OptionSpec::new(10, "ImpressServer", AddressList),
    OptionSpec::new(11, "ResourceLocationServer", AddressList),
    OptionSpec::new(12, "HostName", Text),
    OptionSpec::new(13, "BootFileSize", U16),
    OptionSpec::new(14, "MeritDumpFile", Text),
    OptionSpec::new(15, "DomainName", Text),
    OptionSpec::new(16, "SwapServer", Address),
    OptionSpec::new(17, "RootPath", Text),
    OptionSpec::new(18, "ExtensionsPath", Text),
    OptionSpec::new(19, "IpForwarding", Flag),
    OptionSpec::new(20, "NonLocalSourceRouting", Flag),
    OptionSpec::new(21, "PolicyFilter", AddressList).with_length(MultipleOf(8)),
    OptionSpec::new(22, "MaxDatagramReassemblySize", U16),
    OptionSpec::new(23, "DefaultIpTtl", U8),
    OptionSpec::new(24, "PathMtuAgingTimeout", U32),
    OptionSpec::new(25, "PathMtuPlateauTable", U16List),
    OptionSpec::new(26, "InterfaceMtu", U16),
    OptionSpec::new(27, "AllSubnetsLocal", Flag),
    OptionSpec::new(28, "BroadcastAddress", Address),
    OptionSpec::new(29, "PerformMaskDiscovery", Flag),
    OptionSpec::new(30, "MaskSupplier", Flag),
    OptionSpec::new(31, "PerformRouterDiscovery", Flag),
    OptionSpec::new(32, "RouterSolicitationAddress", Address),
    OptionSpec::new(33, "StaticRoute", AddressList).with_length(MultipleOf(8)),
    OptionSpec::new(34, "TrailerEncapsulation", Flag),
    OptionSpec::new(35, "ArpCacheTimeout", U32),
    OptionSpec::new(36, "EthernetEncapsulation", Flag),
    OptionSpec::new(37, "TcpDefaultTtl", U8),
    OptionSpec::new(38, "TcpKeepaliveInterval", U32),
    OptionSpec::new(39, "TcpKeepaliveGarbage", Flag),
    OptionSpec::new(40, "NisDomain", Text),
    OptionSpec::new(41, "NisServers", AddressList),
    OptionSpec::new(42, "NtpServers", AddressList),
    OptionSpec::new(43, "VendorSpecificInfo", Bytes),
    OptionSpec::new(44, "NetbiosNameServer", AddressList),
    OptionSpec::new(45, "NetbiosDatagramDistributionServer", AddressList),
    OptionSpec::new(46, "NetbiosNodeType", U8),
    OptionSpec::new(47, "NetbiosScope", Text),
    OptionSpec::new(48, "XWindowFontServer", AddressList),
    OptionSpec::new(49, "XWindowDisplayManager", AddressList),
    OptionSpec::new(50, "RequestedIpAddress", Address),
    OptionSpec::new(51, "LeaseTime", U32),
    OptionSpec::new(52, "OptionOverload", U8),
    OptionSpec::new(53, "MessageType", U8),
    OptionSpec::new(54, "ServerIdentifier", Address),
    OptionSpec::new(55, "ParameterRequestList", Bytes),
    OptionSpec::new(56, "Message", Text),
    OptionSpec::new(57, "MaxMessageSize", U16),
    OptionSpec::new(58, "RenewalTime", U32),
    OptionSpec::new(59, "RebindingTime", U32),
    OptionSpec::new(60, "VendorClassIdentifier", Text),
    OptionSpec::new(61, "ClientIdentifier", Bytes),
    OptionSpec::new(62, "NetwareIpDomain", Text),
    OptionSpec::new(63, "NetwareIpOption", Bytes),
    OptionSpec::new(64, "NisPlusDomain", Text),
    OptionSpec::new(65, "NisPlusServers", AddressList),
    OptionSpec::new(66, "TftpServerName", Text),
    OptionSpec::new(67, "BootfileName", Text),
    OptionSpec::new(68, "MobileIpHomeAgent", AddressList),
    OptionSpec::new(69, "SmtpServer", AddressList),
    OptionSpec::new(70, "Pop3Server", AddressList),
    OptionSpec::new(71, "NntpServer", AddressList),
    OptionSpec::new(72, "WwwServer", AddressList),
    OptionSpec::new(73, "FingerServer", AddressList),
    OptionSpec::new(74, "IrcServer", AddressList),
    OptionSpec::new(75, "StreetTalkServer", AddressList),
    OptionSpec::new(76, "StreetTalkDirectoryAssistanceServer", AddressList),
    OptionSpec::new(77, "UserClass", Bytes),
    OptionSpec::new(81, "ClientFqdn", Bytes),
];

/// Returns the table entry for `code`, if one is registered.
pub fn lookup(code: u8) -> Option<&'static OptionSpec> {
    REGISTRY
        .binary_search_by_key(&code, |spec| spec.code)
        .ok()
        .map(|index| &REGISTRY[index])
}

/// Iterates over every registered entry in code order.
pub fn entries() -> impl Iterator<Item = &'static OptionSpec> {
    REGISTRY.iter()
}

/// Decodes a payload for `code`; unregistered codes are never an error.
pub fn decode(code: u8, payload: &[u8]) -> OptionValue {
    match lookup(code) {
        Some(spec) => spec.decode(payload),
        None => {
            debug!("No decoder registered for option {}", code);
            OptionValue::Unrecognized(payload.to_vec())
        }
    }
}

/// Encodes a value for `code`.
///
/// Unregistered codes accept only [`OptionValue::Unrecognized`]. The
/// one-byte length limit is checked by the caller that frames the payload.
pub fn encode(code: u8, value: &OptionValue) -> Result<Vec<u8>> {
    match lookup(code) {
        Some(spec) => spec.encode(value),
        None => match value {
            OptionValue::Unrecognized(bytes) => Ok(bytes.clone()),
            _ => Err(Error::MismatchedValue {
                code,
                expected: "raw",
            }),
        },
    }
}

/// DHCP message types (Option 53).
///
/// RFC 2132 §9.6, extended by RFC 3203 (FORCERENEW), RFC 4388 and
/// RFC 6926 (leasequery) and RFC 7724 (active leasequery).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum MessageType {
    Discover = 1,
    Offer = 2,
    Request = 3,
    Decline = 4,
    Ack = 5,
    Nak = 6,
    Release = 7,
    Inform = 8,
    ForceRenew = 9,
    LeaseQuery = 10,
    LeaseUnassigned = 11,
    LeaseUnknown = 12,
    LeaseActive = 13,
    BulkLeaseQuery = 14,
    LeaseQueryDone = 15,
    ActiveLeaseQuery = 16,
    LeaseQueryStatus = 17,
    Tls = 18,
}

impl TryFrom<u8> for MessageType {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Discover),
            2 => Ok(Self::Offer),
            3 => Ok(Self::Request),
            4 => Ok(Self::Decline),
            5 => Ok(Self::Ack),
            6 => Ok(Self::Nak),
            7 => Ok(Self::Release),
            8 => Ok(Self::Inform),
            9 => Ok(Self::ForceRenew),
            10 => Ok(Self::LeaseQuery),
            11 => Ok(Self::LeaseUnassigned),
            12 => Ok(Self::LeaseUnknown),
            13 => Ok(Self::LeaseActive),
            14 => Ok(Self::BulkLeaseQuery),
            15 => Ok(Self::LeaseQueryDone),
            16 => Ok(Self::ActiveLeaseQuery),
            17 => Ok(Self::LeaseQueryStatus),
            18 => Ok(Self::Tls),
            other => Err(other),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Discover => "DISCOVER",
            Self::Offer => "OFFER",
            Self::Request => "REQUEST",
            Self::Decline => "DECLINE",
            Self::Ack => "ACK",
            Self::Nak => "NAK",
            Self::Release => "RELEASE",
            Self::Inform => "INFORM",
            Self::ForceRenew => "FORCERENEW",
            Self::LeaseQuery => "LEASEQUERY",
            Self::LeaseUnassigned => "LEASEUNASSIGNED",
            Self::LeaseUnknown => "LEASEUNKNOWN",
            Self::LeaseActive => "LEASEACTIVE",
            Self::BulkLeaseQuery => "BULKLEASEQUERY",
            Self::LeaseQueryDone => "LEASEQUERYDONE",
            Self::ActiveLeaseQuery => "ACTIVELEASEQUERY",
            Self::LeaseQueryStatus => "LEASEQUERYSTATUS",
            Self::Tls => "TLS",
        };
        f.write_str(name)
    }
}
