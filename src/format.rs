//! Conversions between raw header/option bytes and their semantic forms.
//!
//! Addresses become [`Ipv4Addr`] (displayed and serialized as dotted quads),
//! hardware addresses become colon-separated lowercase hex, and text fields
//! become strings with every NUL stripped.

use std::fmt::Write;
use std::net::Ipv4Addr;

/// Length of one IPv4 address on the wire.
pub const IPV4_LEN: usize = 4;

/// Reads exactly four bytes as an address.
///
/// Returns `None` for any other length.
pub fn ipv4(bytes: &[u8]) -> Option<Ipv4Addr> {
    let octets: [u8; IPV4_LEN] = bytes.try_into().ok()?;
    Some(Ipv4Addr::from(octets))
}

/// Reads a payload as consecutive 4-byte addresses.
///
/// Trailing bytes that do not form a whole address are ignored.
pub fn ipv4_list(bytes: &[u8]) -> Vec<Ipv4Addr> {
    bytes
        .chunks_exact(IPV4_LEN)
        .map(|chunk| Ipv4Addr::new(chunk[0], chunk[1], chunk[2], chunk[3]))
        .collect()
}

/// Writes addresses back to back.
pub fn ipv4_list_bytes(addresses: &[Ipv4Addr]) -> Vec<u8> {
    addresses.iter().flat_map(|address| address.octets()).collect()
}

/// Formats the first `hlen` bytes of a hardware address as `aa:bb:cc:...`.
///
/// Every byte is printed as two hex digits, zero bytes included, so the
/// output always has `min(hlen, bytes.len())` groups.
pub fn hardware_address(bytes: &[u8], hlen: u8) -> String {
    let len = (hlen as usize).min(bytes.len());
    let mut result = String::with_capacity(len * 3);
    for (index, byte) in bytes[..len].iter().enumerate() {
        if index > 0 {
            result.push(':');
        }
        let _ = write!(result, "{:02x}", byte);
    }
    result
}

/// Parses `aa:bb:cc:...` back into bytes. Case-insensitive.
pub fn parse_hardware_address(text: &str) -> Option<Vec<u8>> {
    if text.is_empty() {
        return Some(Vec::new());
    }
    text.split(':')
        .map(|part| {
            if part.is_empty() || part.len() > 2 {
                return None;
            }
            u8::from_str_radix(part, 16).ok()
        })
        .collect()
}

/// Decodes bytes as text, dropping every NUL character wherever it occurs.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace('\0', "")
}

/// Writes `value` into a zero-filled field of `N` bytes.
///
/// Text longer than the field is cut at the last character boundary that
/// fits; the second element reports whether that happened.
pub fn fixed_text<const N: usize>(value: &str) -> ([u8; N], bool) {
    let mut field = [0u8; N];
    let mut end = value.len().min(N);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    field[..end].copy_from_slice(&value.as_bytes()[..end]);
    (field, end < value.len())
}
