//! Utility functions and helpers

pub mod time;

use crate::error::DecodeError;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Whether a byte may appear unescaped in a percent-encoded string
/// (RFC 3986 "unreserved": `A-Z a-z 0-9 - _ . ~`).
pub fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

/// Percent-encode every byte of `value` outside the unreserved set.
///
/// Works on the UTF-8 bytes, so a multi-byte character turns into one
/// escape per byte. Hex digits are uppercase.
pub fn percent_encode(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for &byte in value.as_bytes() {
        if is_unreserved(byte) {
            escaped.push(byte as char);
        } else {
            escaped.push('%');
            escaped.push(HEX_UPPER[(byte >> 4) as usize] as char);
            escaped.push(HEX_UPPER[(byte & 0x0f) as usize] as char);
        }
    }
    escaped
}

/// Inverse of [`percent_encode`]. Accepts either hex casing.
pub fn percent_decode(value: &str) -> Result<String, DecodeError> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).and_then(|b| hex_value(*b));
            let lo = bytes.get(i + 2).and_then(|b| hex_value(*b));
            match (hi, lo) {
                (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                _ => return Err(DecodeError::BadEscape(i)),
            }
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).map_err(|_| DecodeError::InvalidUtf8)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
