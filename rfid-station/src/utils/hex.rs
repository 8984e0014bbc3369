//! Hexadecimal helpers used for console reports and log lines.

use std::fmt::Write;

/// Format a UID the way the station reports it: every byte as a space
/// followed by two upper-case hex digits.
///
/// Example: `&[0x04, 0xa1]` -> `" 04 A1"`
pub fn format_uid(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for b in bytes {
        // write! never fails writing to a String
        let _ = write!(&mut s, " {:02X}", b);
    }
    s
}

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte.
///
/// Example: `&[0xde, 0xad]` -> `"de ad"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}
