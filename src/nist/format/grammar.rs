//! Control bytes and the textual tag syntax.
//!
//! # Hierarchy
//! ```text
//! FS (0x1C)  ends a text record
//! GS (0x1D)  separates fields within a text record
//! RS (0x1E)  separates repeated groups within a field value
//! US (0x1F)  separates items within a group
//! ```
//!
//! A tag reads `<recordType>.<fieldNumber>:` followed by the value, which runs
//! to the next `GS` or `FS`.

use std::io::Write;

/// Record terminator.
pub const FS: u8 = 0x1C;
/// Field separator.
pub const GS: u8 = 0x1D;
/// Group separator.
pub const RS: u8 = 0x1E;
/// Item separator.
pub const US: u8 = 0x1F;

/// Ends the record-type token of a tag.
pub const TAG_TYPE_END: u8 = b'.';
/// Ends the field-number token of a tag.
pub const TAG_FIELD_END: u8 = b':';

/// Longest digit run accepted for a single tag token.
pub const MAX_TOKEN_LEN: usize = 10;

/// Returns true for any of the four separator bytes.
pub fn is_separator(byte: u8) -> bool {
    matches!(byte, FS | GS | RS | US)
}

/// Returns true for the bytes that end a text value.
pub fn is_value_end(byte: u8) -> bool {
    byte == GS || byte == FS
}

/// Writes the canonical tag prefix, e.g. `2.001:`.
pub fn write_tag(out: &mut Vec<u8>, record_type: u32, field: u32) {
    // Writing into a Vec cannot fail
    let _ = write!(out, "{}.{:03}:", record_type, field);
}

/// Number of decimal digits needed to print `value`.
pub fn digit_count(value: u64) -> usize {
    let mut digits = 1;
    let mut rest = value / 10;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    digits
}

/// Parses an unsigned decimal made only of ASCII digits.
pub fn parse_ascii_number(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > 19 {
        return None;
    }
    bytes.iter().try_fold(0u64, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u64::from(b - b'0'))
    })
}

/// Splits a text value into groups of items.
pub fn split_groups(value: &str) -> Vec<Vec<&str>> {
    if value.is_empty() {
        return Vec::new();
    }
    value
        .split(RS as char)
        .map(|group| group.split(US as char).collect())
        .collect()
}

/// Joins groups of items into one text value.
pub fn join_groups<S: AsRef<str>>(groups: &[Vec<S>]) -> String {
    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push(RS as char);
        }
        for (j, item) in group.iter().enumerate() {
            if j > 0 {
                out.push(US as char);
            }
            out.push_str(item.as_ref());
        }
    }
    out
}
