//! Low-level byte reading utilities

use byteorder::{BigEndian, ByteOrder};

/// Read a 1, 2 or 4 byte big-endian number at `offset`.
///
/// Returns `None` when the number does not lie entirely inside `buf`.
pub fn read_number(buf: &[u8], offset: usize, width: usize) -> Option<u64> {
    let bytes = buf.get(offset..offset.checked_add(width)?)?;
    match width {
        1 => Some(bytes[0] as u64),
        2 => Some(BigEndian::read_u16(bytes) as u64),
        4 => Some(BigEndian::read_u32(bytes) as u64),
        _ => None,
    }
}

/// Write a 1, 2 or 4 byte big-endian number at the start of `out`.
///
/// Returns `false` if `value` does not fit in `width` bytes.
pub fn write_number(out: &mut [u8], width: usize, value: u64) -> bool {
    match width {
        1 if value <= u8::MAX as u64 => out[0] = value as u8,
        2 if value <= u16::MAX as u64 => BigEndian::write_u16(out, value as u16),
        4 if value <= u32::MAX as u64 => BigEndian::write_u32(out, value as u32),
        _ => return false,
    }
    true
}
