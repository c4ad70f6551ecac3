//! Reserved field numbers and slot kinds.
//!
//! Only the fields that drive framing are named here, plus the slot of each
//! record type that carries raw bytes. Every other field is just a number.

use std::fmt;

/// Record type of the transaction header.
pub const HEADER_RECORD_TYPE: u32 = 1;

/// Record length, present in every record type.
pub const FIELD_LEN: u32 = 1;
/// Image designation character, present in every record type except 1.
pub const FIELD_IDC: u32 = 2;
/// Transaction content (directory) in the header.
pub const FIELD_CNT: u32 = 3;
/// Directory of character sets in the header.
pub const FIELD_DCS: u32 = 15;
/// Image or payload data in tagged records.
pub const FIELD_DATA: u32 = 999;
/// Signature image data in type-8 records.
pub const FIELD_SIGNATURE_DATA: u32 = 8;

/// The payload kind a field slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Binary,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Binary => write!(f, "binary"),
        }
    }
}

/// Returns the binary payload field number for a record type.
pub fn data_field(record_type: u32) -> u32 {
    match record_type {
        8 => FIELD_SIGNATURE_DATA,
        _ => FIELD_DATA,
    }
}

/// Returns the payload kind accepted by `record_type.field`.
pub fn field_kind(record_type: u32, field: u32) -> FieldKind {
    if record_type != HEADER_RECORD_TYPE && field == data_field(record_type) {
        FieldKind::Binary
    } else {
        FieldKind::Text
    }
}

/// Short mnemonic for the reserved fields, used in log output.
pub fn field_mnemonic(record_type: u32, field: u32) -> &'static str {
    match (record_type, field) {
        (_, FIELD_LEN) => "LEN",
        (HEADER_RECORD_TYPE, 2) => "VER",
        (HEADER_RECORD_TYPE, FIELD_CNT) => "CNT",
        (HEADER_RECORD_TYPE, FIELD_DCS) => "DCS",
        (HEADER_RECORD_TYPE, _) => "-",
        (_, FIELD_IDC) => "IDC",
        (rt, f) if f == data_field(rt) => "DATA",
        _ => "-",
    }
}
