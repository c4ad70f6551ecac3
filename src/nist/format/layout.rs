//! Fixed-offset header tables for the binary image record families.
//!
//! Every layout starts with a 4-byte big-endian record length at offset 0.
//! The remaining slots are listed below; the image payload follows the header
//! and runs to the declared length.
//!
//! ```text
//! Generic (types 3-6), 18 bytes:
//!   IDC@4 IMP@5 FGP[6]@6 ISR@12 HLL(2)@13 VLL(2)@15 GCA@17 | DATA@18
//!
//! Extended (type 7), 33 bytes:
//!   IDC@4 IMP@5 FGP[6]@6 IMT@12 IMD(2)@13 PCN(2)@15 RES[11]@17
//!   HLL(2)@28 VLL(2)@30 GCA@32 | DATA@33
//!
//! Signature (type 8), 12 bytes:
//!   IDC@4 SIG@5 SRT@6 ISR@7 HLL(2)@8 VLL(2)@10 | DATA@12
//! ```

use crate::nist::types::catalog::{FIELD_DATA, FIELD_SIGNATURE_DATA};

/// Width of the leading record length.
pub const LENGTH_WIDTH: usize = 4;

/// Filler for unused finger-position slots.
pub const UNUSED_POSITION: u8 = 255;

/// How a fixed slot is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// One unsigned byte.
    Byte,
    /// Big-endian unsigned 16-bit integer.
    Word,
    /// `count` single bytes stored as one `RS`-separated text value. Trailing
    /// slots equal to `sentinel` are unused.
    Group { count: usize, sentinel: Option<u8> },
}

impl SlotKind {
    pub fn width(&self) -> usize {
        match self {
            SlotKind::Byte => 1,
            SlotKind::Word => 2,
            SlotKind::Group { count, .. } => *count,
        }
    }
}

/// A single fixed slot in a binary header.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub field: u32,
    pub name: &'static str,
    pub offset: usize,
    pub kind: SlotKind,
}

const fn slot(field: u32, name: &'static str, offset: usize, kind: SlotKind) -> Slot {
    Slot { field, name, offset, kind }
}

const FGP: SlotKind = SlotKind::Group {
    count: 6,
    sentinel: Some(UNUSED_POSITION),
};

/// Offset table for one record family.
#[derive(Debug)]
pub struct Layout {
    pub name: &'static str,
    /// Offset of the image payload, i.e. the header size.
    pub header_len: usize,
    /// Field number holding the image payload.
    pub data_field: u32,
    /// Fixed slots after the record length, ascending by offset.
    pub slots: &'static [Slot],
}

pub static GENERIC: Layout = Layout {
    name: "generic",
    header_len: 18,
    data_field: FIELD_DATA,
    slots: &[
        slot(2, "IDC", 4, SlotKind::Byte),
        slot(3, "IMP", 5, SlotKind::Byte),
        slot(4, "FGP", 6, FGP),
        slot(5, "ISR", 12, SlotKind::Byte),
        slot(6, "HLL", 13, SlotKind::Word),
        slot(7, "VLL", 15, SlotKind::Word),
        slot(8, "GCA", 17, SlotKind::Byte),
    ],
};

pub static EXTENDED: Layout = Layout {
    name: "extended",
    header_len: 33,
    data_field: FIELD_DATA,
    slots: &[
        slot(2, "IDC", 4, SlotKind::Byte),
        slot(3, "IMP", 5, SlotKind::Byte),
        slot(4, "FGP", 6, FGP),
        slot(5, "IMT", 12, SlotKind::Byte),
        slot(6, "IMD", 13, SlotKind::Word),
        slot(7, "PCN", 15, SlotKind::Word),
        slot(8, "RES", 17, SlotKind::Group { count: 11, sentinel: None }),
        slot(9, "HLL", 28, SlotKind::Word),
        slot(10, "VLL", 30, SlotKind::Word),
        slot(11, "GCA", 32, SlotKind::Byte),
    ],
};

pub static SIGNATURE: Layout = Layout {
    name: "signature",
    header_len: 12,
    data_field: FIELD_SIGNATURE_DATA,
    slots: &[
        slot(2, "IDC", 4, SlotKind::Byte),
        slot(3, "SIG", 5, SlotKind::Byte),
        slot(4, "SRT", 6, SlotKind::Byte),
        slot(5, "ISR", 7, SlotKind::Byte),
        slot(6, "HLL", 8, SlotKind::Word),
        slot(7, "VLL", 10, SlotKind::Word),
    ],
};

/// Returns the fixed-offset layout for a record type, or `None` for tagged
/// text records.
pub fn for_record_type(record_type: u32) -> Option<&'static Layout> {
    match record_type {
        3..=6 => Some(&GENERIC),
        7 => Some(&EXTENDED),
        8 => Some(&SIGNATURE),
        _ => None,
    }
}
