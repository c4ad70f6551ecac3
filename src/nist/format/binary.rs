//! # Fixed-Offset Image Records
//!
//! Codec for the positional record families (types 3 to 8). One routine
//! serves every family; each [`Layout`] table is the codec for its family.
//!
//! Decoding tolerates truncated input: header slots past the end of the buffer
//! are left out, and a payload shorter than declared is clamped to what is
//! there. The cursor still moves by the declared length.

use log::{trace, warn};

use crate::nist::codec::RecordCodec;
use crate::nist::format::cursor::Cursor;
use crate::nist::format::grammar::{RS, US};
use crate::nist::format::layout::{LENGTH_WIDTH, Layout, Slot, SlotKind};
use crate::nist::format::sink::Sink;
use crate::nist::types::catalog::{FIELD_LEN, FieldKind};
use crate::nist::types::error::{NistError, Result};
use crate::nist::types::models::{FieldValue, Record, RecordBuilder};
use crate::nist::utils;

/// Each layout table is the codec for its record family.
impl RecordCodec for Layout {
    fn name(&self) -> &'static str {
        self.name
    }

    fn decode(&self, cursor: &mut Cursor<'_>, record_type: u32) -> Result<Record> {
        decode_fixed(self, cursor, record_type)
    }

    fn encode(&self, record: &Record, sink: &mut Sink) -> Result<()> {
        encode_fixed(self, record, sink)
    }
}

fn decode_fixed(layout: &Layout, cursor: &mut Cursor<'_>, record_type: u32) -> Result<Record> {
    cursor.set_record_type(record_type);
    let buf = cursor.buffer();
    let start = cursor.position();

    let declared_len = utils::read_number(buf, start, LENGTH_WIDTH)
        .ok_or_else(|| cursor.error("record length runs past the end of the buffer"))? as usize;
    trace!(
        "Decoding type-{} {} record at byte {}: declared length {}",
        record_type, layout.name, start, declared_len
    );

    let mut builder = RecordBuilder::new(record_type);
    builder.push_decoded(FIELD_LEN, FieldValue::Text(declared_len.to_string()));

    for slot in layout.slots {
        match read_slot(buf, start, slot) {
            Some(value) => builder.push_decoded(slot.field, FieldValue::Text(value)),
            None => trace!("{} at offset {} lies past the end of the buffer", slot.name, slot.offset),
        }
    }

    let data_start = start.saturating_add(layout.header_len);
    let expected = declared_len.saturating_sub(layout.header_len);
    if expected > 0 && data_start < buf.len() {
        let available = buf.len() - data_start;
        if expected > available {
            warn!(
                "Type-{} image declares {} bytes but only {} remain; clamping",
                record_type, expected, available
            );
        }
        let size = expected.min(available);
        builder.push_decoded(
            layout.data_field,
            FieldValue::Binary(buf[data_start..data_start + size].to_vec()),
        );
    }

    cursor.advance(declared_len);
    Ok(builder.build())
}

/// Reads one fixed slot as decimal text, or `None` if it is out of bounds.
fn read_slot(buf: &[u8], start: usize, slot: &Slot) -> Option<String> {
    let at = start.checked_add(slot.offset)?;
    match slot.kind {
        SlotKind::Byte | SlotKind::Word => {
            utils::read_number(buf, at, slot.kind.width()).map(|n| n.to_string())
        }
        SlotKind::Group { count, sentinel } => {
            if at >= buf.len() {
                return None;
            }
            let end = (at + count).min(buf.len());
            let mut bytes = &buf[at..end];
            if let Some(sentinel) = sentinel {
                while bytes.last() == Some(&sentinel) {
                    bytes = &bytes[..bytes.len() - 1];
                }
            }
            let items: Vec<String> = bytes.iter().map(u8::to_string).collect();
            Some(items.join(&(RS as char).to_string()))
        }
    }
}

fn encode_fixed(layout: &Layout, record: &Record, sink: &mut Sink) -> Result<()> {
    let record_type = record.record_type();
    let declared_len = record
        .declared_len()
        .ok_or_else(|| NistError::encode(record_type, "missing or non-numeric record length"))?;

    let mut header = vec![0u8; layout.header_len];
    if !utils::write_number(&mut header[..LENGTH_WIDTH], LENGTH_WIDTH, declared_len) {
        return Err(NistError::encode(
            record_type,
            format!("record length {} does not fit in {} bytes", declared_len, LENGTH_WIDTH),
        ));
    }

    for slot in layout.slots {
        let target = &mut header[slot.offset..slot.offset + slot.kind.width()];
        let text = match record.field(slot.field) {
            Some(FieldValue::Text(text)) => Some(text.as_str()),
            Some(FieldValue::Binary(_)) => {
                return Err(NistError::WrongFieldKind {
                    record_type,
                    field: slot.field,
                    expected: FieldKind::Text,
                });
            }
            None => None,
        };
        write_slot(target, slot, text).map_err(|message| NistError::encode(record_type, message))?;
    }

    let payload = match record.binary(layout.data_field) {
        Some(payload) => payload,
        None if declared_len > layout.header_len as u64 => {
            return Err(NistError::encode(
                record_type,
                format!("record length {} declares image data but the record has none", declared_len),
            ));
        }
        None => &[],
    };
    sink.put_bytes(&header);
    sink.put_bytes(payload);

    let written = (layout.header_len + payload.len()) as u64;
    if written != declared_len {
        warn!(
            "Type-{} record declares length {} but {} bytes were written",
            record_type, declared_len, written
        );
    }
    trace!("Encoded type-{} {} record: {} bytes", record_type, layout.name, written);
    Ok(())
}

/// Fills one fixed slot. A missing value leaves zeros, or the sentinel for
/// sentinel groups.
fn write_slot(target: &mut [u8], slot: &Slot, text: Option<&str>) -> std::result::Result<(), String> {
    match slot.kind {
        SlotKind::Byte | SlotKind::Word => {
            let Some(text) = text else { return Ok(()) };
            let value = parse_slot_number(slot, text)?;
            if !utils::write_number(target, slot.kind.width(), value) {
                return Err(format!("{} value {} does not fit in {} byte(s)", slot.name, value, slot.kind.width()));
            }
        }
        SlotKind::Group { count, sentinel } => {
            if let Some(sentinel) = sentinel {
                target.fill(sentinel);
            }
            let items: Vec<&str> = text
                .map(|t| t.split([RS as char, US as char]).filter(|s| !s.trim().is_empty()).collect())
                .unwrap_or_default();
            if items.len() > count {
                return Err(format!("{} holds at most {} entries, found {}", slot.name, count, items.len()));
            }
            for (dst, item) in target.iter_mut().zip(&items) {
                let value = parse_slot_number(slot, item)?;
                *dst = u8::try_from(value).map_err(|_| format!("{} entry {} does not fit in one byte", slot.name, value))?;
            }
        }
    }
    Ok(())
}

fn parse_slot_number(slot: &Slot, text: &str) -> std::result::Result<u64, String> {
    text.trim()
        .parse::<u64>()
        .map_err(|_| format!("{} value {:?} is not a number", slot.name, text))
}
