//! # Tagged Text Records
//!
//! Codec for records made of `<type>.<field>:<value>` fields separated by `GS`
//! and terminated by `FS`. This covers the transaction header, type 2, and
//! every record type from 9 up.
//!
//! ## Layout
//! ```text
//! 2.001:57<GS>2.002:00<GS>2.003:...<FS>
//! ```
//! The first field is always the record length, counted over the whole record
//! including the terminator. A record may end with a raw payload field (999)
//! whose size is derived from that length, since the payload itself can
//! contain separator bytes.

use log::{trace, warn};

use crate::nist::codec::RecordCodec;
use crate::nist::format::cursor::Cursor;
use crate::nist::format::grammar::{self, FS, GS};
use crate::nist::format::sink::Sink;
use crate::nist::types::catalog::{self, FIELD_CNT, FIELD_DCS, FIELD_LEN};
use crate::nist::types::charset::Charset;
use crate::nist::types::error::{NistError, Result};
use crate::nist::types::models::{FieldValue, Record, RecordBuilder};

/// Codec for plain tagged records (type 2, 9 and up, unregistered types).
#[derive(Debug)]
pub struct TextCodec;

/// Codec for the type-1 transaction header.
///
/// Decoding also publishes the CNT field to the cursor's directory and
/// switches the cursor's charset when a DCS field is read.
#[derive(Debug)]
pub struct HeaderCodec;

impl RecordCodec for TextCodec {
    fn name(&self) -> &'static str {
        "text"
    }

    fn decode(&self, cursor: &mut Cursor<'_>, record_type: u32) -> Result<Record> {
        decode_tagged(cursor, record_type, false)
    }

    fn encode(&self, record: &Record, sink: &mut Sink) -> Result<()> {
        encode_tagged(record, sink, false)
    }
}

impl RecordCodec for HeaderCodec {
    fn name(&self) -> &'static str {
        "header"
    }

    fn decode(&self, cursor: &mut Cursor<'_>, record_type: u32) -> Result<Record> {
        decode_tagged(cursor, record_type, true)
    }

    fn encode(&self, record: &Record, sink: &mut Sink) -> Result<()> {
        encode_tagged(record, sink, true)
    }
}

fn decode_tagged(cursor: &mut Cursor<'_>, record_type: u32, is_header: bool) -> Result<Record> {
    cursor.set_record_type(record_type);
    let start = cursor.position();
    let mut builder = RecordBuilder::new(record_type);
    trace!("Decoding type-{} text record at byte {}", record_type, start);

    // Length field first
    let (found_type, field) = cursor.read_tag()?;
    check_record_type(record_type, found_type, start)?;
    if field != FIELD_LEN {
        return Err(NistError::FieldMismatch {
            record_type,
            expected: FIELD_LEN,
            found: field,
            position: start,
        });
    }
    let length_text = cursor.read_text_value()?;
    let declared_len = length_text
        .trim()
        .parse::<usize>()
        .map_err(|_| cursor.error(format!("non-numeric record length {:?}", length_text)))?;
    builder.push_decoded(FIELD_LEN, FieldValue::Text(length_text));

    let data_field = catalog::data_field(record_type);
    loop {
        match cursor.read_byte() {
            Ok(FS) => break,
            Ok(GS) => {}
            Ok(other) => return Err(cursor.error(format!("unexpected byte {:#04x} after field value", other))),
            Err(_) => return Err(cursor.error("missing record terminator")),
        }

        let tag_position = cursor.position();
        let (found_type, field) = cursor.read_tag()?;
        check_record_type(record_type, found_type, tag_position)?;

        if !is_header && field == data_field {
            let consumed = cursor.position() - start;
            let size = declared_len.saturating_sub(1).saturating_sub(consumed);
            if size > cursor.remaining() {
                warn!(
                    "Type-{} payload declares {} bytes but only {} remain; truncating",
                    record_type,
                    size,
                    cursor.remaining()
                );
            }
            let payload = cursor.take(size);
            builder.push_decoded(field, FieldValue::Binary(payload.to_vec()));
            if cursor.peek() == Some(FS) {
                cursor.advance(1);
            }
            break;
        }

        let value = cursor.read_text_value()?;
        if is_header {
            match field {
                FIELD_CNT => cursor.set_directory(&value),
                FIELD_DCS => cursor.switch_charset(Charset::from_dcs(&value)?),
                _ => {}
            }
        }
        builder.push_decoded(field, FieldValue::Text(value));
    }

    let record = builder.build();
    trace!(
        "Type-{} record decoded: {} fields, {} bytes",
        record_type,
        record.fields().len(),
        cursor.position() - start
    );
    Ok(record)
}

fn check_record_type(expected: u32, found: u32, position: usize) -> Result<()> {
    if expected != found {
        return Err(NistError::RecordTypeMismatch {
            expected,
            found,
            position,
        });
    }
    Ok(())
}

fn encode_tagged(record: &Record, sink: &mut Sink, is_header: bool) -> Result<()> {
    let record_type = record.record_type();
    if record.fields().is_empty() {
        return Err(NistError::encode(record_type, "record has no fields"));
    }
    sink.set_record_type(record_type);

    for (i, (field, value)) in record.fields().iter().enumerate() {
        if i > 0 {
            sink.put_byte(GS);
        }
        grammar::write_tag(sink.bytes_mut(), record_type, *field);
        match value {
            FieldValue::Text(text) => sink.put_text(text)?,
            FieldValue::Binary(bytes) => sink.put_bytes(bytes),
        }
        if is_header
            && *field == FIELD_DCS
            && let FieldValue::Text(dcs) = value
        {
            sink.switch_charset(Charset::from_dcs(dcs)?);
        }
    }
    sink.put_byte(FS);
    Ok(())
}
