//! Record length (field 1) calculation.
//!
//! For binary records the length is the header size plus the payload. For
//! text records it counts every byte of the serialized record, including the
//! digits of the length value itself, so it is found as a fixed point: adding
//! a digit to the length can push the total across a power of ten.

use log::debug;

use crate::nist::codec;
use crate::nist::format::grammar;
use crate::nist::format::layout;
use crate::nist::types::catalog::{FIELD_DCS, FIELD_LEN, HEADER_RECORD_TYPE};
use crate::nist::types::charset::Charset;
use crate::nist::types::error::Result;
use crate::nist::types::models::{NistFile, Record, RecordBuilder};

/// Computes the serialized length of `record`.
///
/// `charset` is the charset active when the record starts.
pub fn record_length(record: &Record, charset: Charset) -> Result<u64> {
    if let Some(layout) = layout::for_record_type(record.record_type()) {
        let payload = record.binary(layout.data_field).map_or(0, <[u8]>::len);
        return Ok((layout.header_len + payload) as u64);
    }

    // Measure with a one-digit placeholder, then solve for the digit count
    let digit_width = charset.digit_width() as u64;
    let provisional = RecordBuilder::from(record).text(FIELD_LEN, "0")?.build();
    let rest = codec::encode_record(&provisional, charset)?.len() as u64 - digit_width;
    let mut total = rest + digit_width;
    loop {
        let next = rest + digit_width * grammar::digit_count(total) as u64;
        if next == total {
            return Ok(total);
        }
        total = next;
    }
}

/// Returns a copy of `record` with its length field recomputed.
pub fn update_record_length(record: &Record, charset: Charset) -> Result<Record> {
    let length = record_length(record, charset)?;
    Ok(RecordBuilder::from(record).text(FIELD_LEN, length.to_string())?.build())
}

/// Recomputes the length field of every record in the file.
///
/// The header is measured with `charset`. Other records are measured with the
/// charset named by the header's DCS field, falling back to `charset`.
pub fn update_file_lengths(file: &mut NistFile, charset: Charset) -> Result<()> {
    let body_charset = match file.header().and_then(|h| h.text(FIELD_DCS)) {
        Some(dcs) => Charset::from_dcs(dcs)?,
        None => charset,
    };
    file.try_map_records(|record| {
        let start_charset = if record.record_type() == HEADER_RECORD_TYPE {
            charset
        } else {
            body_charset
        };
        let updated = update_record_length(record, start_charset)?;
        debug!(
            "Type-{} record length: {:?} -> {:?}",
            record.record_type(),
            record.text(FIELD_LEN),
            updated.text(FIELD_LEN)
        );
        Ok(Some(updated))
    })
}
