//! Whole-file encoding in directory order.

use log::{debug, info};

use super::calc::directory;
use super::codec;
use super::format::sink::Sink;
use super::types::catalog::{FIELD_CNT, HEADER_RECORD_TYPE};
use super::types::error::{NistError, Result};
use super::types::models::{NistFile, NistOptions};

/// Serializes a transaction.
///
/// The header is written first. Every other record is written in the order
/// its `(type, IDC)` pair appears in the header's CNT field, regardless of the
/// order records were added to the file.
///
/// # Errors
/// Returns an error if:
/// - The file has no type-1 header
/// - The directory names a record that is not in the file
/// - A record cannot be serialized
pub fn encode_file(file: &NistFile, options: &NistOptions) -> Result<Vec<u8>> {
    let header = file.header().ok_or(NistError::MissingHeader)?;
    info!("Encoding transaction: {} records", file.record_count());

    let mut sink = Sink::new(options.charset);
    codec::codec_for(HEADER_RECORD_TYPE).encode(header, &mut sink)?;

    let entries = match header.text(FIELD_CNT) {
        Some(cnt) => directory::parse_directory(cnt)?,
        None => Vec::new(),
    };
    for (record_type, idc) in entries {
        if record_type == HEADER_RECORD_TYPE {
            continue;
        }
        let record = file
            .find(record_type, &idc)
            .ok_or_else(|| NistError::MissingRecord { record_type, idc: idc.clone() })?;
        let codec = codec::codec_for(record_type);
        debug!("Encoding type-{} record (IDC {}) with {} codec at byte {}", record_type, idc, codec.name(), sink.len());
        codec.encode(record, &mut sink)?;
    }

    info!("Transaction encoded: {} bytes", sink.len());
    Ok(sink.into_bytes())
}
