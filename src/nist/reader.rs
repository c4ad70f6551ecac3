//! Whole-file decoding driven by the header's directory.

use std::io::Read;

use log::{debug, info};

use super::codec;
use super::format::cursor::Cursor;
use super::types::catalog::HEADER_RECORD_TYPE;
use super::types::error::{NistError, Result};
use super::types::models::{NistFile, NistFileBuilder, NistOptions};

/// Decodes a complete transaction held in memory.
///
/// The header is decoded first; its CNT field then names every following
/// record type in file order. Derived fields are recomputed on build when
/// `options` asks for it.
///
/// # Errors
/// Returns an error if:
/// - The header is malformed
/// - Any later record fails to decode (wrapped in [`NistError::Format`])
/// - A build callback fails
pub fn decode_file(bytes: &[u8], options: &NistOptions) -> Result<NistFile> {
    info!("Decoding transaction: {} bytes", bytes.len());
    let mut cursor = Cursor::new(bytes, options.charset);
    let mut builder = NistFileBuilder::with_options(options);

    let header = codec::decode_record(&mut cursor, HEADER_RECORD_TYPE)?;
    builder.push_decoded(header);

    while let Some(entry) = cursor.next_directory_entry() {
        let position = cursor.position();
        let record_type = entry.map_err(|e| wrap(cursor.record_type(), position, e))?;
        if record_type == HEADER_RECORD_TYPE {
            continue;
        }
        let codec = codec::codec_for(record_type);
        debug!("Decoding type-{} record with {} codec at byte {}", record_type, codec.name(), position);
        let record = codec
            .decode(&mut cursor, record_type)
            .map_err(|e| wrap(record_type, position, e))?;
        builder.push_decoded(record);
    }

    if cursor.remaining() > 0 {
        debug!("{} trailing bytes after the last directory entry", cursor.remaining());
    }

    let file = builder.build()?;
    info!("Transaction decoded: {} records", file.record_count());
    Ok(file)
}

/// Reads a whole source into memory, then decodes it.
pub fn decode_reader<R: Read>(mut reader: R, options: &NistOptions) -> Result<NistFile> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_file(&bytes, options)
}

fn wrap(record_type: u32, position: usize, source: NistError) -> NistError {
    NistError::Format {
        record_type,
        position,
        source: Box::new(source),
    }
}
