//! Codec registry: which record codec handles which record type.
//!
//! | Record type | Codec |
//! |---|---|
//! | 1 | [`HeaderCodec`] |
//! | 3–6 | the generic [`Layout`](layout::Layout) |
//! | 7 | the extended [`Layout`](layout::Layout) |
//! | 8 | the signature [`Layout`](layout::Layout) |
//! | anything else | [`TextCodec`] |

use crate::nist::format::cursor::Cursor;
use crate::nist::format::layout;
use crate::nist::format::sink::Sink;
use crate::nist::format::text::{HeaderCodec, TextCodec};
use crate::nist::types::catalog::HEADER_RECORD_TYPE;
use crate::nist::types::charset::Charset;
use crate::nist::types::error::Result;
use crate::nist::types::models::Record;

/// Reads and writes one record of the byte stream.
pub trait RecordCodec: Sync {
    /// A short name used for debugging and logging.
    fn name(&self) -> &'static str;

    /// Decodes one record of `record_type` starting at the cursor position.
    fn decode(&self, cursor: &mut Cursor<'_>, record_type: u32) -> Result<Record>;

    /// Appends the serialized record to the sink.
    fn encode(&self, record: &Record, sink: &mut Sink) -> Result<()>;
}

static HEADER: HeaderCodec = HeaderCodec;
static TEXT: TextCodec = TextCodec;

/// Returns the codec registered for a record type.
pub fn codec_for(record_type: u32) -> &'static dyn RecordCodec {
    if record_type == HEADER_RECORD_TYPE {
        return &HEADER;
    }
    if let Some(layout) = layout::for_record_type(record_type) {
        return layout;
    }
    &TEXT
}

/// Decodes one record of `record_type` with its registered codec.
pub fn decode_record(cursor: &mut Cursor<'_>, record_type: u32) -> Result<Record> {
    codec_for(record_type).decode(cursor, record_type)
}

/// Serializes one record on its own with its registered codec.
pub fn encode_record(record: &Record, charset: Charset) -> Result<Vec<u8>> {
    let mut sink = Sink::new(charset);
    codec_for(record.record_type()).encode(record, &mut sink)?;
    Ok(sink.into_bytes())
}
