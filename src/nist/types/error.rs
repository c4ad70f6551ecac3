//! Custom error types for the nist-codec crate.

use thiserror::Error;

use super::catalog::FieldKind;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum NistError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The byte stream is malformed at the given position.
    #[error("Decode error in type-{record_type} record at byte {position}: {message}")]
    Decode {
        record_type: u32,
        position: usize,
        message: String,
    },

    /// A tag names a different record type than the one being decoded.
    #[error("Record type mismatch at byte {position}: expected type {expected}, found type {found}")]
    RecordTypeMismatch {
        expected: u32,
        found: u32,
        position: usize,
    },

    /// The first tag of a text record is not the length field.
    #[error("Field mismatch in type-{record_type} record at byte {position}: expected field {expected}, found field {found}")]
    FieldMismatch {
        record_type: u32,
        expected: u32,
        found: u32,
        position: usize,
    },

    /// A character set code that the codec cannot map to a text encoding.
    #[error("Unsupported character set: {0}")]
    UnsupportedCharset(String),

    /// A record could not be serialized.
    #[error("Encode error for type-{record_type} record: {message}")]
    Encode { record_type: u32, message: String },

    /// Encoding was requested for a file without a transaction header (type 1).
    #[error("Missing mandatory transaction header record (type 1)")]
    MissingHeader,

    /// The directory references a record absent from the file.
    #[error("Directory references type-{record_type} record with IDC {idc}, but no such record exists")]
    MissingRecord { record_type: u32, idc: String },

    /// A value of the wrong kind was targeted at a field slot.
    #[error("Field {record_type}.{field:03} only accepts {expected} values")]
    WrongFieldKind {
        record_type: u32,
        field: u32,
        expected: FieldKind,
    },

    /// A failure inside the record loop of a whole-file decode.
    #[error("Format error while decoding type-{record_type} record at byte {position}: {source}")]
    Format {
        record_type: u32,
        position: usize,
        #[source]
        source: Box<NistError>,
    },
}

impl NistError {
    pub(crate) fn encode(record_type: u32, message: impl Into<String>) -> Self {
        NistError::Encode {
            record_type,
            message: message.into(),
        }
    }
}

/// A convenience `Result` type alias using the crate's `NistError` type.
pub type Result<T> = std::result::Result<T, NistError>;
