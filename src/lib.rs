//! # nist-codec
//!
//! A decoder and encoder for ANSI/NIST-ITL biometric transaction files.
//!
//! A transaction is a type-1 header followed by tagged text records (types 2,
//! 9 and up) and fixed-offset binary image records (types 3 to 8). The header's
//! CNT field lists every record, and it decides both the read order and the
//! write order.
//!
//! ```no_run
//! # use nist_codec::{decode_file, encode_file, NistOptions};
//! # let bytes: Vec<u8> = std::fs::read("transaction.eft").unwrap();
//! let options = NistOptions::default();
//! let file = decode_file(&bytes, &options).unwrap();
//! for record in file.iter() {
//!     println!("type {} with {} fields", record.record_type(), record.fields().len());
//! }
//! assert_eq!(encode_file(&file, &options).unwrap(), bytes);
//! ```
pub mod nist;

// Re-export the main types for convenience
pub use nist::{
    Charset,
    Cursor,
    FieldValue,
    NistError,
    NistFile,
    NistFileBuilder,
    NistOptions,
    Record,
    RecordBuilder,
    Result,
    calc,
    decode_file,
    decode_reader,
    encode_file,
    types::catalog,
};
