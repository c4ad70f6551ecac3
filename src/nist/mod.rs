//! Core ANSI/NIST-ITL codec module

pub mod calc;
pub mod codec;
pub mod format;
pub mod types;
mod reader;
mod utils;
mod writer;

pub use codec::{RecordCodec, codec_for, decode_record, encode_record};
pub use format::cursor::Cursor;
pub use format::sink::Sink;
pub use reader::{decode_file, decode_reader};
pub use types::charset::Charset;
pub use types::error::{NistError, Result};
pub use types::models::{FieldValue, NistFile, NistFileBuilder, NistOptions, Record, RecordBuilder};
pub use writer::encode_file;
