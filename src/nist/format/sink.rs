//! Encode-time output state, the writing counterpart of [`Cursor`](super::cursor::Cursor).

use log::debug;

use crate::nist::types::charset::Charset;
use crate::nist::types::error::{NistError, Result};

/// Output buffer plus the charset used for text values.
#[derive(Debug, Default)]
pub struct Sink {
    out: Vec<u8>,
    charset: Charset,
    record_type: u32,
}

impl Sink {
    pub fn new(charset: Charset) -> Self {
        Self {
            out: Vec::new(),
            charset,
            record_type: 0,
        }
    }

    /// Sets the record type named in encode errors.
    pub fn set_record_type(&mut self, record_type: u32) {
        self.record_type = record_type;
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Replaces the charset used for all subsequent text writes.
    pub fn switch_charset(&mut self, charset: Charset) {
        if charset != self.charset {
            debug!("Switching encode charset at byte {}: {:?} -> {:?}", self.out.len(), self.charset, charset);
        }
        self.charset = charset;
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn put_byte(&mut self, byte: u8) {
        self.out.push(byte);
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    /// Writes text encoded with the active charset.
    pub fn put_text(&mut self, text: &str) -> Result<()> {
        let encoded = self.charset.encode(text).ok_or_else(|| {
            NistError::encode(
                self.record_type,
                format!("{:?} cannot be represented in {:?}", text, self.charset),
            )
        })?;
        self.out.extend_from_slice(&encoded);
        Ok(())
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut Vec<u8> {
        &mut self.out
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }
}
