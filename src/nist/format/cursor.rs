//! Decode-time parse state shared by every record codec of one file.

use log::{debug, trace};

use crate::nist::format::grammar::{self, MAX_TOKEN_LEN, RS, TAG_FIELD_END, TAG_TYPE_END, US};
use crate::nist::types::charset::Charset;
use crate::nist::types::error::{NistError, Result};

/// Mutable parse state for a single top-to-bottom decode pass.
///
/// The position only ever moves forward. The directory is filled in by the
/// header codec and drained by the file reader, independently of the byte
/// position.
#[derive(Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    position: usize,
    record_type: u32,
    charset: Charset,
    directory: DirectoryQueue,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8], charset: Charset) -> Self {
        Self {
            buf,
            position: 0,
            record_type: 0,
            charset,
            directory: DirectoryQueue::default(),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.position)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.buf.len()
    }

    pub fn record_type(&self) -> u32 {
        self.record_type
    }

    pub fn set_record_type(&mut self, record_type: u32) {
        self.record_type = record_type;
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Replaces the charset used for all subsequent text reads.
    pub fn switch_charset(&mut self, charset: Charset) {
        if charset != self.charset {
            debug!("Switching decode charset at byte {}: {:?} -> {:?}", self.position, self.charset, charset);
        }
        self.charset = charset;
    }

    pub fn set_directory(&mut self, directory: &str) {
        debug!("Directory: {:?}", directory);
        self.directory = DirectoryQueue::new(directory);
    }

    /// Pops the next record type from the directory.
    pub fn next_directory_entry(&mut self) -> Option<Result<u32>> {
        let position = self.position;
        let record_type = self.record_type;
        self.directory.next().map(|entry| {
            entry.ok_or_else(|| NistError::Decode {
                record_type,
                position,
                message: "malformed record type in directory".to_string(),
            })
        })
    }

    /// Advances the position by `count` bytes, possibly past the buffer end.
    pub fn advance(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }

    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.position).copied()
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = self.peek().ok_or_else(|| self.error("unexpected end of buffer"))?;
        self.position += 1;
        Ok(byte)
    }

    /// Returns up to `count` bytes and advances past them.
    pub fn take(&mut self, count: usize) -> &'a [u8] {
        let buf = self.buf;
        let start = self.position.min(buf.len());
        let end = start.saturating_add(count).min(buf.len());
        self.position = self.position.max(end);
        &buf[start..end]
    }

    /// Reads a `<recordType>.<fieldNumber>:` tag.
    pub fn read_tag(&mut self) -> Result<(u32, u32)> {
        let record_type = self.read_token(TAG_TYPE_END)?;
        let field = self.read_token(TAG_FIELD_END)?;
        trace!("Tag {}.{:03} ends at byte {}", record_type, field, self.position);
        Ok((record_type, field))
    }

    /// Scans the digits up to `terminator` and consumes the terminator.
    fn read_token(&mut self, terminator: u8) -> Result<u32> {
        let buf = self.buf;
        let start = self.position;
        let window = &buf[start.min(buf.len())..];
        let end = window
            .iter()
            .take(MAX_TOKEN_LEN + 1)
            .position(|&b| b == terminator || grammar::is_separator(b));
        let end = match end {
            Some(end) if window[end] == terminator => end,
            Some(_) => return Err(self.error(format!("separator inside tag, expected '{}'", terminator as char))),
            None if window.len() <= MAX_TOKEN_LEN => {
                return Err(self.error(format!("end of buffer while scanning for '{}'", terminator as char)));
            }
            None => return Err(self.error(format!("tag token longer than {} bytes", MAX_TOKEN_LEN))),
        };
        let token = &window[..end];
        let value = grammar::parse_ascii_number(token)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| self.error(format!("non-numeric tag token {:?}", String::from_utf8_lossy(token))))?;
        self.position = start + end + 1;
        Ok(value)
    }

    /// Returns the raw bytes up to the next `GS`/`FS`, leaving the separator unread.
    ///
    /// Under UTF-16 the value is walked in two-byte code units, so only a
    /// separator at an even offset from the value start ends it.
    pub fn read_value_bytes(&mut self) -> &'a [u8] {
        let buf = self.buf;
        let start = self.position.min(buf.len());
        let value = &buf[start..];
        let step = self.charset.digit_width();
        let len = (0..value.len())
            .step_by(step)
            .find(|&i| grammar::is_value_end(value[i]))
            .unwrap_or(value.len());
        self.position = self.position.max(start + len);
        &value[..len]
    }

    /// Reads a text value with the active charset.
    pub fn read_text_value(&mut self) -> Result<String> {
        let start = self.position;
        let bytes = self.read_value_bytes();
        match self.charset.decode(bytes) {
            Some(text) => Ok(text.into_owned()),
            None => Err(NistError::Decode {
                record_type: self.record_type,
                position: start,
                message: format!("malformed {:?} text value", self.charset),
            }),
        }
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> NistError {
        NistError::Decode {
            record_type: self.record_type,
            position: self.position,
            message: message.into(),
        }
    }
}

/// Record types still to be decoded, consumed from the header's CNT value.
///
/// Each step reads the digits before the first `US`, then drops everything up
/// to and including the next `RS`.
#[derive(Debug, Default)]
pub struct DirectoryQueue {
    remaining: String,
}

impl DirectoryQueue {
    pub fn new(directory: &str) -> Self {
        Self {
            remaining: directory.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl Iterator for DirectoryQueue {
    /// `None` inside marks an entry whose record type is not a number.
    type Item = Option<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        let head_end = self
            .remaining
            .find([US as char, RS as char])
            .unwrap_or(self.remaining.len());
        let record_type = self.remaining[..head_end].trim().parse::<u32>().ok();

        match self.remaining.find(RS as char) {
            Some(idx) => {
                self.remaining.drain(..=idx);
            }
            None => self.remaining.clear(),
        }
        Some(record_type)
    }
}
