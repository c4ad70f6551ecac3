//! Text encodings selectable through the header's character-set field.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, WINDOWS_1252};

use crate::nist::format::grammar::{RS, US};

use super::error::{NistError, Result};

/// Character set used for the text portions of a file.
///
/// The numeric codes are the character set indexes carried in the first item
/// of the header's DCS field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// 7-bit ASCII, the default for every file without a DCS field.
    #[default]
    Ascii,
    /// 8-bit Latin-1.
    Latin1,
    /// UTF-16, big-endian.
    Utf16,
    Utf8,
}

impl Charset {
    /// Maps a character set index to a charset.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Charset::Ascii),
            1 => Ok(Charset::Latin1),
            2 => Ok(Charset::Utf16),
            3 => Ok(Charset::Utf8),
            _ => Err(NistError::UnsupportedCharset(format!("character set index {}", code))),
        }
    }

    /// Parses the first item of a DCS field value (`"3<US>UTF-8"` and the like).
    pub fn from_dcs(value: &str) -> Result<Self> {
        let index = value
            .split([US as char, RS as char])
            .next()
            .unwrap_or_default()
            .trim();
        let code: u32 = index
            .parse()
            .map_err(|_| NistError::UnsupportedCharset(format!("'{}'", index)))?;
        Self::from_code(code)
    }

    pub fn code(&self) -> u32 {
        match self {
            Charset::Ascii => 0,
            Charset::Latin1 => 1,
            Charset::Utf16 => 2,
            Charset::Utf8 => 3,
        }
    }

    /// The `encoding_rs` encoding backing this charset.
    ///
    /// Both single-byte sets decode through windows-1252, which is a superset
    /// of ASCII and maps every byte, so round trips stay byte-identical.
    pub fn encoding(&self) -> &'static Encoding {
        match self {
            Charset::Ascii | Charset::Latin1 => WINDOWS_1252,
            Charset::Utf16 => UTF_16BE,
            Charset::Utf8 => UTF_8,
        }
    }

    /// Decodes raw bytes into text.
    ///
    /// Returns `None` when the bytes are malformed in this charset. Byte order
    /// marks are kept as U+FEFF so values re-encode byte for byte.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        let (text, had_errors) = self.encoding().decode_without_bom_handling(bytes);
        (!had_errors).then_some(text)
    }

    /// Encodes text into raw bytes.
    ///
    /// Returns `None` when the text holds characters this charset cannot
    /// represent.
    pub fn encode<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        match self {
            Charset::Utf8 => Some(Cow::Borrowed(text.as_bytes())),
            // encoding_rs never encodes into UTF-16
            Charset::Utf16 => Some(Cow::Owned(text.encode_utf16().flat_map(u16::to_be_bytes).collect())),
            Charset::Ascii | Charset::Latin1 => {
                let (bytes, _, had_errors) = self.encoding().encode(text);
                (!had_errors).then_some(bytes)
            }
        }
    }

    /// Width in bytes of one ASCII digit in this charset.
    pub fn digit_width(&self) -> usize {
        match self {
            Charset::Utf16 => 2,
            _ => 1,
        }
    }
}
