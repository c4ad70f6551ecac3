//! Check character for transaction control numbers.
//!
//! A control number is a two-digit year followed by an eight-digit serial,
//! plus one check letter. The letter indexes `ZABCDEFGHJKLMNPQRTUVWXY` by the
//! ten-digit number modulo 23.
//!
//! Reference vector: year 24, serial 1995014 gives `2401995014V`.
// TODO: confirm the alphabet and modulus against the standard's annex before
// using generated control numbers in production submissions.

use crate::nist::types::catalog::HEADER_RECORD_TYPE;
use crate::nist::types::error::{NistError, Result};

const ALPHABET: &[u8; 23] = b"ZABCDEFGHJKLMNPQRTUVWXY";
const MAX_SERIAL: u32 = 99_999_999;

/// Computes the check letter for a year and serial.
pub fn check_character(year: u8, serial: u32) -> Result<char> {
    if year > 99 || serial > MAX_SERIAL {
        return Err(NistError::encode(
            HEADER_RECORD_TYPE,
            format!("control number components out of range: year {}, serial {}", year, serial),
        ));
    }
    let number = u64::from(year) * 100_000_000 + u64::from(serial);
    Ok(letter_for(number))
}

/// Builds the full eleven-character control number.
pub fn control_number(year: u8, serial: u32) -> Result<String> {
    let check = check_character(year, serial)?;
    Ok(format!("{:02}{:08}{}", year, serial, check))
}

/// Returns true when the trailing letter matches the first ten digits.
pub fn is_valid_control_number(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 11 || !bytes[..10].iter().all(u8::is_ascii_digit) {
        return false;
    }
    let number = bytes[..10]
        .iter()
        .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'));
    bytes[10].to_ascii_uppercase() as char == letter_for(number)
}

fn letter_for(number: u64) -> char {
    ALPHABET[(number % ALPHABET.len() as u64) as usize] as char
}
