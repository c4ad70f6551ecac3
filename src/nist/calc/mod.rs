//! Derived-field calculators.
//!
//! These patch fields whose values depend on the rest of the file and must be
//! correct before the file is serialized:
//! - [`length`]: record length (field 1) of every record
//! - [`directory`]: the header's CNT field
//! - [`check`]: the control-number check character

pub mod check;
pub mod directory;
pub mod length;

use log::warn;

use super::types::error::NistError;
use super::types::models::{NistFileBuilder, NistOptions};

/// Registers the calculators enabled by `options` as before-build callbacks.
///
/// The directory runs first since it changes the header's length.
pub fn install(builder: NistFileBuilder, options: &NistOptions) -> NistFileBuilder {
    let mut builder = builder;
    if options.recompute_directory {
        builder = builder.before_build(|file| match directory::update_directory(file) {
            Err(NistError::MissingHeader) => {
                warn!("No transaction header; directory not recomputed");
                Ok(())
            }
            other => other,
        });
    }
    if options.recompute_length {
        let charset = options.charset;
        builder = builder.before_build(move |file| length::update_file_lengths(file, charset));
    }
    builder
}
