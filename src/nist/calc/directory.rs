//! The header's CNT field: a table of contents of every record in the file.
//!
//! ```text
//! 1<US>3<RS>2<US>00<RS>4<US>01<RS>4<US>02
//! ```
//! The first pair is the header itself with the count of records that follow.
//! Each later pair is a record type and that record's IDC.

use log::debug;

use crate::nist::format::grammar;
use crate::nist::types::catalog::{FIELD_CNT, HEADER_RECORD_TYPE};
use crate::nist::types::error::{NistError, Result};
use crate::nist::types::models::{NistFile, RecordBuilder};

/// Builds the CNT value for the records currently in `file`.
///
/// Record types are listed in ascending order and records of one type in
/// list order. A record without an IDC gets its position in the list.
pub fn build_directory(file: &NistFile) -> String {
    let mut pairs: Vec<Vec<String>> = Vec::new();
    for record_type in file.record_types().filter(|t| *t != HEADER_RECORD_TYPE) {
        for (i, record) in file.records(record_type).iter().enumerate() {
            let idc = match record.idc() {
                Some(idc) => format_idc(idc),
                None => format!("{:02}", i),
            };
            pairs.push(vec![record_type.to_string(), idc]);
        }
    }
    pairs.insert(0, vec![HEADER_RECORD_TYPE.to_string(), pairs.len().to_string()]);
    grammar::join_groups(&pairs)
}

/// Rewrites the header's CNT field from the file's records.
pub fn update_directory(file: &mut NistFile) -> Result<()> {
    let header = file.header().ok_or(NistError::MissingHeader)?;
    let directory = build_directory(file);
    debug!("Directory recomputed: {:?}", directory);
    let header = RecordBuilder::from(header).text(FIELD_CNT, directory)?.build();
    file.replace(header);
    Ok(())
}

/// Splits a CNT value into `(record type, IDC)` pairs, header pair included.
pub fn parse_directory(directory: &str) -> Result<Vec<(u32, String)>> {
    grammar::split_groups(directory)
        .into_iter()
        .map(|group| {
            let record_type = group[0].trim().parse::<u32>().map_err(|_| {
                NistError::encode(
                    HEADER_RECORD_TYPE,
                    format!("malformed directory entry {:?}", group.join("/")),
                )
            })?;
            let idc = group.get(1).map(|s| s.trim().to_string()).unwrap_or_default();
            Ok((record_type, idc))
        })
        .collect()
}

fn format_idc(idc: &str) -> String {
    match idc.trim().parse::<u32>() {
        Ok(n) => format!("{:02}", n),
        Err(_) => idc.trim().to_string(),
    }
}
