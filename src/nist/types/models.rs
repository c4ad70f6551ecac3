//! Core data structures for decoded ANSI/NIST-ITL transactions.
//!
//! This module defines the in-memory model shared by the codecs:
//! - Field values (text or raw bytes)
//! - Records and their builder
//! - Files, their builder and build-time callbacks
//! - Codec options

use std::collections::BTreeMap;
use std::fmt;

use log::trace;

use super::catalog::{self, FieldKind, HEADER_RECORD_TYPE};
use super::charset::Charset;
use super::error::{NistError, Result};
use crate::nist::format::grammar;

/// The payload held by a single field slot.
#[derive(Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text, possibly holding `RS`-separated groups of `US`-separated items.
    Text(String),
    /// Raw bytes copied verbatim, e.g. an image.
    Binary(Vec<u8>),
}

impl FieldValue {
    /// Builds a text value from groups of items.
    pub fn from_groups<S: AsRef<str>>(groups: &[Vec<S>]) -> Self {
        FieldValue::Text(grammar::join_groups(groups))
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Binary(_) => FieldKind::Binary,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Binary(_) => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Binary(b) => Some(b),
            FieldValue::Text(_) => None,
        }
    }

    /// Splits a text value into groups of items. Binary values have none.
    pub fn groups(&self) -> Vec<Vec<&str>> {
        self.as_text().map(grammar::split_groups).unwrap_or_default()
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "Text({:?})", s),
            FieldValue::Binary(b) => write!(f, "Binary({} bytes)", b.len()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        FieldValue::Binary(value)
    }
}

/// One record of a transaction: a record type plus its fields in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    record_type: u32,
    fields: Vec<(u32, FieldValue)>,
}

impl Record {
    pub fn record_type(&self) -> u32 {
        self.record_type
    }

    /// Fields in serialization order.
    pub fn fields(&self) -> &[(u32, FieldValue)] {
        &self.fields
    }

    pub fn field(&self, field: u32) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| *n == field).map(|(_, v)| v)
    }

    pub fn text(&self, field: u32) -> Option<&str> {
        self.field(field).and_then(FieldValue::as_text)
    }

    pub fn binary(&self, field: u32) -> Option<&[u8]> {
        self.field(field).and_then(FieldValue::as_binary)
    }

    pub fn has_field(&self, field: u32) -> bool {
        self.field(field).is_some()
    }

    /// The declared record length (field 1), if present and numeric.
    pub fn declared_len(&self) -> Option<u64> {
        self.text(catalog::FIELD_LEN)?.trim().parse().ok()
    }

    /// The image designation character (field 2). The header has none.
    pub fn idc(&self) -> Option<&str> {
        if self.record_type == HEADER_RECORD_TYPE {
            return None;
        }
        self.text(catalog::FIELD_IDC)
    }

    /// Returns true when this record's IDC matches `idc`.
    pub fn matches_idc(&self, idc: &str) -> bool {
        self.idc().is_some_and(|own| idc_eq(own, idc))
    }
}

/// Compares two IDCs numerically when both are numbers (`"01" == "1"`).
pub fn idc_eq(a: &str, b: &str) -> bool {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => a.trim() == b.trim(),
    }
}

/// Builder scoped to a single record type.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new(record_type: u32) -> Self {
        Self {
            record: Record {
                record_type,
                fields: Vec::new(),
            },
        }
    }

    pub fn record_type(&self) -> u32 {
        self.record.record_type
    }

    /// Sets a text field. Fails if the slot only accepts raw bytes.
    pub fn text(mut self, field: u32, value: impl Into<String>) -> Result<Self> {
        self.set(field, FieldValue::Text(value.into()))?;
        Ok(self)
    }

    /// Sets a text field from groups of items.
    pub fn groups<S: AsRef<str>>(self, field: u32, groups: &[Vec<S>]) -> Result<Self> {
        self.text(field, grammar::join_groups(groups))
    }

    /// Sets a binary field. Fails unless the slot is the record's payload slot.
    pub fn binary(mut self, field: u32, value: impl Into<Vec<u8>>) -> Result<Self> {
        self.set(field, FieldValue::Binary(value.into()))?;
        Ok(self)
    }

    /// Sets a field, checking the value kind against the slot.
    ///
    /// An existing field keeps its position. A new field goes before the first
    /// field with a higher number.
    pub fn set(&mut self, field: u32, value: FieldValue) -> Result<&mut Self> {
        let expected = catalog::field_kind(self.record.record_type, field);
        if value.kind() != expected {
            return Err(NistError::WrongFieldKind {
                record_type: self.record.record_type,
                field,
                expected,
            });
        }
        let fields = &mut self.record.fields;
        if let Some(slot) = fields.iter_mut().find(|(n, _)| *n == field) {
            slot.1 = value;
        } else {
            let at = fields.iter().position(|(n, _)| *n > field).unwrap_or(fields.len());
            fields.insert(at, (field, value));
        }
        Ok(self)
    }

    /// Removes a field if present.
    pub fn remove(mut self, field: u32) -> Self {
        self.record.fields.retain(|(n, _)| *n != field);
        self
    }

    /// Appends a decoded field as-is, keeping file order.
    pub(crate) fn push_decoded(&mut self, field: u32, value: FieldValue) {
        trace!(
            "Decoded {}.{:03} ({}): {:?}",
            self.record.record_type,
            field,
            catalog::field_mnemonic(self.record.record_type, field),
            value
        );
        if let Some(slot) = self.record.fields.iter_mut().find(|(n, _)| *n == field) {
            slot.1 = value;
        } else {
            self.record.fields.push((field, value));
        }
    }

    pub fn build(self) -> Record {
        self.record
    }
}

impl From<&Record> for RecordBuilder {
    /// Seeds a builder with a copy of an existing record.
    fn from(record: &Record) -> Self {
        Self {
            record: record.clone(),
        }
    }
}

/// A decoded transaction: records grouped by record type.
///
/// At most one type-1 header exists. Records of other types are told apart by
/// their IDC.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NistFile {
    records: BTreeMap<u32, Vec<Record>>,
}

impl NistFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// The transaction header (type 1), if present.
    pub fn header(&self) -> Option<&Record> {
        self.records.get(&HEADER_RECORD_TYPE).and_then(|list| list.first())
    }

    /// All records of a type, in insertion order.
    pub fn records(&self, record_type: u32) -> &[Record] {
        self.records.get(&record_type).map(Vec::as_slice).unwrap_or_default()
    }

    /// Record types present, ascending.
    pub fn record_types(&self) -> impl Iterator<Item = u32> + '_ {
        self.records.iter().filter(|(_, list)| !list.is_empty()).map(|(t, _)| *t)
    }

    /// All records, ascending by type.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values().flatten()
    }

    /// Total number of records, header included.
    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    /// Looks up a record by type and IDC. For the header the IDC is ignored.
    ///
    /// A record without an IDC is found by its position in the type's list,
    /// the same value the directory gives it.
    pub fn find(&self, record_type: u32, idc: &str) -> Option<&Record> {
        if record_type == HEADER_RECORD_TYPE {
            return self.header();
        }
        let list = self.records(record_type);
        position_of(list, idc).map(|idx| &list[idx])
    }

    /// Adds a record, replacing any record with the same type and IDC.
    pub fn insert(&mut self, record: Record) {
        let _ = self.replace(record);
    }

    /// Adds a record and returns the one it replaced, if any.
    pub fn replace(&mut self, record: Record) -> Option<Record> {
        let list = self.records.entry(record.record_type).or_default();
        let existing = if record.record_type == HEADER_RECORD_TYPE {
            (!list.is_empty()).then_some(0)
        } else {
            record
                .idc()
                .and_then(|idc| list.iter().position(|r| r.matches_idc(idc)))
        };
        match existing {
            Some(idx) => Some(std::mem::replace(&mut list[idx], record)),
            None => {
                list.push(record);
                None
            }
        }
    }

    /// Removes a record by type and IDC.
    pub fn remove(&mut self, record_type: u32, idc: &str) -> Option<Record> {
        let list = self.records.get_mut(&record_type)?;
        let idx = if record_type == HEADER_RECORD_TYPE {
            (!list.is_empty()).then_some(0)?
        } else {
            position_of(list, idc)?
        };
        let removed = list.remove(idx);
        if list.is_empty() {
            self.records.remove(&record_type);
        }
        Some(removed)
    }

    /// Replaces every record with the result of `f`.
    pub(crate) fn try_map_records<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&Record) -> Result<Option<Record>>,
    {
        for list in self.records.values_mut() {
            for record in list.iter_mut() {
                if let Some(updated) = f(record)? {
                    *record = updated;
                }
            }
        }
        Ok(())
    }
}

fn position_of(list: &[Record], idc: &str) -> Option<usize> {
    list.iter().position(|r| r.matches_idc(idc)).or_else(|| {
        let idx = idc.trim().parse::<usize>().ok()?;
        list.get(idx).filter(|r| r.idc().is_none()).map(|_| idx)
    })
}

/// Callback run on the draft file before it is handed out.
pub type BeforeBuild = Box<dyn FnMut(&mut NistFile) -> Result<()>>;
/// Callback run on the finished file.
pub type AfterBuild = Box<dyn FnMut(&NistFile) -> Result<()>>;

/// Assembles a [`NistFile`] and runs the caller's build-time callbacks.
#[derive(Default)]
pub struct NistFileBuilder {
    file: NistFile,
    before_build: Vec<BeforeBuild>,
    after_build: Vec<AfterBuild>,
}

impl NistFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder with the derived-field calculators enabled by `options`.
    pub fn with_options(options: &NistOptions) -> Self {
        crate::nist::calc::install(Self::new(), options)
    }

    /// Starts from a copy of an existing file.
    pub fn from_file(mut self, file: &NistFile) -> Self {
        self.file = file.clone();
        self
    }

    pub fn record(mut self, record: Record) -> Self {
        self.file.insert(record);
        self
    }

    pub fn add_record(&mut self, record: Record) {
        self.file.insert(record);
    }

    /// Appends a record without IDC de-duplication, keeping file order.
    pub(crate) fn push_decoded(&mut self, record: Record) {
        self.file.records.entry(record.record_type).or_default().push(record);
    }

    pub fn before_build(mut self, callback: impl FnMut(&mut NistFile) -> Result<()> + 'static) -> Self {
        self.before_build.push(Box::new(callback));
        self
    }

    pub fn after_build(mut self, callback: impl FnMut(&NistFile) -> Result<()> + 'static) -> Self {
        self.after_build.push(Box::new(callback));
        self
    }

    /// Runs the before-build callbacks, then the after-build callbacks, in
    /// registration order.
    pub fn build(mut self) -> Result<NistFile> {
        for callback in self.before_build.iter_mut() {
            callback(&mut self.file)?;
        }
        for callback in self.after_build.iter_mut() {
            callback(&self.file)?;
        }
        Ok(self.file)
    }
}

impl fmt::Debug for NistFileBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NistFileBuilder")
            .field("file", &self.file)
            .field("before_build", &self.before_build.len())
            .field("after_build", &self.after_build.len())
            .finish()
    }
}

/// Options consumed by every codec and calculator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NistOptions {
    /// Recompute every record's length field when a file is built.
    pub recompute_length: bool,
    /// Recompute the header's directory field when a file is built.
    pub recompute_directory: bool,
    /// Charset for text until the header's DCS field says otherwise.
    pub charset: Charset,
}

impl NistOptions {
    pub fn with_recompute_length(mut self, enabled: bool) -> Self {
        self.recompute_length = enabled;
        self
    }

    pub fn with_recompute_directory(mut self, enabled: bool) -> Self {
        self.recompute_directory = enabled;
        self
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }
}
