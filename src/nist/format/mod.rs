//! Byte-level format layer for ANSI/NIST-ITL transactions.
//!
//! # Module Organization
//!
//! - [`grammar`]: Separator bytes and the `<type>.<field>:` tag syntax
//! - [`cursor`]: Decode state shared by all records of one file
//! - [`sink`]: Encode state, the counterpart of the cursor
//! - [`text`]: Tagged text records, including the transaction header
//! - [`layout`]: Offset tables for the binary image records
//! - [`binary`]: The fixed-offset codec, implemented on those tables
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Type-1 header  │ ← text::HeaderCodec (fills the directory)
//! ├─────────────────┤
//! │  Tagged records │ ← text::TextCodec
//! │  (2, 9+)        │
//! ├─────────────────┤
//! │  Image records  │ ← layout::Layout (binary codec)
//! │  (3-8)          │
//! └─────────────────┘
//! ```

pub mod binary;
pub mod cursor;
pub mod grammar;
pub mod layout;
pub mod sink;
pub mod text;
