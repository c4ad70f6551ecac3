//! Foundational data structures, error types, and field slot definitions.

pub mod catalog;
pub mod charset;
pub mod error;
pub mod models;
