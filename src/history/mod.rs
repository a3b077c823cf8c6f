//! Change history core: tracked fields, diff engine, value parsing
//!
//! The diff engine is a pure function over two value snapshots; the ledger
//! that persists its output lives in `store::history`. This module also
//! hosts the one shared helper for reading numbers back out of ledger
//! strings - every history aggregate must go through it instead of parsing
//! ad hoc.

mod diff;

pub use diff::{diff, ApiarySnapshot, ChangeDescriptor, TrackedField};

/// Parse a ledger value string as an integer, defaulting to zero
///
/// The ledger is free text by design: rows may be empty (null marker),
/// decimal ("3.5", truncated toward zero) or garbage from before a schema
/// change. None of these are errors; they all read as 0 where noted and
/// decimals keep their integer part.
pub fn parse_history_int(value: &str) -> i64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return n;
    }
    trimmed.parse::<f64>().map(|f| f.trunc() as i64).unwrap_or(0)
}
