//! Field tokenizer
//!
//! Splits a module segment into its raw comma-separated fields.

use crate::error::{DecodeError, Result};

/// Separator between the fields of a segment
pub const FIELD_SEPARATOR: char = ',';

/// Split a segment into ordered raw fields
///
/// No trimming and no coercion: `"0,P1,214,"` yields four fields, the last
/// one empty. An empty segment yields a single empty field.
pub fn tokenize(segment: &str) -> Vec<&str> {
    segment.split(FIELD_SEPARATOR).collect()
}

/// Bounds-checked field access
///
/// Fails with `BadPayload` carrying the whole field list when `index` is
/// out of range.
pub fn field<'a>(fields: &[&'a str], index: usize) -> Result<&'a str> {
    fields
        .get(index)
        .copied()
        .ok_or_else(|| DecodeError::bad_payload(fields))
}
