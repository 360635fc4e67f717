//! Frame splitting
//!
//! Separates the header from the module segments of a raw payload.

use super::fields::tokenize;

/// Separator between header and module segments
pub const FRAME_SEPARATOR: char = '#';

/// A raw payload split into header and segments
///
/// Borrowed from the payload; nothing is copied until a module parser
/// claims a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Stack id (header field 0)
    pub stack_id: &'a str,

    /// All header fields, stack id included
    pub header: Vec<&'a str>,

    /// Module segments in frame order
    pub segments: Vec<&'a str>,
}

/// Split a payload into a `Frame`
///
/// The first character is the protocol marker and is dropped whatever it
/// is. When the remainder has no further `#`, it is both the header and the
/// only segment (`#A1,K1,300$`). Never fails: an empty payload gives an
/// empty stack id and one empty segment.
pub fn split_frame(payload: &str) -> Frame<'_> {
    let mut chars = payload.chars();
    chars.next();
    let rest = chars.as_str();

    let (header, segments) = match rest.split_once(FRAME_SEPARATOR) {
        Some((header, modules)) => (header, modules.split(FRAME_SEPARATOR).collect()),
        None => (rest, vec![rest]),
    };

    let header = tokenize(header);
    let stack_id = header.first().copied().unwrap_or_default();

    Frame {
        stack_id,
        header,
        segments,
    }
}
