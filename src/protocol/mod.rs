//! Protocol Module
//!
//! Lexical layer of the Thinking Things stack protocol.
//!
//! ## Frame Format
//! ```text
//! #<stackId>[,<header fields>]#<segment 1>#<segment 2>#...
//! ```
//!
//! ### Segment Format
//! ```text
//! <echoed id>,<module code>,<field 2>,...,<value>$<condition>
//! ```
//!
//! - `#` separates the header from each module segment
//! - `,` separates the fields of one segment
//! - `$` separates a sleep value from its condition (trailing field only)
//!
//! Nothing here knows about module codes; see `crate::modules`.

mod fields;
mod frame;
mod sleep;

pub use fields::{field, tokenize, FIELD_SEPARATOR};
pub use frame::{split_frame, Frame, FRAME_SEPARATOR};
pub use sleep::{parse_sleep, SLEEP_SEPARATOR};
