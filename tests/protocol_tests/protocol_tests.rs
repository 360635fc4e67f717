//! Protocol Tests
//!
//! Tests for frame splitting, field tokenizing and sleep directives.

use ttdecode::config::SleepPolicy;
use ttdecode::protocol::{parse_sleep, split_frame, tokenize};

// =============================================================================
// Frame Splitting Tests
// =============================================================================

#[test]
fn test_split_header_and_segments() {
    let frame = split_frame("#A1,X,Y#K1,300$#LU,142.86,0$");

    assert_eq!(frame.stack_id, "A1");
    assert_eq!(frame.header, vec!["A1", "X", "Y"]);
    assert_eq!(frame.segments, vec!["K1,300$", "LU,142.86,0$"]);
}

#[test]
fn test_split_without_second_marker() {
    // The remainder is both header and sole segment
    let frame = split_frame("#A1,K1,300$");

    assert_eq!(frame.stack_id, "A1");
    assert_eq!(frame.segments, vec!["A1,K1,300$"]);
}

#[test]
fn test_split_header_with_trailing_comma() {
    let frame = split_frame("#ITgAY,#0,K1,300$,");

    assert_eq!(frame.stack_id, "ITgAY");
    assert_eq!(frame.header, vec!["ITgAY", ""]);
    assert_eq!(frame.segments, vec!["0,K1,300$,"]);
}

#[test]
fn test_split_keeps_empty_segments() {
    let frame = split_frame("#A1##K1,300$#");

    assert_eq!(frame.segments, vec!["", "K1,300$", ""]);
}

#[test]
fn test_split_drops_any_first_character() {
    let frame = split_frame("XA1#K1,300$");
    assert_eq!(frame.stack_id, "A1");
}

#[test]
fn test_split_empty_payload() {
    let frame = split_frame("");

    assert_eq!(frame.stack_id, "");
    assert_eq!(frame.segments, vec![""]);
}

#[test]
fn test_split_multibyte_marker() {
    // Dropping the first character must respect char boundaries
    let frame = split_frame("é€#K1,1$");
    assert_eq!(frame.stack_id, "€");
    assert_eq!(frame.segments, vec!["K1,1$"]);
}

// =============================================================================
// Tokenizer Tests
// =============================================================================

#[test]
fn test_tokenize_no_trimming() {
    assert_eq!(tokenize(" 0, P1 ,x"), vec![" 0", " P1 ", "x"]);
}

#[test]
fn test_tokenize_keeps_dollar_fields_whole() {
    assert_eq!(
        tokenize("A1,BT,C,start,extra$cond"),
        vec!["A1", "BT", "C", "start", "extra$cond"]
    );
}

// =============================================================================
// Sleep Directive Tests
// =============================================================================

#[test]
fn test_sleep_value_and_condition() {
    let sleep = parse_sleep("300$ALWAYS", SleepPolicy::Lenient).unwrap();
    assert_eq!(sleep.value, "300");
    assert_eq!(sleep.condition, "ALWAYS");
}

#[test]
fn test_sleep_empty_condition() {
    let sleep = parse_sleep("300$", SleepPolicy::Lenient).unwrap();
    assert_eq!(sleep.value, "300");
    assert_eq!(sleep.condition, "");
}

#[test]
fn test_sleep_splits_on_first_dollar_only() {
    let sleep = parse_sleep("0$a$b", SleepPolicy::Lenient).unwrap();
    assert_eq!(sleep.value, "0");
    assert_eq!(sleep.condition, "a$b");
}

#[test]
fn test_sleep_missing_separator_lenient() {
    let sleep = parse_sleep("300", SleepPolicy::Lenient).unwrap();
    assert_eq!(sleep.value, "300");
    assert_eq!(sleep.condition, "");
}

#[test]
fn test_sleep_missing_separator_strict() {
    assert!(parse_sleep("300", SleepPolicy::Strict).is_none());
    assert!(parse_sleep("300$", SleepPolicy::Strict).is_some());
}

#[test]
fn test_sleep_missing_separator_legacy() {
    let sleep = parse_sleep("300", SleepPolicy::Legacy).unwrap();
    assert_eq!(sleep.value, "");
    assert_eq!(sleep.condition, "300");
}

#[test]
fn test_sleep_legacy_with_separator_unchanged() {
    let sleep = parse_sleep("300$ALWAYS", SleepPolicy::Legacy).unwrap();
    assert_eq!(sleep.value, "300");
    assert_eq!(sleep.condition, "ALWAYS");
}

#[test]
fn test_sleep_is_idempotent() {
    let first = parse_sleep("V$C", SleepPolicy::Lenient).unwrap();
    let second = parse_sleep("V$C", SleepPolicy::Lenient).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.value, "V");
    assert_eq!(first.condition, "C");
}
