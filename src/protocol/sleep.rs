//! Sleep directive parser
//!
//! `<value>$<condition>`, split on the first `$` only.

use crate::config::SleepPolicy;
use crate::model::SleepDirective;

/// Separator between sleep value and condition
pub const SLEEP_SEPARATOR: char = '$';

/// Parse a raw sleep field
///
/// Value and condition are passed through untouched. Returns `None` only
/// when the field has no `$` and the policy is `Strict`.
pub fn parse_sleep(raw: &str, policy: SleepPolicy) -> Option<SleepDirective> {
    match raw.split_once(SLEEP_SEPARATOR) {
        Some((value, condition)) => Some(SleepDirective {
            value: value.to_string(),
            condition: condition.to_string(),
        }),
        None => match policy {
            SleepPolicy::Lenient => Some(SleepDirective {
                value: raw.to_string(),
                condition: String::new(),
            }),
            SleepPolicy::Strict => None,
            SleepPolicy::Legacy => Some(SleepDirective {
                value: String::new(),
                condition: raw.to_string(),
            }),
        },
    }
}
