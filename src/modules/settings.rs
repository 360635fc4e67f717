//! Configuration-push modules
//!
//! These report the value a setting currently holds on the stack. Names
//! prefixed with `_TTcurrent_` mirror the settings the broker pushes down.

use super::{sleep_at, ModuleDelta, ParseContext};
use crate::error::Result;
use crate::model::Attribute;
use crate::protocol::field;

/// Prefix for attributes echoing a setting's current value
pub const CURRENT_PREFIX: &str = "_TTcurrent_";

/// `GC`: `_TTcurrent_<name>` = value
pub(super) fn generic_config(fields: &[&str], ctx: &ParseContext<'_>) -> Result<ModuleDelta> {
    tracing::debug!(?fields, "Parsing Generic Configuration module");
    let name = format!("{}{}", CURRENT_PREFIX, field(fields, 2)?);

    let mut delta = ModuleDelta::with_sleep(sleep_at(fields, 4, ctx.sleep_policy)?);
    delta.attributes.push(Attribute::string(name, field(fields, 3)?));
    Ok(delta)
}

/// `AV`: the melody is acknowledged, its value is not reported back
pub(super) fn actuator(fields: &[&str], ctx: &ParseContext<'_>) -> Result<ModuleDelta> {
    tracing::debug!(?fields, "Parsing Actuator module");
    let mut delta = ModuleDelta::with_sleep(sleep_at(fields, 3, ctx.sleep_policy)?);
    delta
        .attributes
        .push(Attribute::string(format!("{}melody", CURRENT_PREFIX), ""));
    Ok(delta)
}

/// `L1`: same as the actuator, for the LED colour
pub(super) fn led(fields: &[&str], ctx: &ParseContext<'_>) -> Result<ModuleDelta> {
    tracing::debug!(?fields, "Parsing LED module");
    let mut delta = ModuleDelta::with_sleep(sleep_at(fields, 5, ctx.sleep_policy)?);
    delta
        .attributes
        .push(Attribute::string(format!("{}color", CURRENT_PREFIX), ""));
    Ok(delta)
}

/// `GM`: free-form `<name>` = value
pub(super) fn generic_module(fields: &[&str], ctx: &ParseContext<'_>) -> Result<ModuleDelta> {
    tracing::debug!(?fields, "Parsing Generic module");
    let mut delta = ModuleDelta::with_sleep(sleep_at(fields, 4, ctx.sleep_policy)?);
    delta
        .attributes
        .push(Attribute::string(field(fields, 2)?, field(fields, 3)?));
    Ok(delta)
}
