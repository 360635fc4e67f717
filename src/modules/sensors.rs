//! Sensor modules
//!
//! Core, luminance, temperature, humidity, GPS, GSM and battery reports.
//! Arity has already been checked by `modules::parse`; field access still
//! goes through the bounds-checked `field` helper.

use super::{sleep_at, ModuleDelta, ParseContext};
use crate::error::{DecodeError, Result};
use crate::model::{Attribute, AttributeType};
use crate::protocol::field;

/// Datum reported for GPS positions
pub const GPS_DATUM: &str = "WGS84";

/// `K1`: sleep directive only
pub(super) fn core(fields: &[&str], ctx: &ParseContext<'_>) -> Result<ModuleDelta> {
    tracing::debug!(?fields, "Parsing Core module");
    Ok(ModuleDelta::with_sleep(sleep_at(fields, 2, ctx.sleep_policy)?))
}

/// `LU`: luminance reading
pub(super) fn luminance(fields: &[&str], ctx: &ParseContext<'_>) -> Result<ModuleDelta> {
    tracing::debug!(?fields, "Parsing Luminance module");
    let mut delta = ModuleDelta::with_sleep(sleep_at(fields, 3, ctx.sleep_policy)?);
    delta.attributes.push(Attribute::float("luminance", field(fields, 2)?));
    Ok(delta)
}

/// `T1`: temperature reading
pub(super) fn temperature(fields: &[&str], ctx: &ParseContext<'_>) -> Result<ModuleDelta> {
    tracing::debug!(?fields, "Parsing Temperature module");
    let mut delta = ModuleDelta::with_sleep(sleep_at(fields, 3, ctx.sleep_policy)?);
    delta.attributes.push(Attribute::float("temperature", field(fields, 2)?));
    Ok(delta)
}

/// `H1`: calibrated humidity plus the raw temperature it was derived from
pub(super) fn humidity(fields: &[&str], ctx: &ParseContext<'_>) -> Result<ModuleDelta> {
    tracing::debug!(?fields, "Parsing Humidity module");
    let raw_temperature = field(fields, 2)?;
    let raw_humidity = field(fields, 3)?;

    let humidity = ctx.humidity.calibrate(raw_temperature, raw_humidity)?;
    if !humidity.is_finite() {
        return Err(DecodeError::Calibration(format!(
            "non-finite humidity {} from ({}, {})",
            humidity, raw_temperature, raw_humidity
        )));
    }

    let mut delta = ModuleDelta::with_sleep(sleep_at(fields, 4, ctx.sleep_policy)?);
    delta.attributes.push(Attribute::float("humidity", render_float(humidity)));
    delta.attributes.push(Attribute::float("temperature", raw_temperature));
    Ok(delta)
}

/// `GPS`: position, speed, orientation and altitude
pub(super) fn gps(fields: &[&str], ctx: &ParseContext<'_>) -> Result<ModuleDelta> {
    tracing::debug!(?fields, "Parsing GPS module");
    let position = format!("{},{}", field(fields, 2)?, field(fields, 3)?);

    let mut delta = ModuleDelta::with_sleep(sleep_at(fields, 7, ctx.sleep_policy)?);
    delta.attributes.push(
        Attribute::coords("position", position).with_metadata(
            "location",
            AttributeType::String,
            GPS_DATUM,
        ),
    );
    delta.attributes.push(Attribute::float("speed", field(fields, 4)?));
    delta.attributes.push(Attribute::float("orientation", field(fields, 5)?));
    delta.attributes.push(Attribute::float("altitude", field(fields, 6)?));
    Ok(delta)
}

/// `P1`: serving GSM cell; reports no sleep directive
pub(super) fn gsm(fields: &[&str]) -> Result<ModuleDelta> {
    tracing::debug!(?fields, "Parsing GSM module");
    Ok(ModuleDelta {
        attributes: vec![
            Attribute::integer("mcc", field(fields, 2)?),
            Attribute::integer("mnc", field(fields, 3)?),
            Attribute::integer("lac", field(fields, 4)?),
            Attribute::string("cellid", field(fields, 5)?),
            Attribute::integer("dbm", field(fields, 6)?),
        ],
        ..ModuleDelta::default()
    })
}

/// `B`: battery voltage and charger state flags
pub(super) fn battery(fields: &[&str], ctx: &ParseContext<'_>) -> Result<ModuleDelta> {
    tracing::debug!(?fields, "Parsing Battery module");
    let mut delta = ModuleDelta::with_sleep(sleep_at(fields, 8, ctx.sleep_policy)?);
    delta.attributes.push(Attribute::float("voltage", field(fields, 2)?));

    // "desconnection" is the name the broker entities already use
    let flags = ["state", "charger", "charging", "mode", "desconnection"];
    for (offset, name) in flags.into_iter().enumerate() {
        delta
            .attributes
            .push(Attribute::integer(name, field(fields, 3 + offset)?));
    }
    Ok(delta)
}

/// Render a number the way the broker's JavaScript side prints it
///
/// Plain decimal in `[1e-6, 1e21)`, otherwise exponent form with an explicit
/// sign (`1e+21`, `1.5e-7`). Zero is always `0`.
fn render_float(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&value.abs()) {
        return value.to_string();
    }

    let exp = format!("{:e}", value);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exp,
    }
}
