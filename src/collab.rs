//! External collaborators
//!
//! The decoder delegates two things it does not own: turning raw humidity
//! readings into a calibrated value, and minting request ids for Black
//! Button `Create` operations. Both are injected through `Decoder`.
//!
//! Closures implement either trait, which keeps test doubles one-liners:
//!
//! ```rust
//! use ttdecode::{Decoder, DecoderConfig};
//!
//! let decoder = Decoder::with_collaborators(
//!     DecoderConfig::default(),
//!     |_t: &str, _h: &str| -> ttdecode::Result<f64> { Ok(50.0) },
//!     || -> ttdecode::Result<String> { Ok("req-1".to_string()) },
//! )
//! .unwrap();
//! # let _ = decoder;
//! ```

use uuid::Uuid;

use crate::error::{DecodeError, Result};

/// Humidity calibration from raw stack readings
pub trait HumidityCalibration: Send + Sync {
    fn calibrate(&self, raw_temperature: &str, raw_humidity: &str) -> Result<f64>;
}

impl<F> HumidityCalibration for F
where
    F: Fn(&str, &str) -> Result<f64> + Send + Sync,
{
    fn calibrate(&self, raw_temperature: &str, raw_humidity: &str) -> Result<f64> {
        self(raw_temperature, raw_humidity)
    }
}

/// Source of globally unique request ids
pub trait RequestIdGenerator: Send + Sync {
    fn generate(&self) -> Result<String>;
}

impl<F> RequestIdGenerator for F
where
    F: Fn() -> Result<String> + Send + Sync,
{
    fn generate(&self) -> Result<String> {
        self()
    }
}

/// Calibration that reports the raw humidity reading as-is
///
/// Used when no sensor-specific curve is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawHumidity;

impl HumidityCalibration for RawHumidity {
    fn calibrate(&self, _raw_temperature: &str, raw_humidity: &str) -> Result<f64> {
        raw_humidity.trim().parse::<f64>().map_err(|e| {
            DecodeError::Calibration(format!("raw humidity {:?}: {}", raw_humidity, e))
        })
    }
}

/// Random (v4) UUID request ids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl RequestIdGenerator for UuidGenerator {
    fn generate(&self) -> Result<String> {
        Ok(Uuid::new_v4().to_string())
    }
}
