//! Modules
//!
//! Per-module field parsers and the dispatch over module codes.
//!
//! ## Responsibilities
//! - Resolve a segment to a `ModuleCode` (canonical or compact form)
//! - Enforce each module's minimum field count
//! - Turn fixed field positions into typed attributes
//!
//! Parsers are pure: they read the field list and return a `ModuleDelta`.
//! The decoder merges the delta into the final `ModuleRecord`.
//!
//! ## Module Codes
//! | Code | Min | Kind |
//! |------|-----|------|
//! | K1   | 3   | Core |
//! | LU   | 4   | Luminance |
//! | T1   | 4   | Temperature |
//! | H1   | 5   | Humidity |
//! | GPS  | 8   | GPS location |
//! | P1   | 7   | GSM cell |
//! | B    | 9   | Battery |
//! | GC   | 5   | Generic configuration |
//! | AV   | 4   | Actuator |
//! | L1   | 6   | LED |
//! | GM   | 5   | Generic module |
//! | BT   | 5   | Black Button |

pub mod black_button;
mod sensors;
mod settings;

use crate::collab::{HumidityCalibration, RequestIdGenerator};
use crate::config::SleepPolicy;
use crate::error::{DecodeError, Result};
use crate::model::{Attribute, ModuleRecord, SleepDirective};
use crate::protocol::{field, parse_sleep, tokenize};

/// Module codes understood by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleCode {
    Core,
    Luminance,
    Temperature,
    Humidity,
    Gps,
    Gsm,
    Battery,
    GenericConfig,
    Actuator,
    Led,
    GenericModule,
    BlackButton,
}

impl ModuleCode {
    /// Every supported code, in table order
    pub const ALL: [ModuleCode; 12] = [
        ModuleCode::Core,
        ModuleCode::Luminance,
        ModuleCode::Temperature,
        ModuleCode::Humidity,
        ModuleCode::Gps,
        ModuleCode::Gsm,
        ModuleCode::Battery,
        ModuleCode::GenericConfig,
        ModuleCode::Actuator,
        ModuleCode::Led,
        ModuleCode::GenericModule,
        ModuleCode::BlackButton,
    ];

    /// Look up a wire code; case-sensitive
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "K1" => Some(ModuleCode::Core),
            "LU" => Some(ModuleCode::Luminance),
            "T1" => Some(ModuleCode::Temperature),
            "H1" => Some(ModuleCode::Humidity),
            "GPS" => Some(ModuleCode::Gps),
            "P1" => Some(ModuleCode::Gsm),
            "B" => Some(ModuleCode::Battery),
            "GC" => Some(ModuleCode::GenericConfig),
            "AV" => Some(ModuleCode::Actuator),
            "L1" => Some(ModuleCode::Led),
            "GM" => Some(ModuleCode::GenericModule),
            "BT" => Some(ModuleCode::BlackButton),
            _ => None,
        }
    }

    /// Wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleCode::Core => "K1",
            ModuleCode::Luminance => "LU",
            ModuleCode::Temperature => "T1",
            ModuleCode::Humidity => "H1",
            ModuleCode::Gps => "GPS",
            ModuleCode::Gsm => "P1",
            ModuleCode::Battery => "B",
            ModuleCode::GenericConfig => "GC",
            ModuleCode::Actuator => "AV",
            ModuleCode::Led => "L1",
            ModuleCode::GenericModule => "GM",
            ModuleCode::BlackButton => "BT",
        }
    }

    /// Minimum number of fields, echoed id and code included
    pub fn min_fields(&self) -> usize {
        match self {
            ModuleCode::Core => 3,
            ModuleCode::Luminance | ModuleCode::Temperature | ModuleCode::Actuator => 4,
            ModuleCode::Humidity
            | ModuleCode::GenericConfig
            | ModuleCode::GenericModule
            | ModuleCode::BlackButton => 5,
            ModuleCode::Led => 6,
            ModuleCode::Gsm => 7,
            ModuleCode::Gps => 8,
            ModuleCode::Battery => 9,
        }
    }
}

/// Everything a parser may need besides the fields themselves
pub struct ParseContext<'a> {
    /// Stack id from the frame header
    pub stack_id: &'a str,
    pub sleep_policy: SleepPolicy,
    pub humidity: &'a dyn HumidityCalibration,
    pub ids: &'a dyn RequestIdGenerator,
}

/// What a module parser contributes to its record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDelta {
    pub attributes: Vec<Attribute>,
    pub queries: Vec<String>,
    pub sleep: Option<SleepDirective>,
    pub operation: Option<String>,
    pub request_id: Option<String>,
}

impl ModuleDelta {
    /// Delta carrying only a sleep directive
    pub fn with_sleep(sleep: SleepDirective) -> Self {
        Self {
            sleep: Some(sleep),
            ..Self::default()
        }
    }

    /// Finish the record for one segment
    pub fn into_record(self, id: &str, code: ModuleCode, stack_id: &str) -> ModuleRecord {
        ModuleRecord {
            id: id.to_string(),
            module: code.as_str().to_string(),
            attributes: self.attributes,
            queries: self.queries,
            sleep: self.sleep,
            stack_id: stack_id.to_string(),
            operation: self.operation,
            request_id: self.request_id,
        }
    }
}

/// Tokenize a segment and resolve its module code
///
/// Canonical segments carry the code in field 1. With `compact` enabled, a
/// segment whose field 0 is a code (`LU,142.86,0$`) is read as if the stack
/// id had been echoed in front of it.
///
/// The two forms collide when an echoed id spells a module code and the
/// real code is unknown: `GM,ZZ,1,2$` resolves as a compact `GM` segment,
/// not as an unsupported `ZZ`. Stacks that echo such ids need `compact`
/// disabled.
pub fn resolve<'a>(
    segment: &'a str,
    stack_id: &'a str,
    compact: bool,
) -> Result<(ModuleCode, Vec<&'a str>)> {
    let mut fields = tokenize(segment);

    if let Some(code) = fields.get(1).and_then(|c| ModuleCode::from_code(c)) {
        return Ok((code, fields));
    }

    if compact {
        if let Some(code) = fields.first().and_then(|c| ModuleCode::from_code(c)) {
            fields.insert(0, stack_id);
            return Ok((code, fields));
        }
    }

    Err(DecodeError::UnsupportedModule(segment.to_string()))
}

/// Parse one module's fields
///
/// Checks the minimum arity for `code`, then hands off to the module's
/// parser.
pub fn parse(code: ModuleCode, fields: &[&str], ctx: &ParseContext<'_>) -> Result<ModuleDelta> {
    if fields.len() < code.min_fields() {
        return Err(DecodeError::bad_payload(fields));
    }

    match code {
        ModuleCode::Core => sensors::core(fields, ctx),
        ModuleCode::Luminance => sensors::luminance(fields, ctx),
        ModuleCode::Temperature => sensors::temperature(fields, ctx),
        ModuleCode::Humidity => sensors::humidity(fields, ctx),
        ModuleCode::Gps => sensors::gps(fields, ctx),
        ModuleCode::Gsm => sensors::gsm(fields),
        ModuleCode::Battery => sensors::battery(fields, ctx),
        ModuleCode::GenericConfig => settings::generic_config(fields, ctx),
        ModuleCode::Actuator => settings::actuator(fields, ctx),
        ModuleCode::Led => settings::led(fields, ctx),
        ModuleCode::GenericModule => settings::generic_module(fields, ctx),
        ModuleCode::BlackButton => black_button::parse(fields, ctx),
    }
}

/// Read the sleep directive at `index`
fn sleep_at(fields: &[&str], index: usize, policy: SleepPolicy) -> Result<SleepDirective> {
    parse_sleep(field(fields, index)?, policy).ok_or_else(|| DecodeError::bad_payload(fields))
}
