//! Module Parser Tests
//!
//! These tests verify, for each module code:
//! - Attributes produced, in order, with their types
//! - The sleep directive position
//! - Rejection below the minimum field count

use ttdecode::config::SleepPolicy;
use ttdecode::model::AttributeType;
use ttdecode::modules::{parse, ModuleCode, ModuleDelta, ParseContext};
use ttdecode::{DecodeError, RawHumidity, Result, UuidGenerator};

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_with(code: ModuleCode, segment: &str, policy: SleepPolicy) -> Result<ModuleDelta> {
    let fields: Vec<&str> = segment.split(',').collect();
    let ctx = ParseContext {
        stack_id: "A1",
        sleep_policy: policy,
        humidity: &RawHumidity,
        ids: &UuidGenerator,
    };
    parse(code, &fields, &ctx)
}

fn parse_ok(code: ModuleCode, segment: &str) -> ModuleDelta {
    parse_with(code, segment, SleepPolicy::Lenient).unwrap()
}

fn names(delta: &ModuleDelta) -> Vec<&str> {
    delta.attributes.iter().map(|a| a.name.as_str()).collect()
}

fn sleep_of(delta: &ModuleDelta) -> (&str, &str) {
    let sleep = delta.sleep.as_ref().expect("sleep directive");
    (sleep.value.as_str(), sleep.condition.as_str())
}

// =============================================================================
// Sensor Modules
// =============================================================================

#[test]
fn test_core_sleep_only() {
    let delta = parse_ok(ModuleCode::Core, "0,K1,300$");

    assert!(delta.attributes.is_empty());
    assert!(delta.queries.is_empty());
    assert_eq!(sleep_of(&delta), ("300", ""));
}

#[test]
fn test_luminance() {
    let delta = parse_ok(ModuleCode::Luminance, "4,LU,142.86,0$");

    assert_eq!(names(&delta), vec!["luminance"]);
    assert_eq!(delta.attributes[0].value, "142.86");
    assert_eq!(delta.attributes[0].kind, AttributeType::Float);
    assert_eq!(sleep_of(&delta), ("0", ""));
}

#[test]
fn test_temperature() {
    let delta = parse_ok(ModuleCode::Temperature, "4,T1,31.48,60$TEMP>30");

    assert_eq!(names(&delta), vec!["temperature"]);
    assert_eq!(delta.attributes[0].value, "31.48");
    assert_eq!(sleep_of(&delta), ("60", "TEMP>30"));
}

#[test]
fn test_humidity_uses_calibration() {
    let fields = ["4", "H1", "31.48", "raw", "0$"];
    let calibrate = |t: &str, h: &str| -> Result<f64> {
        assert_eq!((t, h), ("31.48", "raw"));
        Ok(55.25)
    };
    let ctx = ParseContext {
        stack_id: "A1",
        sleep_policy: SleepPolicy::Lenient,
        humidity: &calibrate,
        ids: &UuidGenerator,
    };

    let delta = parse(ModuleCode::Humidity, &fields, &ctx).unwrap();

    assert_eq!(names(&delta), vec!["humidity", "temperature"]);
    assert_eq!(delta.attributes[0].value, "55.25");
    assert_eq!(delta.attributes[0].kind, AttributeType::Float);
    assert_eq!(delta.attributes[1].value, "31.48");
    assert_eq!(sleep_of(&delta), ("0", ""));
}

#[test]
fn test_humidity_whole_number_rendering() {
    let delta = parse_ok(ModuleCode::Humidity, "4,H1,31.48,1890512.00,0$");
    assert_eq!(delta.attributes[0].value, "1890512");
}

#[test]
fn test_humidity_calibration_failure() {
    let err = parse_with(ModuleCode::Humidity, "4,H1,31.48,wet,0$", SleepPolicy::Lenient)
        .unwrap_err();
    assert!(matches!(err, DecodeError::Calibration(_)));
}

#[test]
fn test_humidity_non_finite_rejected() {
    let fields = ["4", "H1", "1", "2", "0$"];
    let calibrate = |_: &str, _: &str| -> Result<f64> { Ok(f64::NAN) };
    let ctx = ParseContext {
        stack_id: "A1",
        sleep_policy: SleepPolicy::Lenient,
        humidity: &calibrate,
        ids: &UuidGenerator,
    };

    let err = parse(ModuleCode::Humidity, &fields, &ctx).unwrap_err();
    assert!(matches!(err, DecodeError::Calibration(_)));
}

#[test]
fn test_gps() {
    let delta = parse_ok(ModuleCode::Gps, "1,GPS,40.41,-3.70,12.5,270,650,30$MOVING");

    assert_eq!(
        names(&delta),
        vec!["position", "speed", "orientation", "altitude"]
    );

    let position = &delta.attributes[0];
    assert_eq!(position.value, "40.41,-3.70");
    assert_eq!(position.kind, AttributeType::Coords);
    assert_eq!(position.metadata.len(), 1);
    assert_eq!(position.metadata[0].name, "location");
    assert_eq!(position.metadata[0].kind, AttributeType::String);
    assert_eq!(position.metadata[0].value, "WGS84");

    assert_eq!(delta.attributes[1].value, "12.5");
    assert_eq!(delta.attributes[2].value, "270");
    assert_eq!(delta.attributes[3].value, "650");
    assert!(delta.attributes[1..]
        .iter()
        .all(|a| a.kind == AttributeType::Float && a.metadata.is_empty()));
    assert_eq!(sleep_of(&delta), ("30", "MOVING"));
}

#[test]
fn test_gsm_has_no_sleep() {
    let delta = parse_ok(ModuleCode::Gsm, "0,P1,214,07,b00,444,-47,");

    assert_eq!(names(&delta), vec!["mcc", "mnc", "lac", "cellid", "dbm"]);
    let kinds: Vec<_> = delta.attributes.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AttributeType::Integer,
            AttributeType::Integer,
            AttributeType::Integer,
            AttributeType::String,
            AttributeType::Integer,
        ]
    );
    assert_eq!(delta.attributes[3].value, "444");
    assert_eq!(delta.attributes[4].value, "-47");
    assert!(delta.sleep.is_none());
}

#[test]
fn test_battery() {
    let delta = parse_ok(ModuleCode::Battery, "3,B,4.70,1,0,1,2,0,-1$");

    assert_eq!(
        names(&delta),
        vec!["voltage", "state", "charger", "charging", "mode", "desconnection"]
    );
    assert_eq!(delta.attributes[0].kind, AttributeType::Float);
    assert!(delta.attributes[1..]
        .iter()
        .all(|a| a.kind == AttributeType::Integer));
    let values: Vec<_> = delta.attributes.iter().map(|a| a.value.as_str()).collect();
    assert_eq!(values, vec!["4.70", "1", "0", "1", "2", "0"]);
    assert_eq!(sleep_of(&delta), ("-1", ""));
}

// =============================================================================
// Configuration Modules
// =============================================================================

#[test]
fn test_generic_config() {
    let delta = parse_ok(ModuleCode::GenericConfig, "0,GC,sleeptime,300,0$");

    assert_eq!(names(&delta), vec!["_TTcurrent_sleeptime"]);
    assert_eq!(delta.attributes[0].value, "300");
    assert_eq!(delta.attributes[0].kind, AttributeType::String);
    assert_eq!(sleep_of(&delta), ("0", ""));
}

#[test]
fn test_actuator() {
    let delta = parse_ok(ModuleCode::Actuator, "0,AV,tune,15$");

    assert_eq!(names(&delta), vec!["_TTcurrent_melody"]);
    assert_eq!(delta.attributes[0].value, "");
    assert_eq!(sleep_of(&delta), ("15", ""));
}

#[test]
fn test_led() {
    let delta = parse_ok(ModuleCode::Led, "0,L1,255,0,0,20$");

    assert_eq!(names(&delta), vec!["_TTcurrent_color"]);
    assert_eq!(delta.attributes[0].value, "");
    assert_eq!(sleep_of(&delta), ("20", ""));
}

#[test]
fn test_generic_module() {
    let delta = parse_ok(ModuleCode::GenericModule, "0,GM,pressure,1013,5$");

    assert_eq!(names(&delta), vec!["pressure"]);
    assert_eq!(delta.attributes[0].value, "1013");
    assert_eq!(delta.attributes[0].kind, AttributeType::String);
    assert_eq!(sleep_of(&delta), ("5", ""));
}

// =============================================================================
// Arity Tests
// =============================================================================

#[test]
fn test_every_module_rejects_short_field_list() {
    for code in ModuleCode::ALL {
        let mut fields = vec!["0", code.as_str()];
        while fields.len() < code.min_fields() - 1 {
            fields.push("1");
        }
        let segment = fields.join(",");

        match parse_with(code, &segment, SleepPolicy::Lenient) {
            Err(DecodeError::BadPayload { fields: reported }) => {
                assert_eq!(reported, fields, "{}", code.as_str())
            }
            other => panic!("{}: expected BadPayload, got {:?}", code.as_str(), other),
        }
    }
}

#[test]
fn test_extra_fields_are_ignored() {
    let delta = parse_ok(ModuleCode::Luminance, "4,LU,142.86,0$,junk,more");
    assert_eq!(names(&delta), vec!["luminance"]);
}

#[test]
fn test_strict_sleep_rejects_missing_separator() {
    let err = parse_with(ModuleCode::Core, "0,K1,300", SleepPolicy::Strict).unwrap_err();

    match err {
        DecodeError::BadPayload { fields } => assert_eq!(fields, vec!["0", "K1", "300"]),
        other => panic!("Expected BadPayload, got {:?}", other),
    }
}

#[test]
fn test_lenient_sleep_accepts_missing_separator() {
    let delta = parse_ok(ModuleCode::Core, "0,K1,300");
    assert_eq!(sleep_of(&delta), ("300", ""));
}
