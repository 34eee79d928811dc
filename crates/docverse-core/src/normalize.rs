//! Normalisation of untrusted upstream records into [`Doctor`]s.
//!
//! The directory feed is loosely typed: numbers arrive as display strings
//! ("₹1,200", "12 Years of experience"), lists may be missing or the wrong
//! shape, and nested objects may be absent. Every field has a coercion rule
//! and a default, so normalisation is total.
//!
//! # Field rules
//!
//! - `id`: non-negative JSON integer, or a string holding one; otherwise 0
//! - `name`, `name_initials`, `photo`, `doctor_introduction`: strings, else ""
//! - `specialities`: list of `{name}` objects → names in order; else empty
//! - `fees`, `experience`: strings with every non-digit stripped, parsed as
//!   base 10; absent, non-string, or digit-free input gives 0
//! - `video_consult`, `in_clinic`: booleans → modes in that fixed order
//! - `languages`: list of strings; else empty
//! - `clinic`: `{name, address}` object or nothing, never half-built

use serde_json::{Map, Value};

use crate::doctor::{Clinic, ClinicAddress, ConsultationMode, Doctor};

/// One record exactly as received from the feed or the fallback snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wrap a JSON value. Only objects are records.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn string(&self, key: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_default()
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Convert one raw record into a [`Doctor`]. Never fails.
pub fn normalize(raw: &RawRecord) -> Doctor {
    Doctor {
        id: coerce_id(raw.get("id")),
        name: raw.string("name"),
        name_initials: raw.string("name_initials"),
        photo_url: raw.string("photo"),
        introduction: raw.string("doctor_introduction"),
        specialties: specialty_names(raw.get("specialities")),
        fee_amount: raw.get("fees").and_then(Value::as_str).map_or(0, parse_digits),
        experience_years: raw
            .get("experience")
            .and_then(Value::as_str)
            .map_or(0, parse_digits),
        languages: string_list(raw.get("languages")),
        clinic: raw.get("clinic").and_then(clinic),
        consultation_modes: consultation_modes(raw.flag("video_consult"), raw.flag("in_clinic")),
    }
}

/// Strip every non-ASCII-digit character and parse what remains as base 10.
///
/// Input with no digits yields 0. Values too large for `u64` saturate.
pub fn parse_digits(s: &str) -> u64 {
    s.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}

fn coerce_id(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn specialty_names(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| item.get("name").and_then(Value::as_str))
        .map(str::to_owned)
        .collect()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect()
}

fn consultation_modes(video: bool, in_clinic: bool) -> Vec<ConsultationMode> {
    let mut modes = Vec::with_capacity(2);
    if video {
        modes.push(ConsultationMode::VideoConsult);
    }
    if in_clinic {
        modes.push(ConsultationMode::InClinic);
    }
    modes
}

fn clinic(value: &Value) -> Option<Clinic> {
    let name = value.get("name")?.as_str()?;
    let address = value.get("address")?.as_object()?;
    let field = |key: &str| {
        address
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_default()
    };
    Some(Clinic {
        name: name.to_owned(),
        address: ClinicAddress {
            address_line1: field("address_line1"),
            locality: field("locality"),
            city: field("city"),
            location: field("location"),
            logo_url: field("logo_url"),
        },
    })
}
