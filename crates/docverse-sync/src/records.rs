//! Shape checking for directory payloads: a JSON array of record objects.

use docverse_core::RawRecord;
use serde_json::Value;

use crate::SourceError;

/// Split a directory payload into raw records.
///
/// The payload must be an array and every element must be an object;
/// anything else means the payload is not a directory at all.
pub fn records_from_value(value: Value) -> Result<Vec<RawRecord>, SourceError> {
    let Value::Array(items) = value else {
        return Err(SourceError::UnexpectedShape(format!(
            "expected an array of records, got {}",
            kind(&value)
        )));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let item_kind = kind(&item);
            RawRecord::from_value(item).ok_or_else(|| {
                SourceError::UnexpectedShape(format!("record {i} is {item_kind}, not an object"))
            })
        })
        .collect()
}

/// Parse a JSON document and split it into raw records.
pub fn parse_records(body: &str) -> Result<Vec<RawRecord>, SourceError> {
    let value: Value = serde_json::from_str(body)?;
    records_from_value(value)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
