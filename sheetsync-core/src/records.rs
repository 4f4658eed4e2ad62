//! Reading and writing record documents.
//!
//! A record document is a JSON array of flat objects. Output is pretty-printed
//! with two-space indentation and keeps non-ASCII text as-is.

use std::io::{Read, Write};

use serde_json::Value;

use crate::error::CoreError;
use crate::types::Record;

/// Parse a record document from a string.
pub fn parse_records(json: &str) -> Result<Vec<Record>, CoreError> {
    into_records(serde_json::from_str(json)?)
}

/// Parse a record document from any reader (file or stdin).
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, CoreError> {
    into_records(serde_json::from_reader(reader)?)
}

/// Write `records` as a pretty-printed JSON array.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<(), CoreError> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

/// Check shape and flatness of an already-parsed document.
pub fn into_records(doc: Value) -> Result<Vec<Record>, CoreError> {
    let Value::Array(items) = doc else {
        return Err(CoreError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let Value::Object(record) = item else {
                return Err(CoreError::NotAnObject { index });
            };
            if let Some((field, _)) = record
                .iter()
                .find(|(_, v)| matches!(v, Value::Array(_) | Value::Object(_)))
            {
                return Err(CoreError::NestedValue {
                    index,
                    field: field.clone(),
                });
            }
            Ok(record)
        })
        .collect()
}
