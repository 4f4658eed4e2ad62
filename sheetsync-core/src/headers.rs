//! Header reconciliation and column alignment.
//!
//! The header row is append-only: once a field name owns a column it keeps
//! that position for the lifetime of the sheet.

use std::collections::HashSet;

use serde_json::Value;

use crate::types::{Grid, Reconciled, Record};

/// Merge the field names of `records` into `existing`.
///
/// Records are visited in order and each record's fields in their own order;
/// every name not seen so far is appended. `existing` must be duplicate-free
/// and is always an exact prefix of the result.
pub fn reconcile(existing: &[String], records: &[Record]) -> Reconciled {
    let mut seen: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let mut new = Vec::new();

    for record in records {
        for key in record.keys() {
            if seen.insert(key.as_str()) {
                new.push(key.clone());
            }
        }
    }

    let mut full = Vec::with_capacity(existing.len() + new.len());
    full.extend_from_slice(existing);
    full.extend(new.iter().cloned());
    Reconciled { full, new }
}

/// Align `records` to `headers`, one row per record.
///
/// Absent fields become empty-string cells so every row is exactly
/// `headers.len()` wide. Values are passed through untouched.
pub fn build_grid(records: &[Record], headers: &[String]) -> Grid {
    records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|h| record.get(h).cloned().unwrap_or_else(empty_cell))
                .collect()
        })
        .collect()
}

/// Rebuild records from data rows (header row already removed).
///
/// Header `j` pairs with cell `j`. The remote drops trailing empty cells, so a
/// short row yields a record without the trailing fields; cells beyond the
/// header row are ignored.
pub fn records_from_rows(headers: &[String], rows: &[Vec<Value>]) -> Vec<Record> {
    rows.iter()
        .map(|row| {
            headers
                .iter()
                .zip(row.iter())
                .map(|(h, v)| (h.clone(), v.clone()))
                .collect()
        })
        .collect()
}

fn empty_cell() -> Value {
    Value::String(String::new())
}
