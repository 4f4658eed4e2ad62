//! Domain types shared by every sheetsync crate.
//!
//! A [`Record`] is a flat JSON object whose field order is the order the
//! fields appeared in the source document (`serde_json` is built with
//! `preserve_order`).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One logical row before column alignment.
pub type Record = serde_json::Map<String, Value>;

/// Rectangular block of cell values: one row per record, one column per header.
pub type Grid = Vec<Vec<Value>>;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// The bare spreadsheet id (the `ABC123` in `/spreadsheets/d/ABC123/edit`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpreadsheetId(pub String);

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SpreadsheetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SpreadsheetId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Title of a tab inside a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetName(pub String);

impl SheetName {
    /// The sheet reference used in front of `!` in an A1 range.
    ///
    /// Always quoted; embedded single quotes are doubled.
    pub fn a1_prefix(&self) -> String {
        format!("'{}'", self.0.replace('\'', "''"))
    }
}

impl fmt::Display for SheetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SheetName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SheetName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Metadata of one tab, as listed by the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetProperties {
    /// Numeric id used by batch update requests.
    pub sheet_id: i64,
    pub title: String,
    /// Zero-based tab position.
    pub index: u32,
    /// Number of rows in the sheet grid (not the number of filled rows).
    pub row_count: u32,
}

/// Output of [`crate::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciled {
    /// Existing headers followed by `new` in first-seen order.
    pub full: Vec<String>,
    /// Headers that were not in the sheet yet.
    pub new: Vec<String>,
}

impl Reconciled {
    pub fn has_new(&self) -> bool {
        !self.new.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
