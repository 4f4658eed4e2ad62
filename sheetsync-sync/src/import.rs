//! Import: reconcile headers, append rows, format.
//!
//! ## Sequence
//!
//! 1. (`overwrite`) delete the tab and recreate it at the same position.
//! 2. Read the header row.
//! 3. Reconcile it with the incoming records.
//! 4. Rewrite the header row if new fields appeared.
//! 5. Append the aligned grid.
//! 6. Apply header filter and row striping.
//!
//! Nothing is rolled back: a failure at step N leaves steps 1..N-1 applied.

use serde_json::Value;

use sheetsync_client::SheetsApi;
use sheetsync_core::columns::{append_range, header_row_range};
use sheetsync_core::{build_grid, reconcile, Record};

use crate::error::SyncError;
use crate::format;
use crate::target::{create_sheet, delete_sheet, require_sheet, Target};

/// What an import did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportReport {
    /// The tab was deleted and recreated first.
    pub recreated: bool,
    /// Header row after reconciliation.
    pub headers: Vec<String>,
    /// Headers added by this import.
    pub new_headers: Vec<String>,
    /// Records appended.
    pub rows: usize,
    /// Cells written by the append, as reported by the remote.
    pub updated_cells: u64,
}

/// Import `records` into the target tab.
pub fn import_records<A: SheetsApi>(
    api: &mut A,
    target: &Target,
    records: &[Record],
    overwrite: bool,
) -> Result<ImportReport, SyncError> {
    let mut report = ImportReport::default();

    if overwrite {
        let index = delete_sheet(api, target)?;
        create_sheet(api, target, Some(index))?;
        report.recreated = true;
    }

    let existing = read_headers(api, target)?;
    let reconciled = reconcile(&existing, records);
    if reconciled.has_new() {
        write_headers(api, target, &reconciled.full)?;
    }
    report.new_headers = reconciled.new;
    report.headers = reconciled.full;

    if records.is_empty() || report.headers.is_empty() {
        tracing::info!(sheet = %target.sheet, "nothing to append");
        return Ok(report);
    }

    report.updated_cells = append_rows(api, target, records, &report.headers)?;
    report.rows = records.len();
    apply_formatting(api, target, report.headers.len())?;
    Ok(report)
}

/// Current header row of the target tab; empty for a blank tab.
pub fn read_headers<A: SheetsApi>(api: &mut A, target: &Target) -> Result<Vec<String>, SyncError> {
    let values = api.get_values(&target.spreadsheet, &header_row_range(&target.sheet))?;
    Ok(values
        .into_iter()
        .next()
        .map(|row| row.iter().map(header_text).collect())
        .unwrap_or_default())
}

/// Replace the header row with `headers`.
pub fn write_headers<A: SheetsApi>(
    api: &mut A,
    target: &Target,
    headers: &[String],
) -> Result<(), SyncError> {
    tracing::info!(sheet = %target.sheet, columns = headers.len(), "writing header row");
    let row: Vec<Value> = headers.iter().cloned().map(Value::String).collect();
    api.update_values(
        &target.spreadsheet,
        &header_row_range(&target.sheet),
        vec![row],
    )?;
    Ok(())
}

/// Append `records` aligned to `headers`. Returns the updated cell count.
pub fn append_rows<A: SheetsApi>(
    api: &mut A,
    target: &Target,
    records: &[Record],
    headers: &[String],
) -> Result<u64, SyncError> {
    let range = append_range(&target.sheet, headers.len())?;
    let grid = build_grid(records, headers);
    let updates = api.append_values(&target.spreadsheet, &range, grid)?;
    tracing::info!(sheet = %target.sheet, cells = updates.updated_cells, "rows appended");
    Ok(updates.updated_cells)
}

/// Header filter plus row striping over `width` columns, in one batch.
pub fn apply_formatting<A: SheetsApi>(
    api: &mut A,
    target: &Target,
    width: usize,
) -> Result<(), SyncError> {
    let props = require_sheet(api, target)?;
    api.batch_update(
        &target.spreadsheet,
        vec![
            format::header_filter(props.sheet_id, width),
            format::striped_rows(props.sheet_id, width),
        ],
    )?;
    Ok(())
}

/// Header cells come back as formatted strings; anything else is rendered.
pub(crate) fn header_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
