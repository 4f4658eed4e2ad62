//! Sorting the data rows by named columns.

use sheetsync_client::model::{GridRange, SortOrder, SortRangeRequest, SortSpec};
use sheetsync_client::{BatchRequest, SheetsApi};

use crate::error::SyncError;
use crate::import::read_headers;
use crate::target::{require_sheet, Target};

/// Which requested columns were used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortReport {
    pub applied: Vec<String>,
    /// Requested columns missing from the header row.
    pub skipped: Vec<String>,
}

/// Ascending specs for each of `columns` present in `headers`, by position.
pub fn sort_specs(headers: &[String], columns: &[String]) -> (Vec<SortSpec>, SortReport) {
    let mut specs = Vec::new();
    let mut report = SortReport::default();
    for column in columns {
        match headers.iter().position(|h| h == column) {
            Some(dimension_index) => {
                specs.push(SortSpec {
                    dimension_index,
                    sort_order: SortOrder::Ascending,
                });
                report.applied.push(column.clone());
            }
            None => report.skipped.push(column.clone()),
        }
    }
    (specs, report)
}

/// Sort rows `1..rowCount` of the target tab by `columns`, ascending.
///
/// Unknown columns are skipped; if none are known no request is sent.
pub fn sort_sheet<A: SheetsApi>(
    api: &mut A,
    target: &Target,
    columns: &[String],
) -> Result<SortReport, SyncError> {
    let props = require_sheet(api, target)?;
    let headers = read_headers(api, target)?;
    let (specs, report) = sort_specs(&headers, columns);

    for column in &report.skipped {
        tracing::warn!(%column, sheet = %target.sheet, "sort column not in header row; skipped");
    }
    if specs.is_empty() {
        return Ok(report);
    }

    tracing::info!(sheet = %target.sheet, columns = ?report.applied, "sorting");
    api.batch_update(
        &target.spreadsheet,
        vec![BatchRequest::SortRange(SortRangeRequest {
            range: GridRange {
                sheet_id: props.sheet_id,
                start_row_index: Some(1),
                end_row_index: Some(props.row_count),
                start_column_index: Some(0),
                end_column_index: Some(headers.len() as u32),
            },
            sort_specs: specs,
        })],
    )?;
    Ok(report)
}
