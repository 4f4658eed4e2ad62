//! Export: sheet rows back to records.

use sheetsync_client::SheetsApi;
use sheetsync_core::columns::table_range;
use sheetsync_core::{records_from_rows, Record};

use crate::error::SyncError;
use crate::import::read_headers;
use crate::target::Target;

/// Result of reading the target tab back.
#[derive(Debug, Clone, PartialEq)]
pub enum Export {
    /// One record per row after the header row.
    Records(Vec<Record>),
    /// The tab holds no values at all.
    NoData,
}

/// Read every row under the header row as a record keyed by header.
pub fn export_records<A: SheetsApi>(api: &mut A, target: &Target) -> Result<Export, SyncError> {
    let headers = read_headers(api, target)?;
    if headers.is_empty() {
        return Ok(Export::NoData);
    }

    let range = table_range(&target.sheet, headers.len())?;
    let values = api.get_values(&target.spreadsheet, &range)?;
    let Some((_, rows)) = values.split_first() else {
        return Ok(Export::NoData);
    };

    tracing::debug!(sheet = %target.sheet, rows = rows.len(), "exported rows");
    Ok(Export::Records(records_from_rows(&headers, rows)))
}
