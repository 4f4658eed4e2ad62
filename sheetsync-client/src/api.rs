//! The remote operations sheetsync consumes.

use sheetsync_core::{Grid, SheetProperties, SpreadsheetId};

use crate::error::ClientError;
use crate::model::{BatchRequest, UpdateValuesResponse};

/// One blocking round-trip per call; no batching, no retries.
///
/// Ranges are A1 strings such as `'Sheet1'!1:1`. Methods take `&mut self`:
/// obtaining a token may refresh and persist credentials.
pub trait SheetsApi {
    /// Read a rectangular range. Trailing empty cells and rows are omitted
    /// by the remote; an empty range yields an empty grid.
    fn get_values(&mut self, spreadsheet: &SpreadsheetId, range: &str)
        -> Result<Grid, ClientError>;

    /// Overwrite `range` with `values` (raw input, row-major).
    fn update_values(
        &mut self,
        spreadsheet: &SpreadsheetId,
        range: &str,
        values: Grid,
    ) -> Result<UpdateValuesResponse, ClientError>;

    /// Append `values` after the last non-empty row of the table in `range`.
    fn append_values(
        &mut self,
        spreadsheet: &SpreadsheetId,
        range: &str,
        values: Grid,
    ) -> Result<UpdateValuesResponse, ClientError>;

    /// Properties of every tab, in tab order.
    fn sheets(&mut self, spreadsheet: &SpreadsheetId) -> Result<Vec<SheetProperties>, ClientError>;

    /// Apply structural and formatting requests in one call.
    fn batch_update(
        &mut self,
        spreadsheet: &SpreadsheetId,
        requests: Vec<BatchRequest>,
    ) -> Result<(), ClientError>;
}
