//! Spreadsheet identifier extraction.

use crate::error::CoreError;
use crate::types::SpreadsheetId;

/// URL prefix that precedes the id in a spreadsheet link.
pub const SPREADSHEET_URL_PREFIX: &str = "https://docs.google.com/spreadsheets/d/";

/// Reduce a spreadsheet URL or a bare id to the bare id.
///
/// With the URL prefix present, the id is the path segment after it, which
/// must be terminated by `/` (`.../d/<id>/edit`). Anything without the prefix
/// is taken as an id already.
pub fn extract_id(input: &str) -> Result<SpreadsheetId, CoreError> {
    let input = input.trim();
    let invalid = |reason| CoreError::InvalidIdentifier {
        input: input.to_string(),
        reason,
    };

    let Some(pos) = input.find(SPREADSHEET_URL_PREFIX) else {
        if input.is_empty() {
            return Err(invalid("identifier is empty"));
        }
        return Ok(SpreadsheetId::from(input));
    };

    let rest = &input[pos + SPREADSHEET_URL_PREFIX.len()..];
    let end = rest
        .find('/')
        .ok_or_else(|| invalid("expected '/' after the spreadsheet id"))?;
    let id = &rest[..end];
    if id.is_empty() {
        return Err(invalid("spreadsheet id segment is empty"));
    }
    Ok(SpreadsheetId::from(id))
}
