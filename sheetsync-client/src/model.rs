//! Wire types for the v4 spreadsheet endpoints.
//!
//! Only the fields sheetsync reads or writes are modelled; everything else in
//! the responses is ignored by serde.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sheetsync_core::{Grid, SheetProperties};

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Body and response of the values endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    /// Absent in the response when the range is empty.
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    pub fn rows(range: &str, values: Grid) -> Self {
        Self {
            range: Some(range.to_string()),
            major_dimension: Some("ROWS".to_string()),
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateValuesResponse {
    pub updated_range: Option<String>,
    pub updated_rows: u64,
    pub updated_columns: u64,
    pub updated_cells: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppendValuesResponse {
    pub updates: UpdateValuesResponse,
}

// ---------------------------------------------------------------------------
// Spreadsheet metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Spreadsheet {
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Sheet {
    pub properties: WireSheetProperties,
}

/// Zero-valued fields (`sheetId: 0`, `index: 0`) may be omitted on the wire.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WireSheetProperties {
    pub sheet_id: i64,
    pub title: String,
    pub index: u32,
    pub grid_properties: GridProperties,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GridProperties {
    pub row_count: u32,
    pub column_count: u32,
}

impl From<WireSheetProperties> for SheetProperties {
    fn from(p: WireSheetProperties) -> Self {
        Self {
            sheet_id: p.sheet_id,
            title: p.title,
            index: p.index,
            row_count: p.grid_properties.row_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Batch update
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchUpdateBody {
    pub requests: Vec<BatchRequest>,
}

/// One entry of a `batchUpdate` call, serialized as `{"<kind>": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchRequest {
    AddSheet(AddSheetRequest),
    DeleteSheet(DeleteSheetRequest),
    SetBasicFilter(SetBasicFilterRequest),
    AddConditionalFormatRule(AddConditionalFormatRuleRequest),
    SortRange(SortRangeRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddSheetRequest {
    pub properties: NewSheetProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSheetProperties {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSheetRequest {
    pub sheet_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetBasicFilterRequest {
    pub filter: BasicFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicFilter {
    pub range: GridRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddConditionalFormatRuleRequest {
    pub rule: ConditionalFormatRule,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalFormatRule {
    pub ranges: Vec<GridRange>,
    pub boolean_rule: BooleanRule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanRule {
    pub condition: BooleanCondition,
    pub format: CellFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanCondition {
    #[serde(rename = "type")]
    pub kind: String,
    pub values: Vec<ConditionValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionValue {
    pub user_entered_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    pub background_color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortRangeRequest {
    pub range: GridRange,
    pub sort_specs: Vec<SortSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub dimension_index: usize,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Half-open row/column window on one sheet. Absent bounds are unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<u32>,
}
