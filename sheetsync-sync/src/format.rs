//! Formatting applied after an import: a filter on the header row and
//! alternating row shading on the data rows.

use sheetsync_client::model::{
    AddConditionalFormatRuleRequest, BasicFilter, BooleanCondition, BooleanRule, CellFormat,
    Color, ConditionValue, ConditionalFormatRule, GridRange, SetBasicFilterRequest,
};
use sheetsync_client::BatchRequest;

/// Shade for even rows.
const STRIPE: Color = Color {
    red: 0.9,
    green: 0.9,
    blue: 0.9,
};

const EVEN_ROW_FORMULA: &str = "=ISEVEN(ROW())";

/// Basic filter spanning the header row over `width` columns.
pub fn header_filter(sheet_id: i64, width: usize) -> BatchRequest {
    BatchRequest::SetBasicFilter(SetBasicFilterRequest {
        filter: BasicFilter {
            range: GridRange {
                sheet_id,
                start_row_index: Some(0),
                end_row_index: Some(1),
                start_column_index: Some(0),
                end_column_index: Some(width as u32),
            },
        },
    })
}

/// Conditional rule shading every even data row, inserted first in the
/// sheet's rule list.
pub fn striped_rows(sheet_id: i64, width: usize) -> BatchRequest {
    BatchRequest::AddConditionalFormatRule(AddConditionalFormatRuleRequest {
        rule: ConditionalFormatRule {
            ranges: vec![GridRange {
                sheet_id,
                start_row_index: Some(1),
                end_row_index: None,
                start_column_index: Some(0),
                end_column_index: Some(width as u32),
            }],
            boolean_rule: BooleanRule {
                condition: BooleanCondition {
                    kind: "CUSTOM_FORMULA".to_string(),
                    values: vec![ConditionValue {
                        user_entered_value: EVEN_ROW_FORMULA.to_string(),
                    }],
                },
                format: CellFormat {
                    background_color: STRIPE,
                },
            },
        },
        index: 0,
    })
}
