//! In-memory [`SheetsApi`] that mimics the remote's range semantics closely
//! enough for the sync operations:
//!
//! - reads drop trailing empty cells and trailing empty rows
//! - appends land after the last non-empty row
//! - batch updates add, delete and sort tabs; formatting is recorded only

#![allow(dead_code)]

use std::cmp::Ordering;

use serde_json::Value;
use sheetsync_client::model::{BatchRequest, SortOrder, UpdateValuesResponse};
use sheetsync_client::{ClientError, SheetsApi};
use sheetsync_core::columns::column_index;
use sheetsync_core::{Grid, SheetProperties, SpreadsheetId};

pub const DEFAULT_ROW_COUNT: u32 = 1000;

#[derive(Debug, Clone)]
pub struct FakeSheet {
    pub id: i64,
    pub title: String,
    pub rows: Vec<Vec<Value>>,
    pub row_count: u32,
}

#[derive(Debug, Default)]
pub struct FakeSheets {
    pub sheets: Vec<FakeSheet>,
    pub next_id: i64,
    /// `"<method> <range>"` for every call, in order.
    pub calls: Vec<String>,
    /// Every batch request received, flattened.
    pub batches: Vec<BatchRequest>,
    /// Fail the next call to this method with HTTP 500.
    pub fail_on: Option<&'static str>,
}

impl FakeSheets {
    pub fn with_sheet(title: &str, rows: Vec<Vec<Value>>) -> Self {
        let mut fake = Self::default();
        fake.add(title, rows);
        fake
    }

    pub fn add(&mut self, title: &str, rows: Vec<Vec<Value>>) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.sheets.push(FakeSheet {
            id,
            title: title.to_string(),
            rows,
            row_count: DEFAULT_ROW_COUNT,
        });
        id
    }

    pub fn sheet(&self, title: &str) -> &FakeSheet {
        self.sheets
            .iter()
            .find(|s| s.title == title)
            .unwrap_or_else(|| panic!("no sheet {title}"))
    }

    /// Rows as the remote would return them for the whole tab.
    pub fn visible_rows(&self, title: &str) -> Grid {
        trim(self.sheet(title).rows.clone())
    }

    pub fn titles(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.title.clone()).collect()
    }

    fn check(&mut self, method: &'static str, detail: &str) -> Result<(), ClientError> {
        self.calls.push(format!("{method} {detail}"));
        if self.fail_on == Some(method) {
            self.fail_on = None;
            return Err(ClientError::Status {
                context: method,
                status: 500,
                message: "injected failure".into(),
            });
        }
        Ok(())
    }

    fn sheet_mut(&mut self, title: &str) -> Result<&mut FakeSheet, ClientError> {
        self.sheets
            .iter_mut()
            .find(|s| s.title == title)
            .ok_or_else(|| bad_request(format!("Unable to parse range: {title}")))
    }
}

fn bad_request(message: String) -> ClientError {
    ClientError::Status {
        context: "fake",
        status: 400,
        message,
    }
}

/// Split `'Name'!A1:C` into the unquoted title and the cell part.
fn split_range(range: &str) -> (String, &str) {
    let (sheet, cells) = range.rsplit_once('!').expect("range has a sheet prefix");
    let title = sheet
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .expect("sheet prefix is quoted")
        .replace("''", "'");
    (title, cells)
}

/// Column count selected by the cell part; `None` means every column.
fn column_limit(cells: &str) -> Option<usize> {
    if cells == "1:1" {
        return None;
    }
    let end = cells.rsplit(':').next().unwrap_or(cells);
    let letters: String = end.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    Some(column_index(&letters).expect("column letters") + 1)
}

fn is_blank(v: &Value) -> bool {
    matches!(v, Value::Null) || v.as_str() == Some("")
}

fn trim(mut rows: Grid) -> Grid {
    for row in rows.iter_mut() {
        while row.last().is_some_and(is_blank) {
            row.pop();
        }
    }
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    rows
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(x), Some(y)) => text(x).cmp(&text(y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn text(v: &Value) -> String {
    v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string())
}

impl SheetsApi for FakeSheets {
    fn get_values(&mut self, _: &SpreadsheetId, range: &str) -> Result<Grid, ClientError> {
        self.check("get_values", range)?;
        let (title, cells) = split_range(range);
        let sheet = self.sheet_mut(&title)?;
        let rows: Grid = if cells == "1:1" {
            sheet.rows.iter().take(1).cloned().collect()
        } else {
            let width = column_limit(cells).unwrap_or(usize::MAX);
            sheet
                .rows
                .iter()
                .map(|r| r.iter().take(width).cloned().collect())
                .collect()
        };
        Ok(trim(rows))
    }

    fn update_values(
        &mut self,
        _: &SpreadsheetId,
        range: &str,
        values: Grid,
    ) -> Result<UpdateValuesResponse, ClientError> {
        self.check("update_values", range)?;
        let (title, _) = split_range(range);
        let sheet = self.sheet_mut(&title)?;
        let mut cells = 0;
        for (i, row) in values.into_iter().enumerate() {
            if sheet.rows.len() <= i {
                sheet.rows.resize(i + 1, Vec::new());
            }
            cells += row.len() as u64;
            sheet.rows[i] = row;
        }
        Ok(UpdateValuesResponse {
            updated_range: Some(range.to_string()),
            updated_cells: cells,
            ..Default::default()
        })
    }

    fn append_values(
        &mut self,
        _: &SpreadsheetId,
        range: &str,
        values: Grid,
    ) -> Result<UpdateValuesResponse, ClientError> {
        self.check("append_values", range)?;
        let (title, _) = split_range(range);
        let sheet = self.sheet_mut(&title)?;
        let keep = trim(sheet.rows.clone()).len();
        sheet.rows.truncate(keep);
        let rows = values.len() as u64;
        let cells: u64 = values.iter().map(|r| r.len() as u64).sum();
        sheet.rows.extend(values);
        if sheet.rows.len() as u32 > sheet.row_count {
            sheet.row_count = sheet.rows.len() as u32;
        }
        Ok(UpdateValuesResponse {
            updated_range: Some(range.to_string()),
            updated_rows: rows,
            updated_cells: cells,
            ..Default::default()
        })
    }

    fn sheets(&mut self, _: &SpreadsheetId) -> Result<Vec<SheetProperties>, ClientError> {
        self.check("sheets", "")?;
        Ok(self
            .sheets
            .iter()
            .enumerate()
            .map(|(index, s)| SheetProperties {
                sheet_id: s.id,
                title: s.title.clone(),
                index: index as u32,
                row_count: s.row_count,
            })
            .collect())
    }

    fn batch_update(
        &mut self,
        _: &SpreadsheetId,
        requests: Vec<BatchRequest>,
    ) -> Result<(), ClientError> {
        self.check("batch_update", &requests.len().to_string())?;
        for request in &requests {
            match request {
                BatchRequest::AddSheet(add) => {
                    let title = add.properties.title.clone();
                    if self.sheets.iter().any(|s| s.title == title) {
                        return Err(bad_request(format!("sheet {title} already exists")));
                    }
                    let id = self.add(&title, Vec::new());
                    if let Some(index) = add.properties.index {
                        let sheet = self.sheets.pop().expect("just added");
                        debug_assert_eq!(sheet.id, id);
                        let at = (index as usize).min(self.sheets.len());
                        self.sheets.insert(at, sheet);
                    }
                }
                BatchRequest::DeleteSheet(del) => {
                    let before = self.sheets.len();
                    self.sheets.retain(|s| s.id != del.sheet_id);
                    if self.sheets.len() == before {
                        return Err(bad_request(format!("no sheet with id {}", del.sheet_id)));
                    }
                }
                BatchRequest::SortRange(sort) => {
                    let sheet = self
                        .sheets
                        .iter_mut()
                        .find(|s| s.id == sort.range.sheet_id)
                        .ok_or_else(|| bad_request("no such sheet".into()))?;
                    let start = sort.range.start_row_index.unwrap_or(0) as usize;
                    let end = (sort.range.end_row_index.unwrap_or(u32::MAX) as usize)
                        .min(sheet.rows.len());
                    if start < end {
                        sheet.rows[start..end].sort_by(|a, b| {
                            for spec in &sort.sort_specs {
                                let ord = compare(
                                    a.get(spec.dimension_index),
                                    b.get(spec.dimension_index),
                                );
                                let ord = match spec.sort_order {
                                    SortOrder::Ascending => ord,
                                    SortOrder::Descending => ord.reverse(),
                                };
                                if ord != Ordering::Equal {
                                    return ord;
                                }
                            }
                            Ordering::Equal
                        });
                    }
                }
                BatchRequest::SetBasicFilter(_) | BatchRequest::AddConditionalFormatRule(_) => {}
            }
        }
        self.batches.extend(requests);
        Ok(())
    }
}

/// `json!` rows helper: `row(&["a", "b"])`.
pub fn row(cells: &[&str]) -> Vec<Value> {
    cells.iter().map(|c| Value::String(c.to_string())).collect()
}
