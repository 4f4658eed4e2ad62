//! Locating, creating and deleting the target tab.

use sheetsync_client::model::{AddSheetRequest, DeleteSheetRequest, NewSheetProperties};
use sheetsync_client::{BatchRequest, SheetsApi};
use sheetsync_core::{SheetName, SheetProperties, SpreadsheetId};

use crate::error::SyncError;

/// A tab inside a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub spreadsheet: SpreadsheetId,
    pub sheet: SheetName,
}

impl Target {
    pub fn new(spreadsheet: impl Into<SpreadsheetId>, sheet: impl Into<SheetName>) -> Self {
        Self {
            spreadsheet: spreadsheet.into(),
            sheet: sheet.into(),
        }
    }
}

/// What must be true about the tab before any data is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetMode {
    /// The tab must already exist.
    #[default]
    MustExist,
    /// The tab must not exist yet; it is created.
    CreateNew,
}

/// Properties of the target tab, if it exists.
pub fn find_sheet<A: SheetsApi>(
    api: &mut A,
    target: &Target,
) -> Result<Option<SheetProperties>, SyncError> {
    Ok(api
        .sheets(&target.spreadsheet)?
        .into_iter()
        .find(|s| s.title == target.sheet.0))
}

/// Like [`find_sheet`], but a missing tab is [`SyncError::SheetNotFound`].
pub fn require_sheet<A: SheetsApi>(
    api: &mut A,
    target: &Target,
) -> Result<SheetProperties, SyncError> {
    let sheets = api.sheets(&target.spreadsheet)?;
    let available: Vec<String> = sheets.iter().map(|s| s.title.clone()).collect();
    sheets
        .into_iter()
        .find(|s| s.title == target.sheet.0)
        .ok_or_else(|| SyncError::SheetNotFound {
            name: target.sheet.0.clone(),
            available,
        })
}

/// Add the target tab, at `index` when given, otherwise last.
pub fn create_sheet<A: SheetsApi>(
    api: &mut A,
    target: &Target,
    index: Option<u32>,
) -> Result<(), SyncError> {
    tracing::info!(sheet = %target.sheet, ?index, "creating sheet");
    api.batch_update(
        &target.spreadsheet,
        vec![BatchRequest::AddSheet(AddSheetRequest {
            properties: NewSheetProperties {
                title: target.sheet.0.clone(),
                index,
            },
        })],
    )?;
    Ok(())
}

/// Delete the target tab and return the tab position it occupied.
pub fn delete_sheet<A: SheetsApi>(api: &mut A, target: &Target) -> Result<u32, SyncError> {
    let props = require_sheet(api, target)?;
    tracing::info!(sheet = %target.sheet, sheet_id = props.sheet_id, "deleting sheet");
    api.batch_update(
        &target.spreadsheet,
        vec![BatchRequest::DeleteSheet(DeleteSheetRequest {
            sheet_id: props.sheet_id,
        })],
    )?;
    Ok(props.index)
}

/// Enforce `mode` on the target tab. Returns `true` when the tab was created.
pub fn prepare<A: SheetsApi>(
    api: &mut A,
    target: &Target,
    mode: TargetMode,
) -> Result<bool, SyncError> {
    match mode {
        TargetMode::CreateNew => {
            if find_sheet(api, target)?.is_some() {
                return Err(SyncError::SheetAlreadyExists {
                    name: target.sheet.0.clone(),
                });
            }
            create_sheet(api, target, None)?;
            Ok(true)
        }
        TargetMode::MustExist => {
            require_sheet(api, target)?;
            Ok(false)
        }
    }
}
