//! Shared pipeline entrypoint used by the CLI.
//!
//! Step order is fixed: target check → import → sort → export.

use sheetsync_client::SheetsApi;
use sheetsync_core::Record;

use crate::error::SyncError;
use crate::export::{export_records, Export};
use crate::import::{import_records, ImportReport};
use crate::sort::{sort_sheet, SortReport};
use crate::target::{prepare, Target, TargetMode};

/// Everything one invocation asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncRequest {
    pub target: Target,
    pub mode: TargetMode,
    /// Records to import, if any.
    pub records: Option<Vec<Record>>,
    /// Replace the tab before importing. Ignored without `records`.
    pub overwrite: bool,
    /// Columns to sort by; empty means no sort.
    pub sort_columns: Vec<String>,
    /// Read the tab back after the other steps.
    pub export: bool,
}

impl SyncRequest {
    /// A request that only checks the target tab.
    pub fn new(target: Target, mode: TargetMode) -> Self {
        Self {
            target,
            mode,
            records: None,
            overwrite: false,
            sort_columns: Vec::new(),
            export: false,
        }
    }
}

/// What an invocation did, step by step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncReport {
    /// The tab was created by `TargetMode::CreateNew`.
    pub created: bool,
    pub import: Option<ImportReport>,
    pub sort: Option<SortReport>,
    pub export: Option<Export>,
}

/// Run every step `request` asks for against `api`.
pub fn run<A: SheetsApi>(api: &mut A, request: &SyncRequest) -> Result<SyncReport, SyncError> {
    let target = &request.target;
    let mut report = SyncReport {
        created: prepare(api, target, request.mode)?,
        ..SyncReport::default()
    };

    if let Some(records) = request.records.as_deref() {
        report.import = Some(import_records(api, target, records, request.overwrite)?);
    }

    if !request.sort_columns.is_empty() {
        report.sort = Some(sort_sheet(api, target, &request.sort_columns)?);
    }

    if request.export {
        report.export = Some(export_records(api, target)?);
    }

    Ok(report)
}
