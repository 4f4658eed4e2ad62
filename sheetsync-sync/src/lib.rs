//! # sheetsync-sync
//!
//! The operations behind the `sheetsync` command, written against the
//! [`SheetsApi`](sheetsync_client::SheetsApi) seam.
//!
//! Call [`pipeline::run`] for a whole invocation, or the individual steps
//! ([`target`], [`import`], [`sort`], [`export`]) directly.

pub mod error;
pub mod export;
pub mod format;
pub mod import;
pub mod pipeline;
pub mod sort;
pub mod target;

pub use error::SyncError;
pub use export::Export;
pub use import::ImportReport;
pub use pipeline::{SyncReport, SyncRequest};
pub use sort::SortReport;
pub use target::{Target, TargetMode};
