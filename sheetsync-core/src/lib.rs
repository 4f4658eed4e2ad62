//! sheetsync core library: domain types, header reconciliation, grid
//! building, A1 addressing, record I/O and configuration.
//!
//! Everything here is pure or file-local; nothing talks to the network.
//! - [`types`]: newtypes and domain structs
//! - [`headers`]: [`reconcile`] and [`build_grid`]
//! - [`ident`]: spreadsheet identifier extraction
//! - [`columns`]: column letters and A1 ranges
//! - [`records`]: JSON record parsing and rendering
//! - [`config`]: `~/.sheetsync/config.yaml`
//! - [`error`]: [`CoreError`], [`ConfigError`]

pub mod columns;
pub mod config;
pub mod error;
pub mod headers;
pub mod ident;
pub mod records;
pub mod types;

pub use error::{ConfigError, CoreError};
pub use headers::{build_grid, reconcile, records_from_rows};
pub use ident::extract_id;
pub use types::{Grid, Reconciled, Record, SheetName, SheetProperties, SpreadsheetId};
