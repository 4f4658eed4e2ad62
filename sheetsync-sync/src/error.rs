//! Error types for sheetsync-sync.

use thiserror::Error;

use sheetsync_client::ClientError;
use sheetsync_core::CoreError;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// `--new-sheet` was requested for a title that is already taken.
    #[error("sheet '{name}' already exists")]
    SheetAlreadyExists { name: String },

    /// The target tab does not exist and creation was not requested.
    #[error("sheet '{name}' not found (available: {})", .available.join(", "))]
    SheetNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("remote error: {0}")]
    Client(#[from] ClientError),
}

impl SyncError {
    /// Sheet existence mismatches are reported and exit with status 1; every
    /// other failure is fatal and propagates.
    pub fn is_target_mismatch(&self) -> bool {
        matches!(
            self,
            SyncError::SheetAlreadyExists { .. } | SyncError::SheetNotFound { .. }
        )
    }
}
