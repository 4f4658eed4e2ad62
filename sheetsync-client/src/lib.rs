//! # sheetsync-client
//!
//! Blocking client for the spreadsheet values and batch-update endpoints.
//!
//! [`SheetsApi`] is the seam the sync operations are written against;
//! [`HttpSheetsClient`] implements it over HTTPS with a pluggable
//! [`CredentialProvider`].

pub mod api;
pub mod auth;
pub mod error;
pub mod http;
pub mod model;

pub use api::SheetsApi;
pub use auth::{CredentialProvider, InstalledAppCredentials, StaticToken};
pub use error::{AuthError, ClientError};
pub use http::{build_agent, HttpSheetsClient};
pub use model::{BatchRequest, UpdateValuesResponse};
