//! [`SheetsApi`] over HTTPS.

use std::time::Duration;

use url::Url;

use sheetsync_core::{Grid, SheetProperties, SpreadsheetId};

use crate::api::SheetsApi;
use crate::auth::CredentialProvider;
use crate::error::{from_ureq, ClientError};
use crate::model::{
    AppendValuesResponse, BatchRequest, BatchUpdateBody, Spreadsheet, UpdateValuesResponse,
    ValueRange,
};

/// Blocking client for `…/v4/spreadsheets`.
pub struct HttpSheetsClient<C> {
    agent: ureq::Agent,
    base: Url,
    credentials: C,
}

/// Agent shared by the spreadsheet client and the OAuth token endpoint.
pub fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(concat!("sheetsync/", env!("CARGO_PKG_VERSION")))
        .build()
}

impl<C: CredentialProvider> HttpSheetsClient<C> {
    /// `api_base` is the versioned root, e.g. `https://sheets.googleapis.com/v4/`.
    pub fn with_agent(
        api_base: &str,
        agent: ureq::Agent,
        credentials: C,
    ) -> Result<Self, ClientError> {
        let base = Url::parse(api_base)?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(api_base.to_string()));
        }
        Ok(Self {
            agent,
            base,
            credentials,
        })
    }

    /// `<base>/spreadsheets/<segments…>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .push("spreadsheets")
            .extend(segments);
        Ok(url)
    }

    fn bearer(&mut self) -> Result<String, ClientError> {
        Ok(format!("Bearer {}", self.credentials.access_token()?))
    }
}

impl<C: CredentialProvider> SheetsApi for HttpSheetsClient<C> {
    fn get_values(
        &mut self,
        spreadsheet: &SpreadsheetId,
        range: &str,
    ) -> Result<Grid, ClientError> {
        let url = self.endpoint(&[&spreadsheet.0, "values", range])?;
        tracing::debug!(%range, "reading values");
        let auth = self.bearer()?;
        let body: ValueRange = self
            .agent
            .get(url.as_str())
            .set("Authorization", &auth)
            .call()
            .map_err(|e| from_ureq("read values", e))?
            .into_json()
            .map_err(|e| ClientError::Decode {
                context: "read values",
                source: e,
            })?;
        Ok(body.values)
    }

    fn update_values(
        &mut self,
        spreadsheet: &SpreadsheetId,
        range: &str,
        values: Grid,
    ) -> Result<UpdateValuesResponse, ClientError> {
        let url = self.endpoint(&[&spreadsheet.0, "values", range])?;
        tracing::info!(%range, rows = values.len(), "updating values");
        let auth = self.bearer()?;
        self.agent
            .put(url.as_str())
            .query("valueInputOption", "RAW")
            .set("Authorization", &auth)
            .send_json(ValueRange::rows(range, values))
            .map_err(|e| from_ureq("update values", e))?
            .into_json()
            .map_err(|e| ClientError::Decode {
                context: "update values",
                source: e,
            })
    }

    fn append_values(
        &mut self,
        spreadsheet: &SpreadsheetId,
        range: &str,
        values: Grid,
    ) -> Result<UpdateValuesResponse, ClientError> {
        let target = format!("{range}:append");
        let url = self.endpoint(&[&spreadsheet.0, "values", &target])?;
        tracing::info!(%range, rows = values.len(), "appending values");
        let auth = self.bearer()?;
        let body: AppendValuesResponse = self
            .agent
            .post(url.as_str())
            .query("valueInputOption", "RAW")
            .set("Authorization", &auth)
            .send_json(ValueRange::rows(range, values))
            .map_err(|e| from_ureq("append values", e))?
            .into_json()
            .map_err(|e| ClientError::Decode {
                context: "append values",
                source: e,
            })?;
        Ok(body.updates)
    }

    fn sheets(
        &mut self,
        spreadsheet: &SpreadsheetId,
    ) -> Result<Vec<SheetProperties>, ClientError> {
        let url = self.endpoint(&[&spreadsheet.0])?;
        tracing::debug!(spreadsheet = %spreadsheet, "listing sheets");
        let auth = self.bearer()?;
        let body: Spreadsheet = self
            .agent
            .get(url.as_str())
            .query("fields", "sheets.properties")
            .set("Authorization", &auth)
            .call()
            .map_err(|e| from_ureq("list sheets", e))?
            .into_json()
            .map_err(|e| ClientError::Decode {
                context: "list sheets",
                source: e,
            })?;
        Ok(body
            .sheets
            .into_iter()
            .map(|s| s.properties.into())
            .collect())
    }

    fn batch_update(
        &mut self,
        spreadsheet: &SpreadsheetId,
        requests: Vec<BatchRequest>,
    ) -> Result<(), ClientError> {
        let target = format!("{}:batchUpdate", spreadsheet.0);
        let url = self.endpoint(&[&target])?;
        tracing::info!(requests = requests.len(), "applying batch update");
        let auth = self.bearer()?;
        self.agent
            .post(url.as_str())
            .set("Authorization", &auth)
            .send_json(BatchUpdateBody { requests })
            .map_err(|e| from_ureq("batch update", e))?;
        Ok(())
    }
}
