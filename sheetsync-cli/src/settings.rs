//! Flag, environment and config-file settings merged into one view.

use std::time::Duration;

use anyhow::{Context, Result};

use sheetsync_client::{
    build_agent, CredentialProvider, HttpSheetsClient, InstalledAppCredentials, StaticToken,
};
use sheetsync_core::config::{self, Config};

use crate::Cli;

/// Everything needed to reach the remote. Flags (and their env vars)
/// override the config file, which overrides the defaults.
pub struct Settings {
    pub config: Config,
    pub access_token: Option<String>,
}

impl Settings {
    pub fn load(cli: &Cli) -> Result<Self> {
        let home = config::home()?;
        let mut config = config::load_at(&home, cli.config.as_deref())?;

        if let Some(path) = &cli.client_secret {
            config.client_secret = path.clone();
        }
        if let Some(path) = &cli.token_file {
            config.token_file = path.clone();
        }
        if let Some(base) = &cli.api_base {
            config.api_base = base.clone();
        }
        tracing::debug!(?config, "resolved settings");

        Ok(Self {
            config,
            access_token: cli.access_token.clone(),
        })
    }

    /// HTTP client with a static token when one was given, otherwise the
    /// stored (or freshly authorized) OAuth credentials.
    pub fn client(&self) -> Result<HttpSheetsClient<Box<dyn CredentialProvider>>> {
        let agent = build_agent(Duration::from_secs(self.config.timeout_secs));

        let credentials: Box<dyn CredentialProvider> = match &self.access_token {
            Some(token) => Box::new(StaticToken(token.clone())),
            None => Box::new(
                InstalledAppCredentials::load(
                    &self.config.client_secret,
                    &self.config.token_file,
                    &self.config.oauth_scope,
                    agent.clone(),
                )
                .with_context(|| {
                    let path = self.config.token_file.display();
                    format!("failed to load credentials from {path}")
                })?,
            ),
        };

        HttpSheetsClient::with_agent(&self.config.api_base, agent, credentials)
            .with_context(|| format!("invalid API base '{}'", self.config.api_base))
    }
}
