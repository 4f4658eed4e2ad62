//! Credential providers.
//!
//! Credentials are an explicit value handed to the HTTP client rather than
//! ambient file state. [`InstalledAppCredentials`] owns the token file and
//! exposes its load / refresh / persist steps; [`StaticToken`] wraps a bearer
//! token obtained elsewhere.
//!
//! # Token file
//!
//! Authorized-user JSON, written with mode `0600` via `.tmp` + rename:
//!
//! ```text
//! {"token": "...", "refresh_token": "...", "token_uri": "...",
//!  "client_id": "...", "client_secret": "...", "scopes": [...], "expiry": "..."}
//! ```

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::{auth_io, error_message, AuthError};

const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Tokens this close to expiry are treated as expired.
const EXPIRY_SKEW_SECS: i64 = 10;

/// Anything that can produce a bearer token for the next request.
pub trait CredentialProvider {
    fn access_token(&mut self) -> Result<String, AuthError>;
}

impl<C: CredentialProvider + ?Sized> CredentialProvider for Box<C> {
    fn access_token(&mut self) -> Result<String, AuthError> {
        (**self).access_token()
    }
}

// ---------------------------------------------------------------------------
// Static bearer token
// ---------------------------------------------------------------------------

/// A token minted outside sheetsync (e.g. `gcloud auth print-access-token`).
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl CredentialProvider for StaticToken {
    fn access_token(&mut self) -> Result<String, AuthError> {
        Ok(self.0.clone())
    }
}

// ---------------------------------------------------------------------------
// On-disk documents
// ---------------------------------------------------------------------------

/// The `installed` (or `web`) section of a downloaded OAuth client file.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

fn default_auth_uri() -> String {
    GOOGLE_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

impl ClientSecret {
    pub fn load(path: &Path) -> Result<Self, AuthError> {
        if !path.exists() {
            return Err(AuthError::MissingClientSecret {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| auth_io(path, e))?;
        let file: ClientSecretFile =
            serde_json::from_str(&contents).map_err(|e| AuthError::Json {
                path: path.to_path_buf(),
                source: e,
            })?;
        file.installed
            .or(file.web)
            .ok_or_else(|| AuthError::MalformedClientSecret {
                path: path.to_path_buf(),
            })
    }
}

/// Contents of the token file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedUser {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl AuthorizedUser {
    /// The stored token if it is present and not about to expire.
    ///
    /// A token without an expiry is assumed valid.
    pub fn valid_token(&self, now: DateTime<Utc>) -> Option<&str> {
        let token = self.token.as_deref()?;
        match self.expiry {
            Some(expiry) if expiry <= now + Duration::seconds(EXPIRY_SKEW_SECS) => None,
            _ => Some(token),
        }
    }

    fn apply(&mut self, response: TokenResponse, now: DateTime<Utc>) {
        self.token = Some(response.access_token);
        self.expiry = response.expires_in.map(|s| now + Duration::seconds(s));
        if let Some(refresh) = response.refresh_token {
            self.refresh_token = Some(refresh);
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Installed-app flow
// ---------------------------------------------------------------------------

/// OAuth credentials for a desktop ("installed") client.
pub struct InstalledAppCredentials {
    client_secret_path: PathBuf,
    token_path: PathBuf,
    scope: String,
    agent: ureq::Agent,
    user: Option<AuthorizedUser>,
}

impl InstalledAppCredentials {
    /// Read the token file if it exists. The client secret is only read when
    /// a fresh authorization is needed.
    pub fn load(
        client_secret_path: impl Into<PathBuf>,
        token_path: impl Into<PathBuf>,
        scope: impl Into<String>,
        agent: ureq::Agent,
    ) -> Result<Self, AuthError> {
        let token_path = token_path.into();
        let user = if token_path.exists() {
            let contents =
                std::fs::read_to_string(&token_path).map_err(|e| auth_io(&token_path, e))?;
            let user: AuthorizedUser =
                serde_json::from_str(&contents).map_err(|e| AuthError::Json {
                    path: token_path.clone(),
                    source: e,
                })?;
            tracing::debug!(path = %token_path.display(), "loaded stored credentials");
            Some(user)
        } else {
            None
        };

        Ok(Self {
            client_secret_path: client_secret_path.into(),
            token_path,
            scope: scope.into(),
            agent,
            user,
        })
    }

    pub fn user(&self) -> Option<&AuthorizedUser> {
        self.user.as_ref()
    }

    /// Exchange the stored refresh token for a new access token.
    pub fn refresh(&mut self) -> Result<(), AuthError> {
        let Some(user) = self.user.as_mut() else {
            return Err(AuthError::NoAccessToken);
        };
        let Some(refresh_token) = user.refresh_token.clone() else {
            return Err(AuthError::NoAccessToken);
        };

        tracing::info!("refreshing access token");
        let response = post_token(
            &self.agent,
            &user.token_uri,
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
                ("client_id", user.client_id.as_str()),
                ("client_secret", user.client_secret.as_str()),
            ],
        )?;
        user.apply(response, Utc::now());
        Ok(())
    }

    /// Run the loopback consent flow: print the consent URL, wait for the
    /// browser redirect on `127.0.0.1:<ephemeral>`, exchange the code.
    pub fn authorize(&mut self) -> Result<(), AuthError> {
        let secret = ClientSecret::load(&self.client_secret_path)?;

        let listener = TcpListener::bind(("127.0.0.1", 0)).map_err(AuthError::Callback)?;
        let port = listener.local_addr().map_err(AuthError::Callback)?.port();
        let redirect_uri = format!("http://127.0.0.1:{port}/");
        let state = new_state();
        let consent = authorization_url(&secret, &redirect_uri, &self.scope, &state)?;

        eprintln!("Please visit this URL to authorize sheetsync:\n\n{consent}\n");
        tracing::info!(port, "waiting for the authorization redirect");
        let code = wait_for_code(&listener, &state)?;

        let response = post_token(
            &self.agent,
            &secret.token_uri,
            &[
                ("grant_type", "authorization_code"),
                ("code", code.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("client_id", secret.client_id.as_str()),
                ("client_secret", secret.client_secret.as_str()),
            ],
        )?;

        let mut user = AuthorizedUser {
            token: None,
            refresh_token: None,
            token_uri: secret.token_uri,
            client_id: secret.client_id,
            client_secret: secret.client_secret,
            scopes: vec![self.scope.clone()],
            expiry: None,
        };
        user.apply(response, Utc::now());
        self.user = Some(user);
        Ok(())
    }

    /// Atomically write the current credentials to the token file.
    ///
    /// Write flow: serialize → `.json.tmp` sibling created with mode 0600 → `rename`.
    pub fn persist(&self) -> Result<(), AuthError> {
        let Some(user) = self.user.as_ref() else {
            return Ok(());
        };
        if let Some(dir) = self.token_path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| auth_io(dir, e))?;
            }
        }
        let tmp = self.token_path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(user).map_err(|e| AuthError::Json {
            path: self.token_path.clone(),
            source: e,
        })?;
        write_private(&tmp, json.as_bytes())?;
        std::fs::rename(&tmp, &self.token_path).map_err(|e| auth_io(&self.token_path, e))?;
        tracing::debug!(path = %self.token_path.display(), "saved credentials");
        Ok(())
    }
}

impl CredentialProvider for InstalledAppCredentials {
    fn access_token(&mut self) -> Result<String, AuthError> {
        let now = Utc::now();
        if let Some(token) = self.user.as_ref().and_then(|u| u.valid_token(now)) {
            return Ok(token.to_string());
        }

        let can_refresh = self
            .user
            .as_ref()
            .is_some_and(|u| u.refresh_token.is_some());
        if can_refresh {
            self.refresh()?;
        } else {
            self.authorize()?;
        }
        self.persist()?;

        self.user
            .as_ref()
            .and_then(|u| u.token.clone())
            .ok_or(AuthError::NoAccessToken)
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn post_token(
    agent: &ureq::Agent,
    token_uri: &str,
    form: &[(&str, &str)],
) -> Result<TokenResponse, AuthError> {
    match agent.post(token_uri).send_form(form) {
        Ok(response) => response.into_json().map_err(AuthError::Decode),
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            Err(AuthError::TokenEndpoint {
                status,
                message: error_message(&body),
            })
        }
        Err(ureq::Error::Transport(t)) => Err(AuthError::Transport(Box::new(t))),
    }
}

pub(crate) fn authorization_url(
    secret: &ClientSecret,
    redirect_uri: &str,
    scope: &str,
    state: &str,
) -> Result<Url, AuthError> {
    Ok(Url::parse_with_params(
        &secret.auth_uri,
        &[
            ("response_type", "code"),
            ("client_id", secret.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("scope", scope),
            ("state", state),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )?)
}

/// Interpret the request line of a redirect hitting the loopback listener.
///
/// `Ok(None)` means an unrelated request (e.g. `/favicon.ico`).
pub(crate) fn parse_callback(
    request_line: &str,
    expected_state: &str,
) -> Result<Option<String>, AuthError> {
    let target = request_line.split_whitespace().nth(1).unwrap_or("/");
    let url = Url::parse("http://127.0.0.1/")?.join(target)?;

    let (mut code, mut state, mut error) = (None, None, None);
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AuthError::Denied(error));
    }
    let Some(code) = code else {
        return Ok(None);
    };
    if state.as_deref() != Some(expected_state) {
        return Err(AuthError::StateMismatch);
    }
    Ok(Some(code))
}

fn wait_for_code(listener: &TcpListener, state: &str) -> Result<String, AuthError> {
    for stream in listener.incoming() {
        let mut stream = stream.map_err(AuthError::Callback)?;
        let mut line = String::new();
        BufReader::new(&stream)
            .read_line(&mut line)
            .map_err(AuthError::Callback)?;

        let outcome = parse_callback(&line, state);
        let (status, body) = match &outcome {
            Ok(Some(_)) => (
                "200 OK",
                "The authentication flow has completed. You may close this window.",
            ),
            Ok(None) => ("404 Not Found", "Not found."),
            Err(_) => ("400 Bad Request", "Authorization failed. See the terminal."),
        };
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .map_err(AuthError::Callback)?;

        if let Some(code) = outcome? {
            return Ok(code);
        }
    }
    Err(AuthError::Callback(std::io::Error::other(
        "loopback listener closed",
    )))
}

/// Random CSRF token for one consent round-trip.
fn new_state() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Write `contents` to `path`, creating it owner-only from the first byte.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> Result<(), AuthError> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .map_err(|e| auth_io(path, e))?;
    // `mode` only applies on creation; a stale tmp file keeps its old bits.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))
        .map_err(|e| auth_io(path, e))?;
    file.write_all(contents).map_err(|e| auth_io(path, e))
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> Result<(), AuthError> {
    std::fs::write(path, contents).map_err(|e| auth_io(path, e))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
