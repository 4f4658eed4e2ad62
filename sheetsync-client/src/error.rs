//! Error types for sheetsync-client.

use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the spreadsheet endpoints.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The remote answered with a non-success status.
    #[error("{context} failed with HTTP {status}: {message}")]
    Status {
        context: &'static str,
        status: u16,
        message: String,
    },

    /// DNS, connect, TLS or timeout failure before a response arrived.
    #[error("{context} failed: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: Box<ureq::Transport>,
    },

    /// The response body was not the JSON we expected.
    #[error("{context} returned an unreadable body: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("API base URL '{0}' cannot carry path segments")]
    InvalidBaseUrl(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Failures obtaining or persisting an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("OAuth client secret not found at {path}; download it from the cloud console")]
    MissingClientSecret { path: PathBuf },

    #[error("{path} has neither an \"installed\" nor a \"web\" client section")]
    MalformedClientSecret { path: PathBuf },

    #[error("token endpoint answered HTTP {status}: {message}")]
    TokenEndpoint { status: u16, message: String },

    #[error("token endpoint unreachable: {0}")]
    Transport(Box<ureq::Transport>),

    #[error("token endpoint returned an unreadable body: {0}")]
    Decode(#[source] std::io::Error),

    #[error("authorization callback failed: {0}")]
    Callback(#[source] std::io::Error),

    #[error("authorization was denied: {0}")]
    Denied(String),

    #[error("authorization callback carried an unexpected state parameter")]
    StateMismatch,

    #[error("token response did not include an access token")]
    NoAccessToken,

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub(crate) fn auth_io(path: impl Into<PathBuf>, source: std::io::Error) -> AuthError {
    AuthError::Io {
        path: path.into(),
        source,
    }
}

/// Pull the human-readable message out of a Google error envelope
/// (`{"error": {"message": …}}`), falling back to the raw body.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            let err = v.get("error")?;
            err.get("message")
                .or_else(|| v.get("error_description"))
                .or(Some(err))
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

pub(crate) fn from_ureq(context: &'static str, err: ureq::Error) -> ClientError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            ClientError::Status {
                context,
                status,
                message: error_message(&body),
            }
        }
        ureq::Error::Transport(t) => ClientError::Transport {
            context,
            source: Box::new(t),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_from_google_envelope() {
        let body = r#"{"error": {"code": 400, "message": "Unable to parse range: Nope!1:1", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "Unable to parse range: Nope!1:1");
    }

    #[test]
    fn message_from_oauth_error() {
        let body = r#"{"error": "invalid_grant", "error_description": "Token has been expired or revoked."}"#;
        assert_eq!(error_message(body), "Token has been expired or revoked.");
    }

    #[test]
    fn message_from_bare_oauth_error() {
        assert_eq!(error_message(r#"{"error": "invalid_client"}"#), "invalid_client");
    }

    #[test]
    fn message_falls_back_to_body() {
        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
    }
}
