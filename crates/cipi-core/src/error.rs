// ── Core error types ──
//
// User-facing errors from cipi-core. Consumers never see reqwest errors
// or raw status codes directly; the `From<cipi_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Invalid device attribute(s): {}", .invalid.join(", "))]
    InvalidAttributes {
        invalid: Vec<String>,
        valid: Vec<&'static str>,
    },

    #[error("No {field} specified")]
    MissingField { field: &'static str },

    #[error("Invalid port {port}: expected 1-65535")]
    InvalidPort { port: u16 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid server URL: {reason}")]
    InvalidUrl { reason: String },

    // ── Input file errors ────────────────────────────────────────────
    #[error("Cannot open JSON input file. File \"{}\" does not exist", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Cannot open JSON input file \"{}\": {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse JSON input file \"{}\": {source}", .path.display())]
    FileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // ── Transport errors ─────────────────────────────────────────────
    #[error("Unable to connect to remote host {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("TLS setup failed: {message}")]
    Tls { message: String },

    #[error("HTTP authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("No JSON data received from the web server: {message}")]
    NoJson { message: String },

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cipi_api::Error> for CoreError {
    fn from(err: cipi_api::Error) -> Self {
        match err {
            cipi_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            cipi_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                CoreError::ConnectionFailed {
                    url,
                    reason: e.to_string(),
                }
            }
            cipi_api::Error::InvalidUrl(e) => CoreError::InvalidUrl {
                reason: e.to_string(),
            },
            cipi_api::Error::Tls(message) => CoreError::Tls { message },
            cipi_api::Error::Status { status, preview } => CoreError::Api {
                status,
                message: preview,
            },
            cipi_api::Error::NoJson { message, body: _ } => CoreError::NoJson { message },
        }
    }
}
