use thiserror::Error;

/// Top-level error type for the `cipi-api` crate.
///
/// Covers every failure mode of the single device fetch: transport,
/// authentication, HTTP status, and payload decoding. `cipi-core` maps
/// these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// HTTP 401 from the Prime server (wrong username or password).
    #[error("HTTP authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Response ────────────────────────────────────────────────────
    /// Non-success status other than 401.
    #[error("HTTP {status}: {preview}")]
    Status { status: u16, preview: String },

    /// The body could not be decoded as JSON, with the raw body for debugging.
    #[error("No JSON data in response: {message}")]
    NoJson { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request never produced a response
    /// (DNS, refused connection, timeout).
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Returns `true` for HTTP 401.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}
