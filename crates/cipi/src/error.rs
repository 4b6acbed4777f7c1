//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use cipi_config::ConfigError;
use cipi_core::CoreError;

/// Process exit codes. Every failure kind shares one code.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid device attribute(s): {invalid}")]
    #[diagnostic(code(cipi::invalid_attributes), help("Valid attributes are:\n{valid}"))]
    InvalidAttributes { invalid: String, valid: String },

    #[error("No --{field} specified")]
    #[diagnostic(
        code(cipi::missing_field),
        help(
            "Pass --{field}, set {env}, or add it to a profile in {path}.\n\
             Use --input to read a saved JSON response instead."
        )
    )]
    MissingField {
        field: &'static str,
        env: String,
        path: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cipi::validation))]
    Validation { field: String, reason: String },

    #[error("Invalid server address: {reason}")]
    #[diagnostic(
        code(cipi::invalid_url),
        help("--host takes a hostname or an IP address (IPv6 with or without brackets), without scheme or port.")
    )]
    InvalidUrl { reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(cipi::profile_not_found),
        help("Available profiles: {available}\nConfiguration file: {path}")
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(cipi::config), help("Check the configuration file at {path}"))]
    Config { message: String, path: String },

    // ── Input file ───────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(cipi::input_file),
        help("The file must hold a Prime Devices response, e.g. one saved with --dump.")
    )]
    InputFile { message: String },

    // ── Connection ───────────────────────────────────────────────────

    #[error("Unable to connect to remote host {url}")]
    #[diagnostic(
        code(cipi::connection_failed),
        help(
            "Check that the Prime server is reachable on the given host and port.\n\
             Raise the limit with --timeout, or use --insecure for self-signed certificates."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(cipi::tls),
        help("Check that --ca-cert names a readable PEM file, or use --insecure for self-signed certificates.")
    )]
    Tls { message: String },

    #[error("HTTP authentication failed: wrong username or password")]
    #[diagnostic(
        code(cipi::auth_failed),
        help("Verify --username and --password, or the credentials of the active profile.")
    )]
    AuthFailed,

    // ── Response ─────────────────────────────────────────────────────

    #[error("We didn't get any JSON data back from the web server: {message}")]
    #[diagnostic(
        code(cipi::no_json),
        help("Make sure the host runs Prime Infrastructure and the API is enabled.")
    )]
    NoJson { message: String },

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(cipi::api_error))]
    ApiError { status: u16, message: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map a core error, using `config_path` to point at the profile file.
    pub fn from_core(err: CoreError, config_path: &str) -> Self {
        match err {
            CoreError::InvalidAttributes { invalid, valid } => CliError::InvalidAttributes {
                invalid: invalid.join(", "),
                valid: valid
                    .iter()
                    .map(|name| format!("  {name}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            },

            CoreError::MissingField { field } => CliError::MissingField {
                field,
                env: format!("CIPI_{}", field.to_uppercase()),
                path: config_path.to_owned(),
            },

            CoreError::InvalidPort { port } => CliError::Validation {
                field: "port".into(),
                reason: format!("{port} is outside 1-65535"),
            },

            CoreError::Config { message } => CliError::Config {
                message,
                path: config_path.to_owned(),
            },

            CoreError::InvalidUrl { reason } => CliError::InvalidUrl { reason },

            err @ (CoreError::FileNotFound { .. }
            | CoreError::FileRead { .. }
            | CoreError::FileParse { .. }) => CliError::InputFile {
                message: err.to_string(),
            },

            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Tls { message } => CliError::Tls { message },

            CoreError::AuthenticationFailed { .. } => CliError::AuthFailed,

            CoreError::NoJson { message } => CliError::NoJson { message },

            CoreError::Api { status, message } => CliError::ApiError { status, message },
        }
    }

    pub fn from_config(err: &ConfigError, config_path: &str) -> Self {
        CliError::Config {
            message: err.to_string(),
            path: config_path.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use miette::Diagnostic;

    use super::*;

    #[test]
    fn invalid_attributes_help_lists_whitelist() {
        let err = CliError::from_core(
            CoreError::InvalidAttributes {
                invalid: vec!["bogusField".into()],
                valid: cipi_core::DEVICE_ATTRIBUTES.to_vec(),
            },
            "/tmp/config.toml",
        );
        assert_eq!(err.to_string(), "Invalid device attribute(s): bogusField");
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("  deviceName"));
        assert!(help.contains("  warningAlarms"));
    }

    #[test]
    fn missing_field_names_flag_and_env() {
        let err = CliError::from_core(
            CoreError::MissingField { field: "username" },
            "/tmp/config.toml",
        );
        assert_eq!(err.to_string(), "No --username specified");
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("CIPI_USERNAME"));
    }

    #[test]
    fn authentication_is_distinct_from_connection() {
        let auth = CliError::from_core(
            CoreError::AuthenticationFailed {
                message: "wrong username or password".into(),
            },
            "",
        );
        let conn = CliError::from_core(
            CoreError::ConnectionFailed {
                url: "https://prime/".into(),
                reason: "connection refused".into(),
            },
            "",
        );
        assert!(matches!(auth, CliError::AuthFailed));
        assert!(matches!(conn, CliError::ConnectionFailed { .. }));
        assert_ne!(auth.to_string(), conn.to_string());
    }

    #[test]
    fn tls_error_points_at_ca_cert() {
        let err = CliError::from_core(
            CoreError::Tls {
                message: "failed to read CA cert: No such file or directory".into(),
            },
            "",
        );
        assert!(matches!(err, CliError::Tls { .. }));
        assert!(!err.to_string().contains("Unable to connect"));
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("--ca-cert"));
    }

    #[test]
    fn invalid_url_does_not_blame_config_file() {
        let err = CliError::from_core(
            CoreError::InvalidUrl {
                reason: "host \"prime host\": invalid domain character".into(),
            },
            "/tmp/config.toml",
        );
        assert!(matches!(err, CliError::InvalidUrl { .. }));
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("--host"));
        assert!(!help.contains("/tmp/config.toml"));
    }
}
