//! Configuration for the cipi CLI.
//!
//! TOML profiles, environment overrides, and password resolution
//! (env + keyring + plaintext). The CLI layers its own flags on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Keyring service name for stored passwords.
pub const KEYRING_SERVICE: &str = "cipi";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named Prime server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            port: default_port(),
            timeout: default_timeout(),
            insecure: false,
            max_results: default_max_results(),
        }
    }
}

fn default_port() -> u16 {
    443
}
fn default_timeout() -> u64 {
    5
}
fn default_max_results() -> u32 {
    1000
}

/// A named Prime server profile. Every field is optional; CLI flags fill gaps.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Prime host name or address.
    pub host: Option<String>,

    /// HTTPS port.
    pub port: Option<u16>,

    /// API username.
    pub username: Option<String>,

    /// Password (plaintext — prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override `.maxResults`.
    pub max_results: Option<u32>,

    /// Default attribute selection for this profile.
    pub attributes: Option<Vec<String>>,
}

impl Config {
    /// Resolve the active profile name: explicit choice, then config default,
    /// then `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Sorted, comma-joined profile names (for diagnostics).
    pub fn profile_names(&self) -> String {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "cipi", "cipi").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cipi");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load a Config from a specific file + environment.
///
/// Nested keys are addressed with a double underscore, e.g.
/// `CIPI_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CIPI_").split("__"));

    let config: Config = figment.extract()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.defaults.port == 0 {
        return Err(ConfigError::Validation {
            field: "defaults.port".into(),
            reason: "expected 1-65535".into(),
        });
    }
    for (name, profile) in &config.profiles {
        if profile.port == Some(0) {
            return Err(ConfigError::Validation {
                field: format!("profiles.{name}.port"),
                reason: "expected 1-65535".into(),
            });
        }
    }
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve a profile's password from its credential chain.
///
/// 1. The variable named by `password_env`
/// 2. The system keyring entry `cipi` / `<profile>/password`
/// 3. Plaintext `password` in the profile
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Some(SecretString::from(pw));
        }
    }

    profile.password.clone().map(SecretString::from)
}
