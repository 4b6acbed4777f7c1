// ── Data source selection ──
//
// A document comes either from a JSON file on disk or from one GET against
// a Prime server. Exactly one of the two runs per invocation, decided by
// whether an input file was given.

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info};

use cipi_api::{Credentials, DeviceQuery, PrimeClient, TlsMode, TransportConfig, base_url_for};

use crate::error::CoreError;

/// Default HTTPS port of the Prime API.
pub const DEFAULT_PORT: u16 = 443;

/// Default connect/read timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the raw document comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// A previously saved Prime response.
    File(PathBuf),
    /// A live Prime server.
    Remote(RemoteSource),
}

impl DataSource {
    /// Produce the raw document from whichever source was chosen.
    pub async fn load(&self) -> Result<Value, CoreError> {
        match self {
            Self::File(path) => {
                info!(path = %path.display(), "reading device data from file");
                load_file(path)
            }
            Self::Remote(remote) => remote.fetch().await,
        }
    }
}

/// Connection settings for a live Prime server.
///
/// Host and credentials stay optional here so that a missing value is
/// reported by name when the fetch is attempted.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub timeout: Duration,
    pub tls: TlsMode,
    pub query: DeviceQuery,
}

impl Default for RemoteSource {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
            tls: TlsMode::default(),
            query: DeviceQuery::default(),
        }
    }
}

impl RemoteSource {
    /// Check that host, username, and password are all present, in that order.
    /// An empty value counts as missing.
    pub fn require(&self) -> Result<(&str, Credentials), CoreError> {
        let host = self
            .host
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or(CoreError::MissingField { field: "host" })?;
        let username = self
            .username
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(CoreError::MissingField { field: "username" })?;
        let password = self
            .password
            .clone()
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or(CoreError::MissingField { field: "password" })?;
        if self.port == 0 {
            return Err(CoreError::InvalidPort { port: self.port });
        }
        Ok((host, Credentials::new(username, password)))
    }

    /// Fetch the device inventory from the server.
    pub async fn fetch(&self) -> Result<Value, CoreError> {
        let (host, credentials) = self.require()?;
        let base_url = base_url_for(host, self.port).map_err(|e| match e {
            cipi_api::Error::InvalidUrl(source) => CoreError::InvalidUrl {
                reason: format!("host {host:?}: {source}"),
            },
            other => other.into(),
        })?;
        info!(%base_url, "fetching device data");

        let transport = TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        };
        let client = PrimeClient::new(base_url, credentials, &transport)?;
        let doc = client.devices(self.query).await?;
        debug!("device data received");
        Ok(doc)
    }
}

/// Read and parse a JSON document from disk.
pub fn load_file(path: &Path) -> Result<Value, CoreError> {
    if !path.exists() {
        return Err(CoreError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| CoreError::FileParse {
        path: path.to_path_buf(),
        source,
    })
}
