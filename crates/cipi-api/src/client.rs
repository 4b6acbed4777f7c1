// Prime REST API HTTP client
//
// Wraps `reqwest::Client` with the Prime resource path, query parameter
// encoding, Basic auth, and status/body mapping. Every request is a single
// GET; the response is owned by the call and dropped on every exit path.

use std::net::IpAddr;

use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Resource path of the device inventory, without the format suffix.
pub const DEVICES_PATH: &str = "/webacs/api/v1/data/Devices";

/// Format suffix selecting a JSON response.
const FORMAT_SUFFIX: &str = "json";

/// Upper bound of bytes echoed back from an unexpected body.
const PREVIEW_LEN: usize = 200;

/// Query options for the device listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceQuery {
    /// Ask Prime for the full device detail (`.full=true`).
    pub full_detail: bool,
    /// Maximum number of entities returned (`.maxResults`).
    pub max_results: u32,
}

impl Default for DeviceQuery {
    fn default() -> Self {
        Self {
            full_detail: true,
            max_results: 1000,
        }
    }
}

impl DeviceQuery {
    fn params(self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if self.full_detail {
            params.push((".full", "true".to_owned()));
        }
        params.push((".maxResults", self.max_results.to_string()));
        params
    }
}

/// Build the HTTPS base URL for a Prime host and port.
///
/// Bare IPv6 literals are bracketed; an already bracketed one is kept.
pub fn base_url_for(host: &str, port: u16) -> Result<Url, Error> {
    let url = match host.parse::<IpAddr>() {
        Ok(IpAddr::V6(addr)) => format!("https://[{addr}]:{port}/"),
        _ => format!("https://{host}:{port}/"),
    };
    Ok(Url::parse(&url)?)
}

/// HTTP client for the Prime Infrastructure data API.
///
/// Returns the decoded JSON document untouched; shaping the data is the
/// caller's concern.
pub struct PrimeClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl PrimeClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the server root (e.g. `https://prime.example.net:443/`).
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, credentials))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// Build the full device listing URL: `{base}{DEVICES_PATH}.json?{params}`.
    pub fn devices_url(&self, query: DeviceQuery) -> Result<Url, Error> {
        let mut url = self
            .base_url
            .join(&format!("{DEVICES_PATH}.{FORMAT_SUFFIX}"))?;
        url.query_pairs_mut().extend_pairs(query.params());
        Ok(url)
    }

    /// Fetch the device inventory as a raw JSON document.
    pub async fn devices(&self, query: DeviceQuery) -> Result<Value, Error> {
        let url = self.devices_url(query)?;
        self.get_json(url).await
    }

    /// Send one authenticated GET and decode the body as JSON.
    async fn get_json(&self, url: Url) -> Result<Value, Error> {
        debug!(%url, user = %self.credentials.username, "GET");

        let request = self
            .credentials
            .apply(self.http.get(url))
            .header(reqwest::header::ACCEPT, "application/json");
        let resp = request.send().await?;
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "wrong username or password".into(),
            });
        }

        // Raw bytes: a body that is not valid UTF-8 is not JSON either.
        let body = resp.bytes().await?;
        trace!(%status, bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                preview: preview(&String::from_utf8_lossy(&body)).to_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            let text = String::from_utf8_lossy(&body).into_owned();
            Error::NoJson {
                message: format!("{e} (body preview: {:?})", preview(&text)),
                body: text,
            }
        })
    }
}

/// First few hundred bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(PREVIEW_LEN);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
