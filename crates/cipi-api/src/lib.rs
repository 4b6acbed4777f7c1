// cipi-api: Async Rust client for the Cisco Prime Infrastructure REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;

pub use auth::Credentials;
pub use client::{DEVICES_PATH, DeviceQuery, PrimeClient, base_url_for};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
