//! Device inventory pipeline between `cipi-api` and the `cipi` CLI.
//!
//! - **[`DataSource`]** — picks a saved JSON file or a live Prime server and
//!   produces one raw `serde_json::Value` document.
//! - **[`attributes`]** — the fixed device attribute whitelist and
//!   [`validate`](attributes::validate), run before any I/O.
//! - **[`filter`]** — flattens `queryResponse.entity[].devicesDTO` into
//!   [`FlatRow`]s, one empty cell per attribute a device does not report.
//! - **[`render`]** — CSV or raw document dumps, selected by [`OutputMode`].
//!
//! [`run`] strings these together for a single invocation.

pub mod attributes;
pub mod error;
pub mod filter;
pub mod render;
pub mod source;

use tracing::debug;

pub use attributes::{AttributeSet, DEVICE_ATTRIBUTES};
pub use error::CoreError;
pub use filter::FlatRow;
pub use render::OutputMode;
pub use source::{DataSource, RemoteSource};

/// Everything one invocation needs, already resolved from flags and config.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub source: DataSource,
    /// Requested attribute names; empty selects the full whitelist.
    pub attributes: Vec<String>,
    pub mode: OutputMode,
    /// Emit the CSV header line.
    pub header: bool,
}

/// Validate, load, and render. Returns the text to print.
///
/// Attribute validation happens first, so an unknown name never costs a
/// network round trip or a file read.
pub async fn run(invocation: &Invocation) -> Result<String, CoreError> {
    let attributes = attributes::validate(&invocation.attributes)?;
    debug!(columns = attributes.len(), mode = ?invocation.mode, "attributes validated");

    let doc = invocation.source.load().await?;
    debug!(entities = filter::entities(&doc).len(), "document loaded");

    Ok(render::render(
        invocation.mode,
        &doc,
        &attributes,
        invocation.header,
    ))
}
