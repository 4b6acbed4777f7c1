//! Output rendering: CSV rows or a dump of the raw document.
//!
//! The mode is resolved once from the CLI flags into an [`OutputMode`]; the
//! renderers return the full text so the caller decides where it goes.

use std::borrow::Cow;

use serde_json::Value;

use crate::attributes::AttributeSet;
use crate::filter::{self, FlatRow};

/// What to print for a loaded document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Compact JSON of the whole document.
    DumpJson,
    /// Single-line native (`Debug`) representation of the document.
    DumpNative,
    /// Indented native (`Debug`) representation of the document.
    DumpNativePretty,
    /// CSV of the requested attributes.
    #[default]
    Csv,
}

impl OutputMode {
    /// Resolve the dump flags; the first flag set wins, in declaration order.
    pub fn from_flags(dump_json: bool, dump_native: bool, dump_native_pretty: bool) -> Self {
        if dump_json {
            Self::DumpJson
        } else if dump_native {
            Self::DumpNative
        } else if dump_native_pretty {
            Self::DumpNativePretty
        } else {
            Self::Csv
        }
    }
}

/// Render a document in the given mode. Every emitted line ends with `\n`.
pub fn render(mode: OutputMode, doc: &Value, attributes: &AttributeSet, header: bool) -> String {
    match mode {
        OutputMode::DumpJson => format!("{doc}\n"),
        OutputMode::DumpNative => format!("{doc:?}\n"),
        OutputMode::DumpNativePretty => format!("{doc:#?}\n"),
        OutputMode::Csv => render_csv(&filter::filter(doc, attributes), attributes, header),
    }
}

/// Render flat rows as CSV, optionally preceded by the attribute header.
pub fn render_csv(rows: &[FlatRow], attributes: &AttributeSet, header: bool) -> String {
    let mut out = String::new();

    if header {
        push_record(&mut out, attributes.iter().copied());
    }
    for row in rows {
        push_record(&mut out, row.values());
    }

    out
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field));
    }
    out.push('\n');
}

/// RFC 4180 quoting: fields holding a delimiter, quote, or line break are
/// wrapped in double quotes with inner quotes doubled. Everything else,
/// including the empty string, is written verbatim.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
