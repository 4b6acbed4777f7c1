//! Flatten `queryResponse.entity[].devicesDTO` records into rows.
//!
//! Every row holds exactly one cell per requested attribute, in requested
//! order. An attribute the device does not report becomes an empty cell.

use serde_json::Value;

use crate::attributes::AttributeSet;

/// JSON pointer to the entity list inside a Prime response.
pub const ENTITY_POINTER: &str = "/queryResponse/entity";

/// Key of the device detail object inside each entity.
pub const DEVICE_KEY: &str = "devicesDTO";

/// Separator for list-valued attributes.
pub const LIST_SEPARATOR: &str = ";";

/// One device reduced to the requested attribute columns.
///
/// Cells line up with the [`AttributeSet`] the row was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    cells: Vec<String>,
}

impl FlatRow {
    /// Cell values in column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(String::as_str)
    }
}

/// The entity list of a document, in source order.
///
/// A missing path yields no entities; a lone entity object (as some Prime
/// versions return for a single result) is treated as a one-element list.
pub fn entities(doc: &Value) -> &[Value] {
    match doc.pointer(ENTITY_POINTER) {
        Some(Value::Array(items)) => items.as_slice(),
        Some(single @ Value::Object(_)) => std::slice::from_ref(single),
        _ => &[],
    }
}

/// Attribute lookup inside one entity's device detail.
fn lookup<'a>(entity: &'a Value, name: &str) -> Option<&'a Value> {
    entity.get(DEVICE_KEY)?.get(name)
}

/// Flatten every entity into a row of the requested attributes.
pub fn filter(doc: &Value, attributes: &AttributeSet) -> Vec<FlatRow> {
    entities(doc)
        .iter()
        .map(|entity| FlatRow {
            cells: attributes
                .iter()
                .map(|name| lookup(entity, name).map(stringify).unwrap_or_default())
                .collect(),
        })
        .collect()
}

/// Render a JSON value as a single cell.
///
/// Strings are taken verbatim, `null` is empty, arrays join their
/// stringified elements with [`LIST_SEPARATOR`], and objects fall back to
/// compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        Value::Object(_) => value.to_string(),
    }
}
