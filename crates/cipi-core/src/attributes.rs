//! Device attribute whitelist and validation.
//!
//! Prime's `devicesDTO` carries many fields; only the names listed in
//! [`DEVICE_ATTRIBUTES`] are accepted for CSV output. Third-party devices
//! may report a subset of them.

use std::ops::Deref;

use crate::error::CoreError;

/// The recognised device attributes, in canonical column order.
pub const DEVICE_ATTRIBUTES: [&str; 20] = [
    "clearedAlarms",
    "collectionDetail",
    "collectionTime",
    "creationTime",
    "criticalAlarms",
    "deviceId",
    "deviceName",
    "deviceType",
    "informationAlarms",
    "ipAddress",
    "location",
    "majorAlarms",
    "managementStatus",
    // Prime's documentation says `manufacturerPartNr`; the payload uses the plural.
    "manufacturerPartNrs",
    "minorAlarms",
    "productFamily",
    "reachability",
    "softwareType",
    "softwareVersion",
    "warningAlarms",
];

/// An ordered list of whitelisted attribute names.
///
/// Only constructible through [`validate`] or [`AttributeSet::all`], so every
/// name it holds is a member of [`DEVICE_ATTRIBUTES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSet(Vec<&'static str>);

impl AttributeSet {
    /// The full whitelist in canonical order.
    pub fn all() -> Self {
        Self(DEVICE_ATTRIBUTES.to_vec())
    }

    pub fn names(&self) -> &[&'static str] {
        &self.0
    }
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::all()
    }
}

impl Deref for AttributeSet {
    type Target = [&'static str];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Look up a name in the whitelist, returning its static form.
pub fn lookup(name: &str) -> Option<&'static str> {
    DEVICE_ATTRIBUTES.iter().copied().find(|known| *known == name)
}

/// Validate requested attribute names against the whitelist.
///
/// An empty request selects every attribute. Otherwise all names must be
/// known; order and duplicates are kept as given.
pub fn validate<S: AsRef<str>>(requested: &[S]) -> Result<AttributeSet, CoreError> {
    if requested.is_empty() {
        return Ok(AttributeSet::all());
    }

    let mut accepted = Vec::with_capacity(requested.len());
    let mut invalid = Vec::new();

    for name in requested {
        let name = name.as_ref();
        match lookup(name) {
            Some(known) => accepted.push(known),
            None => invalid.push(name.to_owned()),
        }
    }

    if invalid.is_empty() {
        Ok(AttributeSet(accepted))
    } else {
        Err(CoreError::InvalidAttributes {
            invalid,
            valid: DEVICE_ATTRIBUTES.to_vec(),
        })
    }
}

/// Split a comma-separated attribute list.
///
/// Items are kept exactly as written, so blanks and padded names reach
/// [`validate`] and are rejected there.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_owned).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_selects_full_whitelist_in_order() {
        let set = validate::<&str>(&[]).unwrap();
        assert_eq!(set.names(), &DEVICE_ATTRIBUTES[..]);
    }

    #[test]
    fn valid_subset_is_returned_unchanged() {
        let set = validate(&["reachability", "deviceName", "ipAddress"]).unwrap();
        assert_eq!(set.names(), &["reachability", "deviceName", "ipAddress"]);
    }

    #[test]
    fn duplicates_are_not_collapsed() {
        let set = validate(&["deviceName", "deviceName"]).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn any_unknown_name_rejects_whole_request() {
        let err = validate(&["deviceName", "bogusField", "serialNumber"]).unwrap_err();
        match err {
            CoreError::InvalidAttributes { invalid, valid } => {
                assert_eq!(invalid, vec!["bogusField", "serialNumber"]);
                assert_eq!(valid, DEVICE_ATTRIBUTES.to_vec());
            }
            other => panic!("expected InvalidAttributes, got {other:?}"),
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(validate(&["DeviceName"]).is_err());
    }

    #[test]
    fn whitelist_has_no_duplicates() {
        let mut names = DEVICE_ATTRIBUTES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DEVICE_ATTRIBUTES.len());
    }

    #[test]
    fn parse_list_keeps_items_verbatim() {
        assert_eq!(
            parse_list("deviceName, ipAddress,"),
            vec!["deviceName", " ipAddress", ""]
        );
        assert_eq!(parse_list("deviceName"), vec!["deviceName"]);
    }

    #[test]
    fn trailing_comma_is_rejected() {
        let err = validate(&parse_list("deviceName,")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidAttributes { ref invalid, .. } if invalid == &[""]));
    }

    #[test]
    fn padded_name_is_rejected() {
        let err = validate(&parse_list(" deviceName")).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidAttributes { ref invalid, .. } if invalid == &[" deviceName"])
        );
    }
}
