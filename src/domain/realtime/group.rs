//! Delivery groups.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

const MAX_GROUP_KEY_LEN: usize = 256;

/// Opaque membership key used to scope delivery (a user or tenant id).
///
/// Keys are supplied by clients and are not checked against the connecting
/// principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("group"));
        }
        if trimmed.len() > MAX_GROUP_KEY_LEN {
            return Err(ValidationError::out_of_range(
                "group",
                1,
                MAX_GROUP_KEY_LEN as i64,
                trimmed.len() as i64,
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GroupKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GroupKey::new(value)
    }
}

impl From<GroupKey> for String {
    fn from(key: GroupKey) -> Self {
        key.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_key() {
        assert_eq!(GroupKey::new(" tenant-1 ").unwrap().as_str(), "tenant-1");
    }

    #[test]
    fn rejects_blank_key() {
        assert!(GroupKey::new("  ").is_err());
    }

    #[test]
    fn rejects_oversized_key() {
        assert!(GroupKey::new("x".repeat(MAX_GROUP_KEY_LEN + 1)).is_err());
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<GroupKey>("\"\"").is_err());
        let key: GroupKey = serde_json::from_str("\"tenant-2\"").unwrap();
        assert_eq!(key.as_str(), "tenant-2");
    }
}
