//! Repository records returned by search.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A repository returned by the search endpoint.
///
/// Only `full_name` is interpreted. Every other field GitHub returns is kept
/// as-is so it can be printed unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Remaining fields of the API response.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RepositoryRecord {
    /// Creates a record with no fields besides its name.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            fields: Map::new(),
        }
    }
}

/// Splits an "owner/name" identifier.
///
/// Returns `None` unless both halves are non-empty and there is exactly one `/`.
pub(crate) fn split_full_name(full_name: &str) -> Option<(&str, &str)> {
    let (owner, name) = full_name.split_once('/')?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return None;
    }
    Some((owner, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_unknown_fields_verbatim() {
        let json = r#"{"id":42,"full_name":"numpy/numpy","stargazers_count":30000,"owner":{"login":"numpy"}}"#;
        let record: RepositoryRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.full_name, "numpy/numpy");
        assert_eq!(record.fields["stargazers_count"], 30000);

        let back: Value = serde_json::to_value(&record).unwrap();
        let original: Value = serde_json::from_str(json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn splits_owner_and_name() {
        assert_eq!(
            split_full_name("rust-lang/cargo"),
            Some(("rust-lang", "cargo"))
        );
        assert_eq!(split_full_name("cargo"), None);
        assert_eq!(split_full_name("/cargo"), None);
        assert_eq!(split_full_name("rust-lang/"), None);
        assert_eq!(split_full_name("a/b/c"), None);
    }
}
