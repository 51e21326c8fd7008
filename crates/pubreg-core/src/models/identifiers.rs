use serde::{Deserialize, Serialize};

/// Source name under which records carry their persistent repository handle.
pub const HANDLE_SOURCE_NAME: &str = "handle";

/// Source name under which records carry the research-information registry id.
pub const CRISTIN_SOURCE_NAME: &str = "Cristin";

/// Identifier of a record in the target registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Builds an id from either a bare identifier or a resource URI such as
    /// `https://api.example.org/publication/0190e1c2`; the last non-empty path
    /// segment is kept.
    pub fn from_uri(value: &str) -> Option<Self> {
        let segment = value
            .trim()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        if segment.is_empty() {
            None
        } else {
            Some(Self(segment.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One entry of a record's known-identifier set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalIdentifier {
    pub source_name: String,
    pub value: String,
}

impl AdditionalIdentifier {
    pub fn new(source_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            value: value.into(),
        }
    }

    pub fn handle(value: impl Into<String>) -> Self {
        Self::new(HANDLE_SOURCE_NAME, value)
    }

    pub fn cristin(value: impl Into<String>) -> Self {
        Self::new(CRISTIN_SOURCE_NAME, value)
    }

    pub fn is_from(&self, source_name: &str) -> bool {
        self.source_name.eq_ignore_ascii_case(source_name)
    }
}
