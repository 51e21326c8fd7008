use serde::{Deserialize, Serialize};

/// Page span inside a container (article, chapter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl Range {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: Some(begin.into()),
            end: Some(end.into()),
        }
    }
}

/// Extent of a standalone work (book, thesis, report).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonographPages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,

    #[serde(default)]
    pub illustrated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<Range>,
}

impl MonographPages {
    pub fn new(pages: impl Into<String>) -> Self {
        Self {
            pages: Some(pages.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationDate {
    pub year: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
}

impl PublicationDate {
    pub fn year(year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: None,
            day: None,
        }
    }
}
