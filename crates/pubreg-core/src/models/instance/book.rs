use serde::{Deserialize, Serialize};

use super::pages::{MonographPages, PublicationDate, Range};

/// Book, report and other monograph-like forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonographFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<MonographPages>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Range>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<MonographPages>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_date: Option<PublicationDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreePhd {
    #[serde(flatten)]
    pub degree: DegreeFields,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<RelatedDocument>,
}

/// A document that belongs to a doctoral thesis (the papers of an article
/// based thesis, for instance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RelatedDocument {
    #[serde(rename_all = "camelCase")]
    ConfirmedDocument {
        identifier: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sequence: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    UnconfirmedDocument {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sequence: Option<u32>,
    },
}

impl RelatedDocument {
    pub fn confirmed(identifier: impl Into<String>) -> Self {
        Self::ConfirmedDocument {
            identifier: identifier.into(),
            sequence: None,
        }
    }

    pub fn unconfirmed(text: impl Into<String>) -> Self {
        Self::UnconfirmedDocument {
            text: text.into(),
            sequence: None,
        }
    }
}
