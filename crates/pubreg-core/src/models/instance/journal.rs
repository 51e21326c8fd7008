use serde::{Deserialize, Serialize};

use super::pages::{MonographPages, Range};

/// Fields shared by every article published in a journal-like channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Range>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalIssue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<MonographPages>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalCorrigendum {
    #[serde(flatten)]
    pub article: ArticleFields,

    /// URI of the publication being corrected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrigendum_for: Option<String>,
}
