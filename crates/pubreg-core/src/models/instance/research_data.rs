use serde::{Deserialize, Serialize};

use super::pages::MonographPages;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographicalDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GeographicalDescription {
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSet {
    /// Whether the depositor agreed to the registry's terms of use.
    #[serde(default)]
    pub user_agreement: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographical_coverage: Option<GeographicalDescription>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub referenced_by: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub complies_with: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataManagementPlan {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<MonographPages>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Map {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<MonographPages>,
}
