use serde::{Deserialize, Serialize};

use super::pages::PublicationDate;

/// Running time of an artistic performance.
///
/// `Undefined` is the placeholder sources emit when they know a duration
/// field exists but carry no usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PerformanceDuration {
    Defined { minutes: u32 },
    Undefined,
}

impl PerformanceDuration {
    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Defined { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MusicManifestation {
    #[serde(rename_all = "camelCase")]
    Concert {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        place: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<PublicationDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        extent: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    AudioVisualPublication {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        medium: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        publisher: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        catalogue_number: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    MusicScore {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ensemble: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        movements: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ismn: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    OtherPerformance {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        performance_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        place: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        extent: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicPerformance {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manifestations: Vec<MusicManifestation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<PerformanceDuration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<PublicationDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
}

/// Film, series and other moving-picture works.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingPicture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<Venue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<PerformanceDuration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualArts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub venues: Vec<Venue>,
}
