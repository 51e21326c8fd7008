use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

use super::context::PublicationContext;
use super::identifiers::{AdditionalIdentifier, RecordId};
use super::instance::{PublicationDate, PublicationInstance};

/// A record as delivered by the source system, before mapping.
///
/// Only `id`, `source_identifier`, `owner` and `provenance` take part in
/// matching and reporting. The descriptive fields are kept as delivered;
/// DOI, ISBN, title and type evidence is always read from the mapped
/// [`Publication`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    /// Persistent external identifier, e.g. a repository handle URI.
    pub id: String,

    /// The research-information registry's own identifier for the work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_identifier: Option<String>,

    /// Owning organisation, `localpart@institution-id`.
    pub owner: String,

    /// URI of the document the record was read from.
    pub provenance: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub isbns: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl SourceRecord {
    /// Organisation short name: the part of `owner` before `@`.
    pub fn owner_local_part(&self) -> &str {
        self.owner
            .split_once('@')
            .map_or(self.owner.as_str(), |(local, _)| local)
    }

    /// Last path segment of the provenance URI.
    pub fn provenance_last_segment(&self) -> &str {
        self.provenance
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

/// A registry-form publication.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<RecordId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_identifiers: Vec<AdditionalIdentifier>,

    #[serde(default)]
    pub entity_description: EntityDescription,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<PublicationDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_context: Option<PublicationContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_instance: Option<PublicationInstance>,
}

impl Publication {
    pub fn main_title(&self) -> Option<&str> {
        self.entity_description
            .main_title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }

    pub fn doi(&self) -> Option<&str> {
        self.reference()
            .and_then(|reference| reference.doi.as_deref())
            .map(str::trim)
            .filter(|doi| !doi.is_empty())
    }

    pub fn reference(&self) -> Option<&Reference> {
        self.entity_description.reference.as_ref()
    }

    pub fn publication_context(&self) -> Option<&PublicationContext> {
        self.reference()
            .and_then(|reference| reference.publication_context.as_ref())
    }

    pub fn publication_instance(&self) -> Option<&PublicationInstance> {
        self.reference()
            .and_then(|reference| reference.publication_instance.as_ref())
    }

    pub fn instance_type(&self) -> Option<&'static str> {
        self.publication_instance().map(PublicationInstance::type_name)
    }

    pub fn publication_year(&self) -> Option<&str> {
        self.entity_description
            .publication_date
            .as_ref()
            .map(|date| date.year.trim())
            .filter(|year| !year.is_empty())
    }

    /// ISBNs of a book-like context; empty for every other context.
    pub fn isbn_list(&self) -> &[String] {
        self.publication_context()
            .map(PublicationContext::isbn_list)
            .unwrap_or_default()
    }

    pub fn has_additional_identifier(&self, value: &str) -> bool {
        self.additional_identifiers
            .iter()
            .any(|identifier| identifier.value == value)
    }

    pub fn has_additional_identifier_from(&self, source_name: &str, value: &str) -> bool {
        self.additional_identifiers
            .iter()
            .any(|identifier| identifier.is_from(source_name) && identifier.value == value)
    }
}

/// A candidate arriving from a source system together with its registry-form
/// mapping. Produced by an upstream mapper; never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingRecord {
    pub source: SourceRecord,
    pub mapped: Publication,
}

impl IncomingRecord {
    pub fn new(source: SourceRecord, mapped: Publication) -> Self {
        Self { source, mapped }
    }

    /// Parse and validate an incoming record from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: Self = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.id.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "incoming record has an empty source id".to_string(),
            ));
        }
        // Both parts become directory names in duplicate report paths.
        let owner = self.source.owner_local_part().trim();
        if owner.is_empty() || owner.contains('/') || owner.contains("..") {
            return Err(CoreError::ValidationError(format!(
                "incoming record {} has an unusable owner {:?}",
                self.source.id, self.source.owner
            )));
        }
        let provenance = self.source.provenance_last_segment();
        if matches!(provenance.trim(), "" | "." | "..") {
            return Err(CoreError::ValidationError(format!(
                "incoming record {} has an unusable provenance {:?}",
                self.source.id, self.source.provenance
            )));
        }
        Ok(())
    }
}

/// A publication already stored in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingRecord {
    pub identifier: RecordId,
    pub publication: Publication,
}

impl ExistingRecord {
    pub fn new(identifier: RecordId, publication: Publication) -> Self {
        Self {
            identifier,
            publication,
        }
    }
}
