//! In-memory collaborators for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use pubreg_core::{
    EntityDescription, ExistingRecord, IncomingRecord, Publication, PublicationContext, RecordId,
    Reference, SourceRecord,
};

use crate::duplicates::BlobStore;
use crate::error::{EngineError, Result};
use crate::oracle::EquivalenceOracle;
use crate::search::{RecordStore, SearchHit, SearchIndex, SearchQuery, SearchResponse};

type Params = Vec<(String, String)>;

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[derive(Default)]
pub struct InMemoryIndex {
    hits: HashMap<Params, Vec<String>>,
    queries: Mutex<Vec<Params>>,
    failing: bool,
}

impl InMemoryIndex {
    pub fn with_hits(mut self, query: &[(&str, &str)], identifiers: &[&str]) -> Self {
        self.hits.insert(
            params(query),
            identifiers.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Parameter lists of every query received, in order.
    pub fn queries(&self) -> Vec<Params> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchIndex for InMemoryIndex {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.queries.lock().unwrap().push(query.params().to_vec());
        if self.failing {
            return Err(EngineError::ApiError(
                "memory://search".to_string(),
                "HTTP 503: unavailable".to_string(),
            ));
        }
        let hits: Vec<SearchHit> = self
            .hits
            .get(query.params())
            .into_iter()
            .flatten()
            .map(|identifier| SearchHit {
                identifier: identifier.clone(),
            })
            .collect();
        Ok(SearchResponse {
            total_hits: hits.len() as u64,
            hits,
        })
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    records: HashMap<RecordId, Publication>,
    failing: bool,
}

impl InMemoryStore {
    pub fn with(mut self, record: ExistingRecord) -> Self {
        self.records.insert(record.identifier, record.publication);
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get_by_identifier(&self, id: &RecordId) -> Result<Option<Publication>> {
        if self.failing {
            return Err(EngineError::ApiError(
                format!("memory://publication/{id}"),
                "HTTP 500: boom".to_string(),
            ));
        }
        Ok(self.records.get(id).cloned())
    }
}

#[derive(Default)]
pub struct RecordingBlobStore {
    writes: Mutex<Vec<(String, String)>>,
    failing: bool,
}

impl RecordingBlobStore {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    async fn put(&self, path: &str, body: &str) -> Result<()> {
        if self.failing {
            return Err(EngineError::Io(std::io::Error::other("bucket unavailable")));
        }
        self.writes
            .lock()
            .unwrap()
            .push((path.to_string(), body.to_string()));
        Ok(())
    }
}

/// Accepts every candidate.
pub struct AlwaysMatch;

impl EquivalenceOracle for AlwaysMatch {
    fn matches(&self, _existing: &Publication, _incoming: &Publication) -> bool {
        true
    }
}

/// Accepts candidates whose registry identifier is listed.
pub struct AcceptOnly(pub Vec<&'static str>);

impl EquivalenceOracle for AcceptOnly {
    fn matches(&self, existing: &Publication, _incoming: &Publication) -> bool {
        existing
            .identifier
            .as_ref()
            .is_some_and(|id| self.0.iter().any(|accepted| *accepted == id.as_str()))
    }
}

pub fn publication_titled(id: &str, title: &str) -> ExistingRecord {
    ExistingRecord::new(
        RecordId::from(id),
        Publication {
            identifier: Some(RecordId::from(id)),
            entity_description: EntityDescription {
                main_title: Some(title.to_string()),
                ..Default::default()
            },
            ..Default::default()
        },
    )
}

pub fn source_record(owner: &str, provenance: &str) -> SourceRecord {
    SourceRecord {
        id: "https://hdl.handle.net/11250/2838".to_string(),
        source_identifier: None,
        owner: owner.to_string(),
        provenance: provenance.to_string(),
        doi: None,
        isbns: Vec::new(),
        title: None,
        resource_type: None,
    }
}

/// Incoming record without DOI, ISBN, title or instance type.
pub fn bare_incoming() -> IncomingRecord {
    IncomingRecord::new(
        source_record("ntnu@194.0.0.0", "s3://brage/ntnu/2024-02-01/2838.json"),
        Publication::default(),
    )
}

pub fn incoming_with_context(context: PublicationContext) -> IncomingRecord {
    let mut incoming = bare_incoming();
    incoming.mapped.entity_description.reference = Some(Reference {
        publication_context: Some(context),
        ..Default::default()
    });
    incoming
}
