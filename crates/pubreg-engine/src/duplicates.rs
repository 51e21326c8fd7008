//! Duplicate Reporter: persists a report whenever one piece of evidence
//! resolves to more than one existing record.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use pubreg_core::{RecordId, SourceRecord};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, Result};
use crate::matching::EvidenceKind;

pub const DEFAULT_PREFIX: &str = "DUPLICATES_DETECTED";

/// Existing records that all satisfied one strategy's evidence for the same
/// incoming record, in search order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCluster {
    pub candidates: Vec<RecordId>,

    #[serde(with = "cause_label")]
    pub cause: EvidenceKind,

    /// Provenance URI of the incoming record.
    pub provenance: String,
}

mod cause_label {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::matching::EvidenceKind;

    pub fn serialize<S: Serializer>(cause: &EvidenceKind, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(cause.duplicate_label())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EvidenceKind, D::Error> {
        let label = String::deserialize(deserializer)?;
        EvidenceKind::from_duplicate_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown duplicate cause: {label}")))
    }
}

/// Append-only object store for reports.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, path: &str, body: &str) -> Result<()>;
}

/// Blob store backed by a local directory.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    /// Writes below the root only. Empty and relative segments are refused,
    /// so distinct keys never collapse onto one file.
    async fn put(&self, path: &str, body: &str) -> Result<()> {
        let segments: Vec<&str> = path.split('/').collect();
        if segments.iter().any(|s| matches!(*s, "" | "." | "..")) {
            return Err(EngineError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("refusing blob path outside the store root: {path}"),
            )));
        }
        let target = segments
            .into_iter()
            .fold(self.root.clone(), |acc, segment| acc.join(segment));
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, body).await?;
        Ok(())
    }
}

pub struct DuplicateReporter {
    store: Arc<dyn BlobStore>,
    prefix: String,
}

impl DuplicateReporter {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into().trim_matches('/').to_string();
        self
    }

    /// `{prefix}/{owner local part}/{cause label}/{last provenance segment}`
    pub fn report_path(&self, cluster: &DuplicateCluster, incoming: &SourceRecord) -> String {
        format!(
            "{}/{}/{}/{}",
            self.prefix,
            incoming.owner_local_part(),
            cluster.cause.duplicate_label(),
            incoming.provenance_last_segment()
        )
    }

    /// Writes `cluster`. Failures are returned, never swallowed.
    pub async fn report(&self, cluster: &DuplicateCluster, incoming: &SourceRecord) -> Result<()> {
        let path = self.report_path(cluster, incoming);
        warn!(
            record = %incoming.id,
            cause = cluster.cause.duplicate_label(),
            candidates = cluster.candidates.len(),
            %path,
            "duplicate existing records detected"
        );

        let body = serde_json::to_string(cluster).map_err(|e| EngineError::DuplicateReport {
            path: path.clone(),
            source: Box::new(e.into()),
        })?;
        self.store
            .put(&path, &body)
            .await
            .map_err(|e| EngineError::DuplicateReport {
                path,
                source: Box::new(e),
            })
    }
}
