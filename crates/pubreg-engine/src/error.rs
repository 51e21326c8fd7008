use thiserror::Error;

use crate::matching::EvidenceKind;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid DOI: {0}")]
    InvalidDoi(String),

    #[error("invalid ISBN: {0}")]
    InvalidIsbn(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error from {0}: {1}")]
    ApiError(String, String),

    #[error("rate limit from {0}, retry after {1}s")]
    RateLimit(String, u64),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("blob store error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{evidence} match failed for {record}: {source}")]
    Strategy {
        evidence: EvidenceKind,
        record: String,
        #[source]
        source: Box<EngineError>,
    },

    #[error("could not write duplicate report to {path}: {source}")]
    DuplicateReport {
        path: String,
        #[source]
        source: Box<EngineError>,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
