//! pubreg engine: identity resolution and instance merging for incoming
//! publication records.

pub mod duplicates;
pub mod error;
pub mod http;
pub mod identifiers;
pub mod matching;
pub mod merge;
pub mod oracle;
pub mod search;

#[cfg(test)]
mod testing;

pub use duplicates::{BlobStore, DuplicateCluster, DuplicateReporter, FsBlobStore};
pub use error::{EngineError, Result};
pub use matching::{EvidenceKind, MatchingChain, PublicationMatcher, UpdateTarget};
pub use merge::merge_instance;
pub use oracle::{EquivalenceOracle, MetadataEquivalence};
pub use search::{HttpRecordStore, HttpSearchIndex, RecordStore, SearchIndex, SearchResolver};
