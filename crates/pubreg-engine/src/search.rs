//! Search Resolver: turns a search parameter into full existing records.
//!
//! The remote index only returns compact hits; each hit is re-fetched from
//! the registry so that strategies and the equivalence oracle see complete
//! records.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pubreg_core::config::{RegistryConfig, SearchIndexConfig};
use pubreg_core::{ExistingRecord, Publication, RecordId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::http::RateLimitedClient;

/// Parameter names understood by the search index.
pub mod params {
    pub const HANDLE: &str = "handle";
    pub const CRISTIN_IDENTIFIER: &str = "cristinIdentifier";
    pub const DOI: &str = "doi";
    pub const ISBN: &str = "isbn";
    pub const TITLE_SHOULD: &str = "titleShould";
    pub const CONTEXT_TYPE: &str = "contextType";
    pub const AGGREGATION: &str = "aggregation";
}

/// A query against the search index. Aggregations are always disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    params: Vec<(String, String)>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.push((name.to_string(), value.into()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Query string including the `aggregation=none` hint.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .chain(std::iter::once((params::AGGREGATION, "none")))
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub total_hits: u64,

    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// Remote bibliographic search index.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse>;
}

/// Registry storage, read side.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// `Ok(None)` when the identifier does not resolve.
    async fn get_by_identifier(&self, id: &RecordId) -> Result<Option<Publication>>;
}

// ─── HTTP collaborators ───────────────────────────────────────────────────────

pub struct HttpSearchIndex {
    client: RateLimitedClient,
    base_url: String,
}

impl HttpSearchIndex {
    pub fn new(config: &SearchIndexConfig) -> Result<Self> {
        let client = RateLimitedClient::new(
            Duration::from_millis(config.min_interval_ms),
            config.max_retries,
            &config.user_agent,
        )?;
        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: RateLimitedClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SearchIndex for HttpSearchIndex {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let url = format!("{}/search/resources?{}", self.base_url, query);
        self.client.get_json(&url).await
    }
}

pub struct HttpRecordStore {
    client: RateLimitedClient,
    base_url: String,
}

impl HttpRecordStore {
    pub fn new(config: &RegistryConfig, search: &SearchIndexConfig) -> Result<Self> {
        let client = RateLimitedClient::new(
            Duration::from_millis(search.min_interval_ms),
            search.max_retries,
            &search.user_agent,
        )?;
        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: RateLimitedClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn get_by_identifier(&self, id: &RecordId) -> Result<Option<Publication>> {
        let url = format!(
            "{}/publication/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        );
        self.client.get_optional_json(&url).await
    }
}

// ─── SearchResolver ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SearchResolver {
    index: Arc<dyn SearchIndex>,
    store: Arc<dyn RecordStore>,
}

impl SearchResolver {
    pub fn new(index: Arc<dyn SearchIndex>, store: Arc<dyn RecordStore>) -> Self {
        Self { index, store }
    }

    pub async fn find_by_param(&self, name: &str, value: &str) -> Result<Vec<ExistingRecord>> {
        self.find(&SearchQuery::new().param(name, value)).await
    }

    /// Runs `query` and fetches every hit in index order. Hits whose record
    /// no longer resolves are skipped.
    pub async fn find(&self, query: &SearchQuery) -> Result<Vec<ExistingRecord>> {
        let response = self.index.search(query).await?;
        debug!(%query, total_hits = response.total_hits, "search index response");

        let mut records = Vec::with_capacity(response.hits.len());
        for hit in response.hits {
            let Some(id) = RecordId::from_uri(&hit.identifier) else {
                warn!(identifier = %hit.identifier, "search hit without usable identifier");
                continue;
            };
            match self.store.get_by_identifier(&id).await? {
                Some(publication) => records.push(ExistingRecord::new(id, publication)),
                None => warn!(%id, "search hit no longer resolves in the registry, skipping"),
            }
        }
        Ok(records)
    }
}
