//! Matching Chain: finds the existing registry record an incoming record
//! should update.
//!
//! Five strategies run in a fixed priority order; the first one that yields a
//! candidate wins and no later strategy is consulted. A strategy that finds
//! several equally good candidates takes the first in search order and hands
//! the full list back as a [`DuplicateCluster`], which the chain runner
//! persists before returning.

pub mod cristin;
pub mod doi;
pub mod handle;
pub mod isbn;
pub mod title;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use async_trait::async_trait;
use pubreg_core::{ExistingRecord, IncomingRecord, PublicationInstance};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::duplicates::{DuplicateCluster, DuplicateReporter};
use crate::error::{EngineError, Result};
use crate::merge::merge_instance;
use crate::oracle::EquivalenceOracle;
use crate::search::SearchResolver;

pub use cristin::CristinIdentifierMatch;
pub use doi::DoiMatch;
pub use handle::HandleMatch;
pub use isbn::IsbnMatch;
pub use title::TitleAndTypeMatch;

/// The kind of proof a strategy used to tie an incoming record to an
/// existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvidenceKind {
    StableIdentifier,
    SourceIdentifier,
    Doi,
    Isbn,
    SearchMatch,
}

impl EvidenceKind {
    pub const ALL: [EvidenceKind; 5] = [
        Self::StableIdentifier,
        Self::SourceIdentifier,
        Self::Doi,
        Self::Isbn,
        Self::SearchMatch,
    ];

    /// Label used for duplicate reports.
    pub fn duplicate_label(&self) -> &'static str {
        match self {
            Self::StableIdentifier => "Handle-duplicates",
            Self::SourceIdentifier => "Cristin-duplicates",
            Self::Doi => "DOI-duplicates",
            Self::Isbn => "ISBN-duplicates",
            Self::SearchMatch => "Title-duplicates",
        }
    }

    pub fn from_duplicate_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.duplicate_label() == label)
    }
}

impl std::fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::StableIdentifier => "stable-identifier",
            Self::SourceIdentifier => "source-identifier",
            Self::Doi => "doi",
            Self::Isbn => "isbn",
            Self::SearchMatch => "search-match",
        };
        f.write_str(s)
    }
}

/// The existing record an incoming record should update, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTarget {
    pub evidence: EvidenceKind,
    pub existing: ExistingRecord,
}

impl UpdateTarget {
    /// Reconciles the target's instance with `incoming`. When the existing
    /// record carries no instance there is nothing to preserve and the
    /// incoming instance is returned as is.
    pub fn merged_instance(&self, incoming: &PublicationInstance) -> PublicationInstance {
        match self.existing.publication.publication_instance() {
            Some(existing) => merge_instance(existing, incoming),
            None => incoming.clone(),
        }
    }
}

/// A strategy's decision, together with the duplicate cluster it found.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub target: UpdateTarget,
    pub duplicates: Option<DuplicateCluster>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StrategyOutcome {
    /// The incoming record carries no evidence of this kind.
    Abstained,
    NoMatch,
    Matched(Resolution),
}

impl StrategyOutcome {
    /// First candidate wins; two or more candidates also form a cluster.
    pub fn from_candidates(
        evidence: EvidenceKind,
        mut candidates: Vec<ExistingRecord>,
        incoming: &IncomingRecord,
    ) -> Self {
        if candidates.is_empty() {
            return Self::NoMatch;
        }

        let duplicates = (candidates.len() > 1).then(|| DuplicateCluster {
            candidates: candidates.iter().map(|c| c.identifier.clone()).collect(),
            cause: evidence,
            provenance: incoming.source.provenance.clone(),
        });
        let existing = candidates.swap_remove(0);

        Self::Matched(Resolution {
            target: UpdateTarget { evidence, existing },
            duplicates,
        })
    }
}

/// Collaborators shared by all strategies during one resolution.
pub struct MatchContext<'a> {
    pub resolver: &'a SearchResolver,
    pub oracle: &'a dyn EquivalenceOracle,
}

impl MatchContext<'_> {
    /// Keeps the candidates the oracle accepts, in their original order.
    pub fn equivalent(
        &self,
        candidates: Vec<ExistingRecord>,
        incoming: &IncomingRecord,
    ) -> Vec<ExistingRecord> {
        candidates
            .into_iter()
            .filter(|candidate| self.oracle.matches(&candidate.publication, &incoming.mapped))
            .collect()
    }
}

#[async_trait]
pub trait MatchStrategy: Send + Sync {
    fn evidence(&self) -> EvidenceKind;

    async fn evaluate(
        &self,
        ctx: &MatchContext<'_>,
        incoming: &IncomingRecord,
    ) -> Result<StrategyOutcome>;
}

/// Ordered list of strategies with first-match-wins semantics.
pub struct MatchingChain {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl Default for MatchingChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(HandleMatch),
            Box::new(CristinIdentifierMatch),
            Box::new(DoiMatch),
            Box::new(IsbnMatch),
            Box::new(TitleAndTypeMatch),
        ])
    }
}

impl MatchingChain {
    pub fn new(strategies: Vec<Box<dyn MatchStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn evidence_order(&self) -> Vec<EvidenceKind> {
        self.strategies.iter().map(|s| s.evidence()).collect()
    }

    /// Runs strategies in order until one matches. Infrastructure failures
    /// stop the chain and carry the failing strategy's evidence kind.
    pub async fn run(
        &self,
        ctx: &MatchContext<'_>,
        incoming: &IncomingRecord,
    ) -> Result<Option<Resolution>> {
        for strategy in &self.strategies {
            let evidence = strategy.evidence();
            let outcome = strategy
                .evaluate(ctx, incoming)
                .await
                .map_err(|e| EngineError::Strategy {
                    evidence,
                    record: incoming.source.id.clone(),
                    source: Box::new(e),
                })?;

            match outcome {
                StrategyOutcome::Abstained => {
                    debug!(record = %incoming.source.id, %evidence, "no evidence, skipping strategy");
                }
                StrategyOutcome::NoMatch => {
                    debug!(record = %incoming.source.id, %evidence, "no existing record matched");
                }
                StrategyOutcome::Matched(resolution) => return Ok(Some(resolution)),
            }
        }
        Ok(None)
    }
}

/// Entry point: resolves incoming records against the registry.
pub struct PublicationMatcher {
    resolver: SearchResolver,
    oracle: Arc<dyn EquivalenceOracle>,
    reporter: DuplicateReporter,
    chain: MatchingChain,
}

impl PublicationMatcher {
    pub fn new(
        resolver: SearchResolver,
        oracle: Arc<dyn EquivalenceOracle>,
        reporter: DuplicateReporter,
    ) -> Self {
        Self {
            resolver,
            oracle,
            reporter,
            chain: MatchingChain::default(),
        }
    }

    pub fn with_chain(mut self, chain: MatchingChain) -> Self {
        self.chain = chain;
        self
    }

    /// Finds the existing publication `incoming` corresponds to, if any.
    ///
    /// When the winning strategy saw more than one candidate, the duplicate
    /// cluster is written before returning; a failed write fails the whole
    /// resolution.
    pub async fn resolve_existing_publication(
        &self,
        incoming: &IncomingRecord,
    ) -> Result<Option<UpdateTarget>> {
        let ctx = MatchContext {
            resolver: &self.resolver,
            oracle: self.oracle.as_ref(),
        };

        let Some(resolution) = self.chain.run(&ctx, incoming).await? else {
            info!(record = %incoming.source.id, "no existing publication found");
            return Ok(None);
        };

        if let Some(cluster) = &resolution.duplicates {
            self.reporter.report(cluster, &incoming.source).await?;
        }

        info!(
            record = %incoming.source.id,
            evidence = %resolution.target.evidence,
            existing = %resolution.target.existing.identifier,
            "existing publication found"
        );
        Ok(Some(resolution.target))
    }
}
