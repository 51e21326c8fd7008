use async_trait::async_trait;
use pubreg_core::IncomingRecord;

use super::{EvidenceKind, MatchContext, MatchStrategy, StrategyOutcome};
use crate::error::Result;
use crate::search::params;

/// Looks the source record's persistent identifier up among the existing
/// records' additional identifiers. The identifier is proof on its own, so
/// the oracle is not consulted.
pub struct HandleMatch;

#[async_trait]
impl MatchStrategy for HandleMatch {
    fn evidence(&self) -> EvidenceKind {
        EvidenceKind::StableIdentifier
    }

    async fn evaluate(
        &self,
        ctx: &MatchContext<'_>,
        incoming: &IncomingRecord,
    ) -> Result<StrategyOutcome> {
        let handle = incoming.source.id.trim();
        if handle.is_empty() {
            return Ok(StrategyOutcome::Abstained);
        }

        // The index matches loosely; keep exact hits only.
        let candidates: Vec<_> = ctx
            .resolver
            .find_by_param(params::HANDLE, handle)
            .await?
            .into_iter()
            .filter(|candidate| candidate.publication.has_additional_identifier(handle))
            .collect();

        Ok(StrategyOutcome::from_candidates(
            self.evidence(),
            candidates,
            incoming,
        ))
    }
}
