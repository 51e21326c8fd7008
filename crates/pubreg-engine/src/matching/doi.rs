use async_trait::async_trait;
use pubreg_core::IncomingRecord;
use tracing::debug;

use super::{EvidenceKind, MatchContext, MatchStrategy, StrategyOutcome};
use crate::error::Result;
use crate::identifiers::Doi;
use crate::search::params;

pub struct DoiMatch;

#[async_trait]
impl MatchStrategy for DoiMatch {
    fn evidence(&self) -> EvidenceKind {
        EvidenceKind::Doi
    }

    async fn evaluate(
        &self,
        ctx: &MatchContext<'_>,
        incoming: &IncomingRecord,
    ) -> Result<StrategyOutcome> {
        let Some(doi) = incoming.mapped.doi() else {
            return Ok(StrategyOutcome::Abstained);
        };
        let value = Doi::search_value(doi);
        debug!(record = %incoming.source.id, doi = %value, "searching by DOI");

        let candidates = ctx.resolver.find_by_param(params::DOI, &value).await?;
        Ok(StrategyOutcome::from_candidates(
            self.evidence(),
            ctx.equivalent(candidates, incoming),
            incoming,
        ))
    }
}
