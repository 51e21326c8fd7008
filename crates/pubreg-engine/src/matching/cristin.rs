use async_trait::async_trait;
use pubreg_core::{CRISTIN_SOURCE_NAME, IncomingRecord};

use super::{EvidenceKind, MatchContext, MatchStrategy, StrategyOutcome};
use crate::error::Result;
use crate::search::params;

/// Matches on the research-information registry's own identifier, which the
/// source record carries when the work was also reported there.
pub struct CristinIdentifierMatch;

#[async_trait]
impl MatchStrategy for CristinIdentifierMatch {
    fn evidence(&self) -> EvidenceKind {
        EvidenceKind::SourceIdentifier
    }

    async fn evaluate(
        &self,
        ctx: &MatchContext<'_>,
        incoming: &IncomingRecord,
    ) -> Result<StrategyOutcome> {
        let Some(identifier) = incoming
            .source
            .source_identifier
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        else {
            return Ok(StrategyOutcome::Abstained);
        };

        let candidates: Vec<_> = ctx
            .resolver
            .find_by_param(params::CRISTIN_IDENTIFIER, identifier)
            .await?
            .into_iter()
            .filter(|candidate| {
                candidate
                    .publication
                    .has_additional_identifier_from(CRISTIN_SOURCE_NAME, identifier)
            })
            .collect();

        Ok(StrategyOutcome::from_candidates(
            self.evidence(),
            ctx.equivalent(candidates, incoming),
            incoming,
        ))
    }
}
