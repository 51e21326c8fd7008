use async_trait::async_trait;
use pubreg_core::{IncomingRecord, Publication, PublicationContext};

use super::{EvidenceKind, MatchContext, MatchStrategy, StrategyOutcome};
use crate::error::Result;
use crate::search::{SearchQuery, params};

/// Free-text title search narrowed by a context-type hint. Used only when
/// the mapped record has both a main title and an instance type.
pub struct TitleAndTypeMatch;

/// `contextType` hint for the title search.
///
/// Conference reports are indexed under their event. Journal and
/// unconfirmed journal swap, so that records whose journal was confirmed (or
/// lost confirmation) since the last import are still found.
pub fn context_type_hint(publication: &Publication) -> Option<&'static str> {
    if publication
        .publication_instance()
        .is_some_and(|instance| instance.is_conference_report())
    {
        return Some("Event");
    }
    publication.publication_context().map(|context| match context {
        PublicationContext::Journal(_) => "UnconfirmedJournal",
        PublicationContext::UnconfirmedJournal(_) => "Journal",
        other => other.type_name(),
    })
}

#[async_trait]
impl MatchStrategy for TitleAndTypeMatch {
    fn evidence(&self) -> EvidenceKind {
        EvidenceKind::SearchMatch
    }

    async fn evaluate(
        &self,
        ctx: &MatchContext<'_>,
        incoming: &IncomingRecord,
    ) -> Result<StrategyOutcome> {
        let mapped = &incoming.mapped;
        let (Some(title), Some(_)) = (mapped.main_title(), mapped.instance_type()) else {
            return Ok(StrategyOutcome::Abstained);
        };

        let mut query = SearchQuery::new().param(params::TITLE_SHOULD, title);
        if let Some(hint) = context_type_hint(mapped) {
            query = query.param(params::CONTEXT_TYPE, hint);
        }

        let candidates = ctx.resolver.find(&query).await?;
        Ok(StrategyOutcome::from_candidates(
            self.evidence(),
            ctx.equivalent(candidates, incoming),
            incoming,
        ))
    }
}
