use std::collections::HashSet;

use async_trait::async_trait;
use pubreg_core::IncomingRecord;

use super::{EvidenceKind, MatchContext, MatchStrategy, StrategyOutcome};
use crate::error::Result;
use crate::identifiers::Isbn;
use crate::search::params;

/// Searches once per ISBN of a book-like context and unions the results.
pub struct IsbnMatch;

impl IsbnMatch {
    /// Normalised, de-duplicated search values in their original order.
    fn search_values(incoming: &IncomingRecord) -> Vec<String> {
        let mut seen = HashSet::new();
        incoming
            .mapped
            .isbn_list()
            .iter()
            .filter_map(|isbn| Isbn::search_value(isbn))
            .filter(|value| seen.insert(value.clone()))
            .collect()
    }
}

#[async_trait]
impl MatchStrategy for IsbnMatch {
    fn evidence(&self) -> EvidenceKind {
        EvidenceKind::Isbn
    }

    async fn evaluate(
        &self,
        ctx: &MatchContext<'_>,
        incoming: &IncomingRecord,
    ) -> Result<StrategyOutcome> {
        let values = Self::search_values(incoming);
        if values.is_empty() {
            return Ok(StrategyOutcome::Abstained);
        }

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for value in &values {
            for record in ctx.resolver.find_by_param(params::ISBN, value).await? {
                if seen.insert(record.identifier.clone()) {
                    candidates.push(record);
                }
            }
        }

        Ok(StrategyOutcome::from_candidates(
            self.evidence(),
            ctx.equivalent(candidates, incoming),
            incoming,
        ))
    }
}
