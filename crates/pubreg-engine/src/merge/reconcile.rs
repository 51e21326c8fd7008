//! Per-form reconcilers. Each combines two payloads of the same form into a
//! new one; neither input is modified.

use pubreg_core::{
    ArticleFields, ChapterFields, DataManagementPlan, DataSet, DegreeFields, DegreePhd,
    JournalCorrigendum, JournalIssue, Map, MonographFields, MovingPicture, MusicPerformance,
    VisualArts,
};

use super::fields::{coverage, duration, pick, union};

pub trait Reconcile {
    fn reconcile(&self, incoming: &Self) -> Self;
}

impl Reconcile for ArticleFields {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            pages: pick(&self.pages, &incoming.pages),
            volume: pick(&self.volume, &incoming.volume),
            issue: pick(&self.issue, &incoming.issue),
            article_number: pick(&self.article_number, &incoming.article_number),
        }
    }
}

impl Reconcile for JournalIssue {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            pages: pick(&self.pages, &incoming.pages),
            volume: pick(&self.volume, &incoming.volume),
            issue: pick(&self.issue, &incoming.issue),
            article_number: pick(&self.article_number, &incoming.article_number),
        }
    }
}

impl Reconcile for JournalCorrigendum {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            article: self.article.reconcile(&incoming.article),
            corrigendum_for: pick(&self.corrigendum_for, &incoming.corrigendum_for),
        }
    }
}

impl Reconcile for MonographFields {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            pages: pick(&self.pages, &incoming.pages),
        }
    }
}

impl Reconcile for ChapterFields {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            pages: pick(&self.pages, &incoming.pages),
        }
    }
}

impl Reconcile for DegreeFields {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            pages: pick(&self.pages, &incoming.pages),
            submitted_date: pick(&self.submitted_date, &incoming.submitted_date),
        }
    }
}

impl Reconcile for DegreePhd {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            degree: self.degree.reconcile(&incoming.degree),
            related: union(&self.related, &incoming.related),
        }
    }
}

impl Reconcile for MusicPerformance {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            manifestations: union(&self.manifestations, &incoming.manifestations),
            duration: duration(self.duration, incoming.duration),
        }
    }
}

impl Reconcile for MovingPicture {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            subtype: pick(&self.subtype, &incoming.subtype),
            description: pick(&self.description, &incoming.description),
            outputs: union(&self.outputs, &incoming.outputs),
            duration: duration(self.duration, incoming.duration),
        }
    }
}

impl Reconcile for VisualArts {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            subtype: pick(&self.subtype, &incoming.subtype),
            description: pick(&self.description, &incoming.description),
            venues: union(&self.venues, &incoming.venues),
        }
    }
}

impl Reconcile for DataSet {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            // Never taken from the source.
            user_agreement: self.user_agreement,
            geographical_coverage: coverage(
                &self.geographical_coverage,
                &incoming.geographical_coverage,
            ),
            referenced_by: union(&self.referenced_by, &incoming.referenced_by),
            related: union(&self.related, &incoming.related),
            complies_with: union(&self.complies_with, &incoming.complies_with),
        }
    }
}

impl Reconcile for DataManagementPlan {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            related: union(&self.related, &incoming.related),
            pages: pick(&self.pages, &incoming.pages),
        }
    }
}

impl Reconcile for Map {
    fn reconcile(&self, incoming: &Self) -> Self {
        Self {
            description: pick(&self.description, &incoming.description),
            pages: pick(&self.pages, &incoming.pages),
        }
    }
}
