//! Instance Merge Engine.
//!
//! [`merge_instance`] reconciles an existing publication instance with an
//! incoming one of the same form. Forms differ: merging across forms keeps
//! the existing instance as is.

pub mod fields;
mod reconcile;

pub use reconcile::Reconcile;

use pubreg_core::PublicationInstance as Instance;
use tracing::debug;

/// Reconciles `existing` with `incoming`, returning a new instance.
///
/// Existing values win wherever both sides carry one; collections are
/// unioned. A handful of forms have no mergeable content and always return
/// `existing`.
pub fn merge_instance(existing: &Instance, incoming: &Instance) -> Instance {
    macro_rules! reconcile {
        ($variant:ident, $fields:expr) => {
            match incoming {
                Instance::$variant(other) => Instance::$variant($fields.reconcile(other)),
                _ => mismatch(existing, incoming),
            }
        };
    }

    match existing {
        Instance::AcademicArticle(fields) => reconcile!(AcademicArticle, fields),
        Instance::AcademicLiteratureReview(fields) => reconcile!(AcademicLiteratureReview, fields),
        Instance::PopularScienceArticle(fields) => reconcile!(PopularScienceArticle, fields),
        Instance::ProfessionalArticle(fields) => reconcile!(ProfessionalArticle, fields),
        Instance::JournalIssue(fields) => reconcile!(JournalIssue, fields),
        Instance::JournalCorrigendum(fields) => reconcile!(JournalCorrigendum, fields),

        Instance::AcademicMonograph(fields) => reconcile!(AcademicMonograph, fields),
        Instance::Textbook(fields) => reconcile!(Textbook, fields),
        Instance::BookAnthology(fields) => reconcile!(BookAnthology, fields),
        Instance::AcademicChapter(fields) => reconcile!(AcademicChapter, fields),

        Instance::DegreeBachelor(fields) => reconcile!(DegreeBachelor, fields),
        Instance::DegreeMaster(fields) => reconcile!(DegreeMaster, fields),
        Instance::DegreeLicentiate(fields) => reconcile!(DegreeLicentiate, fields),
        Instance::DegreePhd(fields) => reconcile!(DegreePhd, fields),

        Instance::ReportResearch(fields) => reconcile!(ReportResearch, fields),
        Instance::ReportWorkingPaper(fields) => reconcile!(ReportWorkingPaper, fields),
        Instance::ConferenceReport(fields) => reconcile!(ConferenceReport, fields),

        Instance::MediaFeatureArticle(fields) => reconcile!(MediaFeatureArticle, fields),

        Instance::MusicPerformance(fields) => reconcile!(MusicPerformance, fields),
        Instance::MovingPicture(fields) => reconcile!(MovingPicture, fields),
        Instance::VisualArts(fields) => reconcile!(VisualArts, fields),

        Instance::DataSet(fields) => reconcile!(DataSet, fields),
        Instance::DataManagementPlan(fields) => reconcile!(DataManagementPlan, fields),

        Instance::Map(fields) => reconcile!(Map, fields),

        // Immutable once registered.
        Instance::ConferenceLecture
        | Instance::ConferencePoster
        | Instance::Lecture
        | Instance::MediaInterview
        | Instance::MediaParticipationInRadioOrTv => existing.clone(),
    }
}

fn mismatch(existing: &Instance, incoming: &Instance) -> Instance {
    debug!(
        existing = existing.type_name(),
        incoming = incoming.type_name(),
        "instance forms differ, keeping existing"
    );
    existing.clone()
}
