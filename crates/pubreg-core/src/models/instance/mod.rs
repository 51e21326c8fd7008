//! Publication instances: the form-specific part of a publication.
//!
//! The set of forms is closed. Every form is one variant of
//! [`PublicationInstance`]; forms sharing a field layout share a payload
//! struct.

pub mod artistic;
pub mod book;
pub mod journal;
pub mod pages;
pub mod research_data;

pub use artistic::*;
pub use book::*;
pub use journal::*;
pub use pages::*;
pub use research_data::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PublicationInstance {
    // Journal
    AcademicArticle(ArticleFields),
    AcademicLiteratureReview(ArticleFields),
    PopularScienceArticle(ArticleFields),
    ProfessionalArticle(ArticleFields),
    JournalIssue(JournalIssue),
    JournalCorrigendum(JournalCorrigendum),

    // Book
    AcademicMonograph(MonographFields),
    Textbook(MonographFields),
    BookAnthology(MonographFields),
    AcademicChapter(ChapterFields),

    // Degree
    DegreeBachelor(DegreeFields),
    DegreeMaster(DegreeFields),
    DegreeLicentiate(DegreeFields),
    DegreePhd(DegreePhd),

    // Report
    ReportResearch(MonographFields),
    ReportWorkingPaper(MonographFields),
    ConferenceReport(MonographFields),

    // Event
    ConferenceLecture,
    ConferencePoster,
    Lecture,

    // Media contribution
    MediaFeatureArticle(ArticleFields),
    MediaInterview,
    MediaParticipationInRadioOrTv,

    // Artistic
    MusicPerformance(MusicPerformance),
    MovingPicture(MovingPicture),
    VisualArts(VisualArts),

    // Research data
    DataSet(DataSet),
    DataManagementPlan(DataManagementPlan),

    // Geographical content
    Map(Map),
}

impl PublicationInstance {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::AcademicArticle(_) => "AcademicArticle",
            Self::AcademicLiteratureReview(_) => "AcademicLiteratureReview",
            Self::PopularScienceArticle(_) => "PopularScienceArticle",
            Self::ProfessionalArticle(_) => "ProfessionalArticle",
            Self::JournalIssue(_) => "JournalIssue",
            Self::JournalCorrigendum(_) => "JournalCorrigendum",
            Self::AcademicMonograph(_) => "AcademicMonograph",
            Self::Textbook(_) => "Textbook",
            Self::BookAnthology(_) => "BookAnthology",
            Self::AcademicChapter(_) => "AcademicChapter",
            Self::DegreeBachelor(_) => "DegreeBachelor",
            Self::DegreeMaster(_) => "DegreeMaster",
            Self::DegreeLicentiate(_) => "DegreeLicentiate",
            Self::DegreePhd(_) => "DegreePhd",
            Self::ReportResearch(_) => "ReportResearch",
            Self::ReportWorkingPaper(_) => "ReportWorkingPaper",
            Self::ConferenceReport(_) => "ConferenceReport",
            Self::ConferenceLecture => "ConferenceLecture",
            Self::ConferencePoster => "ConferencePoster",
            Self::Lecture => "Lecture",
            Self::MediaFeatureArticle(_) => "MediaFeatureArticle",
            Self::MediaInterview => "MediaInterview",
            Self::MediaParticipationInRadioOrTv => "MediaParticipationInRadioOrTv",
            Self::MusicPerformance(_) => "MusicPerformance",
            Self::MovingPicture(_) => "MovingPicture",
            Self::VisualArts(_) => "VisualArts",
            Self::DataSet(_) => "DataSet",
            Self::DataManagementPlan(_) => "DataManagementPlan",
            Self::Map(_) => "Map",
        }
    }

    pub fn is_conference_report(&self) -> bool {
        matches!(self, Self::ConferenceReport(_))
    }
}

impl std::fmt::Display for PublicationInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}
