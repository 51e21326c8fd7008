use serde::{Deserialize, Serialize};

/// Where a publication appeared: the channel or container it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PublicationContext {
    Book(BookContext),
    Report(BookContext),
    Degree(BookContext),
    Anthology(AnthologyContext),
    Journal(JournalContext),
    UnconfirmedJournal(UnconfirmedJournalContext),
    Event(EventContext),
    Artistic,
    MediaContribution,
    ResearchData,
    GeographicalContent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookContext {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub isbn_list: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnthologyContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnconfirmedJournalContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_issn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_issn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

impl PublicationContext {
    /// Type name as used by the search index's `contextType` parameter.
    pub fn type_name(&self) -> &'static str {
        use PublicationContext::*;
        match self {
            Book(_) => "Book",
            Report(_) => "Report",
            Degree(_) => "Degree",
            Anthology(_) => "Anthology",
            Journal(_) => "Journal",
            UnconfirmedJournal(_) => "UnconfirmedJournal",
            Event(_) => "Event",
            Artistic => "Artistic",
            MediaContribution => "MediaContribution",
            ResearchData => "ResearchData",
            GeographicalContent => "GeographicalContent",
        }
    }

    /// Contexts that behave like a book and may carry ISBNs.
    pub fn as_book_like(&self) -> Option<&BookContext> {
        match self {
            Self::Book(book) | Self::Report(book) | Self::Degree(book) => Some(book),
            _ => None,
        }
    }

    pub fn is_book_like(&self) -> bool {
        self.as_book_like().is_some()
    }

    pub fn isbn_list(&self) -> &[String] {
        self.as_book_like()
            .map(|book| book.isbn_list.as_slice())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for PublicationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}
