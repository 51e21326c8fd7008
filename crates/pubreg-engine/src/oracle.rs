use pubreg_core::Publication;

use crate::identifiers::Doi;

/// Decides whether an existing registry record and an incoming mapped record
/// describe the same work.
pub trait EquivalenceOracle: Send + Sync {
    fn matches(&self, existing: &Publication, incoming: &Publication) -> bool;
}

/// Metadata-based equivalence: similar main titles, and no contradiction in
/// DOI, instance type or publication year where both sides carry one.
/// Equal DOIs are sufficient on their own.
#[derive(Debug, Clone)]
pub struct MetadataEquivalence {
    title_similarity_threshold: f64,
}

impl Default for MetadataEquivalence {
    fn default() -> Self {
        Self {
            title_similarity_threshold: 0.91,
        }
    }
}

impl MetadataEquivalence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title_threshold(mut self, threshold: f64) -> Self {
        self.title_similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

impl EquivalenceOracle for MetadataEquivalence {
    fn matches(&self, existing: &Publication, incoming: &Publication) -> bool {
        let same_doi = match (normalized_doi(existing), normalized_doi(incoming)) {
            (Some(a), Some(b)) if a != b => return false,
            (Some(_), Some(_)) => true,
            _ => false,
        };
        if let (Some(a), Some(b)) = (existing.instance_type(), incoming.instance_type())
            && a != b
        {
            return false;
        }
        if let (Some(a), Some(b)) = (existing.publication_year(), incoming.publication_year())
            && a != b
        {
            return false;
        }
        if same_doi {
            return true;
        }

        match (existing.main_title(), incoming.main_title()) {
            (Some(a), Some(b)) => similar_titles(
                &normalize_title(a),
                &normalize_title(b),
                self.title_similarity_threshold,
            ),
            _ => false,
        }
    }
}

fn normalized_doi(publication: &Publication) -> Option<String> {
    publication.doi().map(Doi::search_value)
}

fn normalize_title(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn similar_titles(a: &str, b: &str, threshold: f64) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    if a.len() < 5 || b.len() < 5 {
        return false;
    }
    strsim::normalized_levenshtein(a, b) >= threshold
}
