use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

const DOI_PREFIXES: [&str; 6] = [
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
    "DOI:",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Doi {
    pub raw: String,
    /// Lower-cased `10.xxxx/suffix` form, without resolver prefix.
    pub normalized: String,
}

impl Doi {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let stripped = DOI_PREFIXES
            .iter()
            .find_map(|prefix| input.strip_prefix(prefix))
            .map(str::trim_start)
            .unwrap_or(input);

        let Some((registrant, suffix)) = stripped.split_once('/') else {
            return Err(EngineError::InvalidDoi(input.to_string()));
        };
        if !registrant.starts_with("10.") || suffix.is_empty() {
            return Err(EngineError::InvalidDoi(input.to_string()));
        }

        Ok(Self {
            raw: input.to_string(),
            normalized: stripped.to_lowercase(),
        })
    }

    /// Value to send to the search index: the normalised DOI when the input
    /// parses, the trimmed input otherwise.
    pub fn search_value(input: &str) -> String {
        Self::parse(input)
            .map(|doi| doi.normalized)
            .unwrap_or_else(|_| input.trim().to_string())
    }
}
