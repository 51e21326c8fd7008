use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Isbn {
    pub raw: String,
    pub isbn13: String,
}

fn strip_separators(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_uppercase()
}

fn isbn13_checksum(digits: &[u32]) -> u32 {
    digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum()
}

fn parse_isbn13(stripped: &str) -> Option<String> {
    let digits: Vec<u32> = stripped.chars().map(|c| c.to_digit(10)).collect::<Option<_>>()?;
    (isbn13_checksum(&digits) % 10 == 0).then(|| stripped.to_string())
}

fn parse_isbn10(stripped: &str) -> Option<String> {
    let mut digits = Vec::with_capacity(10);
    for (i, c) in stripped.chars().enumerate() {
        match c.to_digit(10) {
            Some(d) => digits.push(d),
            None if i == 9 && c == 'X' => digits.push(10),
            None => return None,
        }
    }
    let weighted: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| (10 - i as u32) * d)
        .sum();
    if weighted % 11 != 0 {
        return None;
    }

    let mut isbn13: Vec<u32> = vec![9, 7, 8];
    isbn13.extend_from_slice(&digits[..9]);
    let check = (10 - isbn13_checksum(&isbn13) % 10) % 10;
    isbn13.push(check);
    Some(isbn13.iter().map(u32::to_string).collect())
}

impl Isbn {
    /// Validates an ISBN-10 or ISBN-13 and normalises it to ISBN-13.
    pub fn parse(input: &str) -> Result<Self> {
        let stripped = strip_separators(input);
        let isbn13 = match stripped.len() {
            13 => parse_isbn13(&stripped),
            10 => parse_isbn10(&stripped),
            _ => None,
        }
        .ok_or_else(|| EngineError::InvalidIsbn(input.to_string()))?;

        Ok(Self {
            raw: input.to_string(),
            isbn13,
        })
    }

    /// Value to send to the search index. Invalid ISBNs are still searched,
    /// without separators, since registry data is not always checksum-clean.
    /// Returns `None` for blank input.
    pub fn search_value(input: &str) -> Option<String> {
        if let Ok(isbn) = Self::parse(input) {
            return Some(isbn.isbn13);
        }
        let stripped = strip_separators(input);
        (!stripped.is_empty()).then_some(stripped)
    }
}
