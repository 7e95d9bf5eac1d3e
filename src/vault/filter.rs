//! Record filters for `list`: regular expressions and typo-tolerant
//! fuzzy matching.

use std::cmp;

use regex::{Regex, RegexBuilder};

use super::record::Record;
use crate::errors::{Result, VaultError};

/// Largest edit distance still counted as a fuzzy match.
pub const MAX_DISTANCE: usize = 2;

/// Which field a fuzzy filter compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyField {
    Name,
    Account,
    /// Match if either the name or the account is close enough.
    Either,
}

/// How `list` selects records.
#[derive(Debug, Clone)]
pub enum Filter {
    /// Every record the current key can open.
    All,
    /// Case-insensitive regular expression against the name.
    Regex(Regex),
    /// Case-insensitive Levenshtein distance of at most `MAX_DISTANCE`.
    Fuzzy { query: String, field: FuzzyField },
}

impl Filter {
    /// Compile a regex filter.  A bad pattern is `InvalidPattern`.
    pub fn regex(pattern: &str) -> Result<Self> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(Filter::Regex)
            .map_err(|e| VaultError::InvalidPattern(e.to_string()))
    }

    pub fn fuzzy(query: &str, field: FuzzyField) -> Self {
        Filter::Fuzzy {
            query: query.to_lowercase(),
            field,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::All => true,
            Filter::Regex(re) => re.is_match(&record.name),
            Filter::Fuzzy { query, field } => {
                let close =
                    |value: &str| levenshtein(&value.to_lowercase(), query) <= MAX_DISTANCE;
                match field {
                    FuzzyField::Name => close(&record.name),
                    FuzzyField::Account => close(&record.account_id),
                    FuzzyField::Either => close(&record.name) || close(&record.account_id),
                }
            }
        }
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a.is_empty() {
        return b.chars().count();
    }
    if b.is_empty() {
        return a.chars().count();
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];

    for (i, a_ch) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let cost = if a_ch == b_ch { 0 } else { 1 };
            current[j + 1] = cmp::min(
                cmp::min(current[j] + 1, previous[j + 1] + 1),
                previous[j] + cost,
            );
        }
        previous.copy_from_slice(&current);
    }

    previous[b_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gmail() -> Record {
        Record::new("Gmail", "someone@gmail.com", "pw")
    }

    #[test]
    fn levenshtein_distances() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("gmial", "gmail"), 2);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn fuzzy_tolerates_typos() {
        assert!(Filter::fuzzy("Gmial", FuzzyField::Name).matches(&gmail()));
        assert!(Filter::fuzzy("gmal", FuzzyField::Name).matches(&gmail()));
        assert!(Filter::fuzzy("GMAIL", FuzzyField::Name).matches(&gmail()));
    }

    #[test]
    fn fuzzy_rejects_distant_queries() {
        assert!(!Filter::fuzzy("Completely Different", FuzzyField::Name).matches(&gmail()));
        assert!(!Filter::fuzzy("Completely Different", FuzzyField::Either).matches(&gmail()));
    }

    #[test]
    fn fuzzy_account_field() {
        let f = Filter::fuzzy("someone@gmial.com", FuzzyField::Account);
        assert!(f.matches(&gmail()));
        assert!(!Filter::fuzzy("someone@gmial.com", FuzzyField::Name).matches(&gmail()));
    }

    #[test]
    fn regex_matches_name_case_insensitively() {
        assert!(Filter::regex("^gm").unwrap().matches(&gmail()));
        assert!(!Filter::regex("^mail").unwrap().matches(&gmail()));
    }

    #[test]
    fn bad_regex_is_invalid_pattern() {
        let err = Filter::regex("(unclosed").unwrap_err();
        assert!(matches!(err, VaultError::InvalidPattern(_)));
    }

    #[test]
    fn all_matches_everything() {
        assert!(Filter::All.matches(&gmail()));
    }
}
