// File: src/core/extractor.rs
use crate::core::abbreviations::AbbreviationTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Terms and vocabulary pulled out of one token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub terms: BTreeSet<String>,
    /// Sorted, distinct, lowercase words split out of `terms`.
    pub vocabulary: Vec<String>,
    pub abbreviations_found: Vec<String>,
    pub tokens_not_seen: Vec<String>,
}

/// An [`Extraction`] together with the raw value it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInput {
    pub value_input: String,
    #[serde(flatten)]
    pub extraction: Extraction,
}

/// Expands known abbreviations and decomposes terms into vocabulary words.
#[derive(Debug, Clone)]
pub struct TermExtractor {
    term_delimiter: String,
}

impl TermExtractor {
    pub fn new(term_delimiter: impl Into<String>) -> Self {
        Self {
            term_delimiter: term_delimiter.into(),
        }
    }

    pub fn extract<S: AsRef<str>>(
        &self,
        tokens: &[S],
        abbreviations: &AbbreviationTable,
    ) -> Extraction {
        let mut terms = BTreeSet::new();
        let mut abbreviations_found = BTreeSet::new();
        let mut tokens_not_seen = BTreeSet::new();

        for token in tokens {
            let token = token.as_ref();
            match abbreviations.get(token) {
                Some(description) => {
                    abbreviations_found.insert(token.to_string());
                    terms.insert(description.to_string());
                }
                None => {
                    tokens_not_seen.insert(token.to_string());
                    terms.insert(token.to_string());
                }
            }
        }

        let vocabulary: BTreeSet<String> = terms
            .iter()
            .flat_map(|term| term.split(self.term_delimiter.as_str()))
            .map(|word| word.to_lowercase().trim().to_string())
            .filter(|word| !word.is_empty())
            .collect();

        Extraction {
            terms,
            vocabulary: vocabulary.into_iter().collect(),
            abbreviations_found: abbreviations_found.into_iter().collect(),
            tokens_not_seen: tokens_not_seen.into_iter().collect(),
        }
    }
}

impl Default for TermExtractor {
    fn default() -> Self {
        Self::new(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fyc_table() -> AbbreviationTable {
        AbbreviationTable::from_pairs([("fyc", "First Year Commission")])
    }

    #[test]
    fn abbreviation_expands_into_a_term() {
        let out = TermExtractor::default().extract(&["fyc", "review"], &fyc_table());

        assert!(out.terms.contains("First Year Commission"));
        assert!(out.terms.contains("review"));
        assert_eq!(out.terms.len(), 2);
        assert_eq!(out.abbreviations_found, vec!["fyc"]);
        assert_eq!(out.tokens_not_seen, vec!["review"]);
        assert_eq!(out.vocabulary, vec!["commission", "first", "review", "year"]);
    }

    #[test]
    fn repeated_tokens_collapse() {
        let tokens = ["fyc", "york", "fyc", "york"];
        let out = TermExtractor::default().extract(&tokens, &fyc_table());
        assert_eq!(out.terms.len(), 2);
        assert_eq!(out.abbreviations_found, vec!["fyc"]);
        assert_eq!(out.tokens_not_seen, vec!["york"]);
    }

    #[test]
    fn differently_cased_words_merge_in_vocabulary() {
        let table =
            AbbreviationTable::from_pairs([("ny", "New York"), ("nyc", "new york City")]);
        let out = TermExtractor::default().extract(&["ny", "nyc", "york"], &table);
        assert_eq!(out.vocabulary, vec!["city", "new", "york"]);
    }

    #[test]
    fn doubled_spaces_in_descriptions_do_not_leak_empty_words() {
        let table = AbbreviationTable::from_pairs([("ab", "Alpha  Beta ")]);
        let out = TermExtractor::default().extract(&["ab"], &table);
        assert_eq!(out.vocabulary, vec!["alpha", "beta"]);
    }

    #[test]
    fn no_tokens_gives_empty_extraction() {
        let tokens: [&str; 0] = [];
        let out = TermExtractor::default().extract(&tokens, &fyc_table());
        assert_eq!(out, Extraction::default());
    }
}
