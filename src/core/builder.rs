// File: src/core/builder.rs
use crate::config::GeneratorConfig;
use crate::core::abbreviations::AbbreviationTable;
use crate::core::extractor::{ParsedInput, TermExtractor};
use crate::core::hasher::Hasher;
use crate::core::normalizer::Normalizer;
use crate::core::types::{BuiltNode, Fingerprint, NodeAttributes, NodeRecord};
use crate::error::Result;
use chrono::{DateTime, Utc};

/// Turns `(value, node_type)` into a stable uid plus its attribute record.
///
/// The uid hashes `"{node_type}{separator}{value}"`, so the same literal under
/// two node types gets two identities. Attributes are extracted from `value`
/// alone.
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    hasher: Hasher,
    normalizer: Normalizer,
    extractor: TermExtractor,
    separator: String,
}

impl NodeBuilder {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            hasher: Hasher::new(&config.salt)?,
            normalizer: Normalizer::new(config)?,
            extractor: TermExtractor::new(config.term_delimiter.clone()),
            separator: config.node_value_separator.clone(),
        })
    }

    pub fn hasher(&self) -> &Hasher {
        &self.hasher
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn composite_key(&self, value: &str, node_type: &str) -> String {
        format!("{node_type}{}{value}", self.separator)
    }

    /// Hash of the composite key. Only `value_hash` becomes the uid.
    pub fn identify(&self, value: &str, node_type: &str) -> Fingerprint {
        let key = self.composite_key(value, node_type);
        debug_assert!(!key.is_empty());
        self.hasher.hash_str(&key)
    }

    /// Normalizes and extracts `value` against `abbreviations`.
    pub fn parse_input(&self, value: &str, abbreviations: &AbbreviationTable) -> ParsedInput {
        let tokens = self.normalizer.tokenize(value);
        ParsedInput {
            value_input: value.to_string(),
            extraction: self.extractor.extract(tokens.as_slice(), abbreviations),
        }
    }

    pub fn build_node(
        &self,
        value: &str,
        node_type: &str,
        abbreviations: &AbbreviationTable,
    ) -> BuiltNode {
        self.build_node_at(value, node_type, abbreviations, Utc::now())
    }

    /// [`NodeBuilder::build_node`] with an explicit creation time.
    pub fn build_node_at(
        &self,
        value: &str,
        node_type: &str,
        abbreviations: &AbbreviationTable,
        created: DateTime<Utc>,
    ) -> BuiltNode {
        let fingerprint = self.identify(value, node_type);
        let parsed = self.parse_input(value, abbreviations);

        let attributes = NodeAttributes {
            name: value.to_string(),
            node_type: node_type.to_string(),
            datetime_created: created,
            terms: parsed.extraction.terms,
            vocabulary: parsed.extraction.vocabulary,
            abbreviations_found: parsed.extraction.abbreviations_found,
        };

        BuiltNode {
            record: NodeRecord {
                uid: fingerprint.uid(),
                attributes,
            },
            bucket_idx: fingerprint.bucket_idx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::VOCABULARY_NODE_TYPE;

    fn builder() -> NodeBuilder {
        NodeBuilder::new(&GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn uid_matches_reference_store() {
        let b = builder();
        let table = AbbreviationTable::new();
        assert_eq!(b.build_node("paris", "city", &table).record.uid, "1990887620");
        assert_eq!(b.build_node("fyc", VOCABULARY_NODE_TYPE, &table).record.uid, "783290795");

        let node = b.build_node("paris", VOCABULARY_NODE_TYPE, &table);
        assert_eq!(node.record.uid, "1303592030");
        assert_eq!(node.bucket_idx, 164);
    }

    #[test]
    fn node_type_is_part_of_identity() {
        let b = builder();
        let table = AbbreviationTable::new();
        let city = b.build_node("paris", "city", &table);
        let vocab = b.build_node("paris", VOCABULARY_NODE_TYPE, &table);
        assert_ne!(city.record.uid, vocab.record.uid);
    }

    #[test]
    fn separator_keeps_splits_apart() {
        let b = builder();
        assert_ne!(b.identify("c_d", "ab"), b.identify("bc_d", "a"));
    }

    #[test]
    fn double_underscore_separator_is_ambiguous() {
        // Both build the key "a___b". The separator stays `__` so existing uids
        // remain stable.
        let b = builder();
        assert_eq!(b.composite_key("b", "a_"), b.composite_key("_b", "a"));
        assert_eq!(b.identify("b", "a_"), b.identify("_b", "a"));
    }

    #[test]
    fn uid_ignores_value_case() {
        let b = builder();
        assert_eq!(b.identify("Paris", "City"), b.identify("paris", "city"));
    }

    #[test]
    fn rebuilding_differs_only_in_timestamp() {
        let b = builder();
        let table = AbbreviationTable::from_pairs([("fyc", "First Year Commission")]);
        let first = b.build_node("FYC review", "document", &table);
        let mut second = b.build_node("FYC review", "document", &table);
        assert_eq!(first.record.uid, second.record.uid);

        second.record.attributes.datetime_created = first.record.attributes.datetime_created;
        assert_eq!(first, second);
    }

    #[test]
    fn attributes_come_from_value_not_key() {
        let b = builder();
        let table = AbbreviationTable::from_pairs([("fyc", "First Year Commission")]);
        let attrs = b.build_node("fyc review", "document", &table).record.attributes;

        assert_eq!(attrs.name, "fyc review");
        assert_eq!(attrs.node_type, "document");
        assert_eq!(attrs.abbreviations_found, vec!["fyc"]);
        assert_eq!(attrs.vocabulary, vec!["commission", "first", "review", "year"]);
        assert!(!attrs.vocabulary.contains(&"document".to_string()));
    }

    #[test]
    fn parse_input_echoes_value() {
        let parsed = builder().parse_input("Washington, D.C.", &AbbreviationTable::new());
        assert_eq!(parsed.value_input, "Washington, D.C.");
        assert_eq!(parsed.extraction.tokens_not_seen, vec!["c", "d", "washington"]);
    }
}
