// src/core/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Decimal string form of a 32-bit fingerprint.
pub type Uid = String;

/// Node type used for nodes seeded from the abbreviation table.
pub const VOCABULARY_NODE_TYPE: &str = "vocabulary";

/// The `(bucket_idx, value_hash)` pair produced by hashing one byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Selects one of 256 bitmap buckets.
    pub bucket_idx: u8,
    pub value_hash: u32,
}

impl Fingerprint {
    pub fn uid(&self) -> Uid {
        self.value_hash.to_string()
    }
}

/// Search fields and provenance stored on every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttributes {
    pub name: String,
    pub node_type: String,
    pub datetime_created: DateTime<Utc>,
    /// Tokens and abbreviation expansions. Kept ordered so documents diff cleanly.
    pub terms: BTreeSet<String>,
    pub vocabulary: Vec<String>,
    pub abbreviations_found: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub uid: Uid,
    pub attributes: NodeAttributes,
}

/// A freshly built node plus the bucket its composite key hashed into.
/// The bucket travels alongside the record but plays no part in dedup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltNode {
    pub record: NodeRecord,
    pub bucket_idx: u8,
}

impl BuiltNode {
    pub fn uid(&self) -> &str {
        &self.record.uid
    }
}
