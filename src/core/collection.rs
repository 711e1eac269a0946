// File: src/core/collection.rs
use crate::core::types::{BuiltNode, NodeRecord, Uid};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct UidEntry {
    value: String,
    bucket_idx: u8,
}

/// Run-scoped set of node records, deduplicated on uid.
///
/// Insertion is first-writer-wins: a record whose uid is already present is
/// dropped, and stored records are never replaced. Dedup looks at the uid
/// alone, not at the `(bucket, uid)` pair.
#[derive(Debug, Clone, Default)]
pub struct NodeCollection {
    uids: HashMap<Uid, UidEntry>,
    nodes: Vec<NodeRecord>,
}

impl NodeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the node was stored, `false` if its uid was taken.
    pub fn insert_if_absent(&mut self, node: BuiltNode) -> bool {
        if self.contains(node.uid()) {
            tracing::debug!(
                uid = %node.uid(),
                name = %node.record.attributes.name,
                "duplicate uid skipped"
            );
            return false;
        }
        self.uids.insert(
            node.uid().to_string(),
            UidEntry {
                value: node.record.attributes.name.clone(),
                bucket_idx: node.bucket_idx,
            },
        );
        self.nodes.push(node.record);
        true
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.uids.contains_key(uid)
    }

    /// The literal value that first claimed `uid`.
    pub fn value_of(&self, uid: &str) -> Option<&str> {
        self.uids.get(uid).map(|entry| entry.value.as_str())
    }

    pub fn bucket_of(&self, uid: &str) -> Option<u8> {
        self.uids.get(uid).map(|entry| entry.bucket_idx)
    }

    /// Records in insertion order.
    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn uids(&self) -> impl Iterator<Item = (&str, &str)> {
        self.uids.iter().map(|(uid, entry)| (uid.as_str(), entry.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node count per bucket, indexed by `bucket_idx`.
    pub fn bucket_sizes(&self) -> [usize; 256] {
        let mut sizes = [0usize; 256];
        for entry in self.uids.values() {
            sizes[usize::from(entry.bucket_idx)] += 1;
        }
        sizes
    }

    /// Fingerprints in one bucket, ascending. Feeds per-bucket bitmaps.
    pub fn uids_in_bucket(&self, bucket_idx: u8) -> Vec<u32> {
        let mut fingerprints: Vec<u32> = self
            .uids
            .iter()
            .filter(|(_, entry)| entry.bucket_idx == bucket_idx)
            .filter_map(|(uid, _)| uid.parse().ok())
            .collect();
        fingerprints.sort_unstable();
        fingerprints
    }

    /// Folds `other` in, in its insertion order, under the same
    /// insert-if-absent rule. Returns how many records were taken.
    pub fn merge(&mut self, other: NodeCollection) -> usize {
        let NodeCollection { mut uids, nodes } = other;
        let mut taken = 0;
        for record in nodes {
            let bucket_idx = uids
                .remove(&record.uid)
                .map(|entry| entry.bucket_idx)
                .unwrap_or_default();
            if self.insert_if_absent(BuiltNode { record, bucket_idx }) {
                taken += 1;
            }
        }
        taken
    }

    pub fn into_nodes(self) -> Vec<NodeRecord> {
        self.nodes
    }
}
