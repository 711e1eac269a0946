// File: src/seeding.rs
use crate::core::abbreviations::AbbreviationTable;
use crate::core::builder::NodeBuilder;
use crate::core::collection::NodeCollection;
use crate::core::normalizer::Normalizer;
use crate::core::types::{NodeRecord, VOCABULARY_NODE_TYPE};

/// Words that become vocabulary nodes for one table entry: the abbreviation
/// itself, then every word of its cleaned description.
///
/// The description is split on whitespace only, not on the token delimiter
/// pattern, so `north_america` stays one word here while the normalizer would
/// split it. Callers depend on this exact word list.
pub fn vocabulary_candidates(
    normalizer: &Normalizer,
    abbreviation: &str,
    description: &str,
) -> Vec<String> {
    let mut words = vec![abbreviation.trim().to_lowercase()];
    let cleaned = normalizer.cleanup(description, false);
    words.extend(cleaned.split_whitespace().map(str::to_string));
    words
}

fn seed_entries<'a, I>(
    builder: &NodeBuilder,
    abbreviations: &AbbreviationTable,
    entries: I,
    nodes: &mut NodeCollection,
) -> Vec<NodeRecord>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut inserted = Vec::new();
    for (abbreviation, description) in entries {
        for word in vocabulary_candidates(builder.normalizer(), abbreviation, description) {
            let node = builder.build_node(&word, VOCABULARY_NODE_TYPE, abbreviations);
            let record = node.record.clone();
            if nodes.insert_if_absent(node) {
                inserted.push(record);
            }
        }
    }
    inserted
}

/// Emits one `vocabulary` node per abbreviation and per description word,
/// skipping any whose uid is already in `nodes`. Entries are walked in table
/// order, so the first spelling of a shared word in the file names its node.
/// Returns the records added.
pub fn seed_vocabulary_nodes(
    builder: &NodeBuilder,
    abbreviations: &AbbreviationTable,
    nodes: &mut NodeCollection,
) -> Vec<NodeRecord> {
    let before = nodes.len();
    let inserted = seed_entries(builder, abbreviations, abbreviations.iter(), nodes);
    tracing::info!(
        entries = abbreviations.len(),
        added = inserted.len(),
        total = before + inserted.len(),
        "vocabulary nodes seeded"
    );
    inserted
}

/// Seeds with the table split across `workers` threads. Each worker fills its
/// own collection; the results are merged in table order, so the outcome is
/// the same as [`seed_vocabulary_nodes`]. Returns the number of records added.
pub fn seed_vocabulary_nodes_parallel(
    builder: &NodeBuilder,
    abbreviations: &AbbreviationTable,
    nodes: &mut NodeCollection,
    workers: usize,
) -> usize {
    let entries: Vec<(&str, &str)> = abbreviations.iter().collect();
    if entries.is_empty() {
        return 0;
    }
    let chunk_size = entries.len().div_ceil(workers.max(1));

    let partials: Vec<NodeCollection> = std::thread::scope(|scope| {
        let handles: Vec<_> = entries
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    let mut local = NodeCollection::new();
                    seed_entries(builder, abbreviations, chunk.iter().copied(), &mut local);
                    local
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(local) => local,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let added: usize = partials.into_iter().map(|local| nodes.merge(local)).sum();
    tracing::info!(
        entries = abbreviations.len(),
        workers,
        added,
        "vocabulary nodes seeded in parallel"
    );
    added
}
