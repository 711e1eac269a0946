// src/lib.rs
//! Graph database source generator.
//!
//! Turns free-text labels and abbreviation expansions into deduplicated graph
//! node records keyed by a salted BLAKE2s fingerprint, with the bucket index
//! a downstream store uses to shard per-bucket bitmaps.

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod seeding;

pub use crate::config::GeneratorConfig;
pub use crate::core::abbreviations::AbbreviationTable;
pub use crate::core::collection::NodeCollection;
pub use crate::core::engine::GraphSourceGenerator;
pub use crate::core::types::{BuiltNode, Fingerprint, NodeAttributes, NodeRecord, Uid};
pub use crate::error::{GsgError, Result};
