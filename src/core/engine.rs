use crate::config::GeneratorConfig;
use crate::core::abbreviations::AbbreviationTable;
use crate::core::builder::NodeBuilder;
use crate::core::collection::NodeCollection;
use crate::core::extractor::ParsedInput;
use crate::core::types::{BuiltNode, NodeRecord};
use crate::error::Result;
use crate::persistence::load_abbreviations;
use crate::seeding;
use std::sync::Arc;

// The generator holds only read-only state. Node collections are owned by
// the caller and passed in, so repeated or parallel runs never share state.
#[derive(Debug, Clone)]
pub struct GraphSourceGenerator {
    config: GeneratorConfig,
    builder: NodeBuilder,
    abbreviations: Arc<AbbreviationTable>,
}

impl GraphSourceGenerator {
    pub fn new(config: GeneratorConfig, abbreviations: AbbreviationTable) -> Result<Self> {
        let builder = NodeBuilder::new(&config)?;
        Ok(Self {
            config,
            builder,
            abbreviations: Arc::new(abbreviations),
        })
    }

    /// Loads the abbreviation table named in `config`.
    /// A missing table is [`crate::GsgError::MissingResource`].
    pub fn from_config(config: GeneratorConfig) -> Result<Self> {
        let abbreviations = load_abbreviations(&config.abbreviation_path)?;
        Self::new(config, abbreviations)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn builder(&self) -> &NodeBuilder {
        &self.builder
    }

    pub fn abbreviations(&self) -> &AbbreviationTable {
        &self.abbreviations
    }

    /// Swaps in a fresh table snapshot. Nodes built earlier are untouched.
    pub fn replace_abbreviations(&mut self, abbreviations: AbbreviationTable) {
        tracing::info!(entries = abbreviations.len(), "abbreviation table replaced");
        self.abbreviations = Arc::new(abbreviations);
    }

    pub fn parse_input(&self, value: &str) -> ParsedInput {
        self.builder.parse_input(value, &self.abbreviations)
    }

    pub fn build_node(&self, value: &str, node_type: &str) -> BuiltNode {
        self.builder.build_node(value, node_type, &self.abbreviations)
    }

    /// Builds a node and stores it unless its uid is already taken.
    pub fn add_node(&self, nodes: &mut NodeCollection, value: &str, node_type: &str) -> bool {
        nodes.insert_if_absent(self.build_node(value, node_type))
    }

    pub fn seed_vocabulary_nodes(&self, nodes: &mut NodeCollection) -> Vec<NodeRecord> {
        seeding::seed_vocabulary_nodes(&self.builder, &self.abbreviations, nodes)
    }

    pub fn seed_vocabulary_nodes_parallel(
        &self,
        nodes: &mut NodeCollection,
        workers: usize,
    ) -> usize {
        seeding::seed_vocabulary_nodes_parallel(&self.builder, &self.abbreviations, nodes, workers)
    }
}
