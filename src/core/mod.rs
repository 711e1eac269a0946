pub mod abbreviations;
pub mod builder;
pub mod collection;
pub mod engine;
pub mod extractor;
pub mod hasher;
pub mod normalizer;
pub mod types;
