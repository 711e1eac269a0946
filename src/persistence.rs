// File: src/persistence.rs
use crate::core::abbreviations::AbbreviationTable;
use crate::core::collection::NodeCollection;
use crate::core::types::NodeAttributes;
use crate::error::{GsgError, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Format version stamped into every graph source document.
pub const GRAPH_SOURCE_VERSION: &str = "0.0.1";

/// The serialized shape of a generation run.
/// Nodes are `[uid, attributes]` pairs in insertion order.
#[derive(Serialize)]
struct GraphSourceDocument<'a> {
    version: &'static str,
    nodes: Vec<(&'a str, &'a NodeAttributes)>,
    edges: Vec<serde_json::Value>,
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Loads the abbreviation table. Bincode unless the path ends in `.json`.
pub fn load_abbreviations(path: &Path) -> Result<AbbreviationTable> {
    if !path.is_file() {
        tracing::error!(path = %path.display(), "abbreviation table does not exist");
        return Err(GsgError::MissingResource {
            path: path.to_path_buf(),
        });
    }
    let reader = BufReader::new(File::open(path)?);
    let table: AbbreviationTable = if is_json(path) {
        serde_json::from_reader(reader)?
    } else {
        bincode::deserialize_from(reader)?
    };
    tracing::info!(path = %path.display(), entries = table.len(), "abbreviation table loaded");
    Ok(table)
}

pub fn save_abbreviations(table: &AbbreviationTable, path: &Path) -> Result<()> {
    write_atomically(path, |writer| {
        if is_json(path) {
            serde_json::to_writer_pretty(writer, table)?;
        } else {
            bincode::serialize_into(writer, table)?;
        }
        Ok(())
    })
}

/// Writes `{ version, nodes, edges }` as JSON. Edges are not built here and
/// are always empty.
pub fn write_graph_source(nodes: &NodeCollection, path: &Path) -> Result<()> {
    let document = GraphSourceDocument {
        version: GRAPH_SOURCE_VERSION,
        nodes: nodes.nodes().iter().map(|n| (n.uid.as_str(), &n.attributes)).collect(),
        edges: Vec::new(),
    };
    write_atomically(path, |writer| {
        serde_json::to_writer(writer, &document)?;
        Ok(())
    })?;
    tracing::info!(path = %path.display(), nodes = nodes.len(), "graph source written");
    Ok(())
}

// Writes into a temp file beside `path` and renames it over the target, so
// readers never see a half-written file.
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| GsgError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::core::builder::NodeBuilder;
    use crate::seeding::seed_vocabulary_nodes;

    fn table() -> AbbreviationTable {
        AbbreviationTable::from_pairs([
            ("fyc", "First Year Commission"),
            ("dc", "District of Columbia"),
        ])
    }

    #[test]
    fn bincode_table_survives_a_save_load_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("abbreviations.bin");
        save_abbreviations(&table(), &path).unwrap();
        assert_eq!(load_abbreviations(&path).unwrap(), table());
    }

    #[test]
    fn json_table_keys_are_folded_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abbreviations.json");
        fs::write(&path, r#"{"FYC": "First Year Commission"}"#).unwrap();

        let loaded = load_abbreviations(&path).unwrap();
        assert_eq!(loaded.get("fyc"), Some("First Year Commission"));
    }

    #[test]
    fn json_clash_and_seeding_follow_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abbreviations.json");
        fs::write(&path, r#"{"zz": "Year", "aa": "year", "ZZ": "Zone Zero"}"#).unwrap();

        let loaded = load_abbreviations(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("zz"), Some("Year"));

        let builder = NodeBuilder::new(&GeneratorConfig::default()).unwrap();
        let mut nodes = NodeCollection::new();
        seed_vocabulary_nodes(&builder, &loaded, &mut nodes);
        let names: Vec<_> = nodes.nodes().iter().map(|n| n.attributes.name.as_str()).collect();
        assert_eq!(names, vec!["zz", "Year", "aa"]);
    }

    #[test]
    fn absent_table_is_a_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_abbreviations(&dir.path().join("nope.bin")).unwrap_err();
        assert!(matches!(err, GsgError::MissingResource { .. }));
    }

    #[test]
    fn corrupt_table_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abbreviations.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(load_abbreviations(&path), Err(GsgError::Json(_))));
    }

    #[test]
    fn overwrite_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abbreviations.bin");
        save_abbreviations(&table(), &path).unwrap();
        save_abbreviations(&AbbreviationTable::new(), &path).unwrap();
        assert!(load_abbreviations(&path).unwrap().is_empty());
    }
}
