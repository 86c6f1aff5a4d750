//! Graph description files
//!
//! A description lists nodes and the relationships between them, with
//! relationships referring to nodes by name:
//!
//! ```toml
//! [[nodes]]
//! name = "Bobita"
//! label = "puppy"
//! body = '{"power": 500}'
//!
//! [[relationships]]
//! from = "Bobita"
//! to = "Smaug"
//! label = "enemies"
//! ```
//!
//! Files ending in `.json` are read as JSON with the same shape; anything
//! else is read as TOML.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use assetgraph_core::{Graph, Node};

#[derive(Debug, Default, Deserialize)]
pub struct GraphFile {
    #[serde(default)]
    pub nodes: Vec<NodeEntry>,
    #[serde(default)]
    pub relationships: Vec<RelationshipEntry>,
}

#[derive(Debug, Deserialize)]
pub struct NodeEntry {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct RelationshipEntry {
    pub from: String,
    pub to: String,
    pub label: String,
}

/// A graph built from a description, with its nodes indexed by name
pub struct LoadedGraph {
    pub graph: Graph,
    pub nodes_by_name: HashMap<String, Node>,
}

impl LoadedGraph {
    /// Look up a node by the name it has in the description
    pub fn node(&self, name: &str) -> anyhow::Result<&Node> {
        self.nodes_by_name
            .get(name)
            .with_context(|| format!("no node named '{}' in the graph", name))
    }
}

impl GraphFile {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading graph file {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let file = if is_json {
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing JSON graph file {}", path.display()))?
        } else {
            toml::from_str(&raw)
                .with_context(|| format!("parsing TOML graph file {}", path.display()))?
        };
        Ok(file)
    }

    /// Insert every node and relationship into a fresh graph
    pub fn build(self) -> anyhow::Result<LoadedGraph> {
        let graph = Graph::new();
        let mut nodes_by_name = HashMap::new();

        for entry in self.nodes {
            if nodes_by_name.contains_key(&entry.name) {
                bail!("duplicate node name '{}' in graph file", entry.name);
            }
            let node = graph.insert_node(entry.name.clone(), entry.label, entry.body.into_bytes());
            nodes_by_name.insert(entry.name, node);
        }

        let loaded = LoadedGraph {
            graph,
            nodes_by_name,
        };

        for entry in self.relationships {
            let from = loaded
                .node(&entry.from)
                .with_context(|| format!("relationship '{}' source", entry.label))?;
            let to = loaded
                .node(&entry.to)
                .with_context(|| format!("relationship '{}' target", entry.label))?;
            loaded.graph.add_relationship(from, to, entry.label)?;
        }

        tracing::info!(
            "Loaded graph with {} nodes and {} relationships",
            loaded.graph.node_count(),
            loaded.graph.relationship_count()
        );
        Ok(loaded)
    }
}

pub fn load(path: &Path) -> anyhow::Result<LoadedGraph> {
    GraphFile::read(path)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetgraph_core::GraphView;

    const SAMPLE: &str = r#"
[[nodes]]
name = "Bobita"
label = "puppy"
body = '{"power": 500}'

[[nodes]]
name = "Smaug"
label = "dragon"

[[relationships]]
from = "Bobita"
to = "Smaug"
label = "enemies"
"#;

    #[test]
    fn test_build_from_toml() {
        let file: GraphFile = toml::from_str(SAMPLE).unwrap();
        let loaded = file.build().unwrap();

        assert_eq!(loaded.graph.node_count(), 2);
        let bobita = loaded.node("Bobita").unwrap();
        assert_eq!(bobita.body, b"{\"power\": 500}");

        let rels = loaded.graph.list_relationships(&[]);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].to_name, "Smaug");
    }

    #[test]
    fn test_read_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        std::fs::write(
            &path,
            r#"{"nodes": [{"name": "A", "label": "node"}], "relationships": []}"#,
        )
        .unwrap();

        let loaded = load(&path).unwrap();
        assert!(loaded.node("A").unwrap().body.is_empty());
    }

    #[test]
    fn test_unknown_relationship_endpoint() {
        let file: GraphFile = toml::from_str(
            r#"
[[nodes]]
name = "A"
label = "node"

[[relationships]]
from = "A"
to = "B"
label = "knows"
"#,
        )
        .unwrap();

        let err = file.build().err().unwrap();
        assert!(format!("{:#}", err).contains("no node named 'B'"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let file: GraphFile = toml::from_str(
            r#"
[[nodes]]
name = "A"
label = "node"

[[nodes]]
name = "A"
label = "other"
"#,
        )
        .unwrap();

        assert!(file.build().is_err());
    }
}
