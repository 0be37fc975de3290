use crate::graph::LineageGraph;
use crate::model::Vertex;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// The single interchange document consumed by the presentation layer.
/// Field names and the zoo id sign convention are part of the contract
/// with the family-tree query frontend.
#[derive(Serialize)]
pub struct ExportDocument {
    #[serde(rename = "_photo")]
    photo: PhotoExport,
    #[serde(rename = "_totals")]
    totals: TotalsExport,
    edges: Vec<EdgeExport>,
    vertices: Vec<Map<String, Value>>,
}

#[derive(Serialize)]
struct PhotoExport {
    credit: BTreeMap<String, u64>,
    entity_max: u32,
}

#[derive(Serialize)]
struct TotalsExport {
    last_born: i32,
    last_died: i32,
    locations: usize,
    media: usize,
    pandas: usize,
    wilds: usize,
    zoos: usize,
}

#[derive(Serialize)]
struct EdgeExport {
    #[serde(rename = "_in")]
    target: i64,
    #[serde(rename = "_label")]
    label: String,
    #[serde(rename = "_out")]
    source: i64,
}

impl ExportDocument {
    pub fn from_graph(graph: &LineageGraph) -> Self {
        let summary = graph.summary();
        ExportDocument {
            photo: PhotoExport {
                // FxHashMap iteration order is arbitrary; sort for output
                credit: graph
                    .photo()
                    .credit
                    .iter()
                    .map(|(k, v)| (k.clone(), *v))
                    .collect(),
                entity_max: graph.photo().max_index,
            },
            totals: TotalsExport {
                last_born: summary.last_born,
                last_died: summary.last_died,
                locations: graph.wild_count() + graph.zoo_count(),
                media: graph.media_count(),
                pandas: graph.panda_count(),
                wilds: graph.wild_count(),
                zoos: graph.zoo_count(),
            },
            edges: graph
                .edges()
                .iter()
                .map(|e| EdgeExport {
                    target: e.to.export_value(),
                    label: e.label.clone(),
                    source: e.from.export_value(),
                })
                .collect(),
            vertices: graph.vertices().iter().map(vertex_fields).collect(),
        }
    }
}

/// Flatten a vertex into its exported field map. Typed fields rejoin the
/// passthrough fields under their wire names; birthday/death always
/// export so consumers can tell "not recorded" from "does not apply".
fn vertex_fields(vertex: &Vertex) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("_id".to_string(), Value::from(vertex.id().export_value()));
    let fields = match vertex {
        Vertex::Panda(p) => {
            map.insert("birthday".to_string(), Value::from(p.birthday.to_string()));
            map.insert("death".to_string(), Value::from(p.death.to_string()));
            if let Some(gender) = p.gender {
                map.insert("gender".to_string(), Value::from(gender.as_str()));
            }
            &p.fields
        }
        Vertex::Zoo(s) => &s.fields,
        Vertex::Wild(s) => &s.fields,
        Vertex::Media(m) => &m.fields,
    };
    for (key, value) in fields {
        map.insert(key.clone(), Value::from(value.clone()));
    }
    map
}

/// Write the finished, validated graph as pretty-printed JSON
pub fn export_json_graph(graph: &LineageGraph, dest: &Path) -> Result<()> {
    let doc = ExportDocument::from_graph(graph);

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create export directory: {}", parent.display()))?;
        }
    }
    let file = File::create(dest)
        .with_context(|| format!("Failed to create export file: {}", dest.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &doc)
        .with_context(|| format!("Failed to write export file: {}", dest.display()))?;

    info!(dest = %dest.display(), "Dataset exported");
    println!(
        "Dataset exported: {} pandas at {} locations ({} wild, {} zoo)",
        graph.panda_count(),
        graph.wild_count() + graph.zoo_count(),
        graph.wild_count(),
        graph.zoo_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Namespace;
    use crate::record::Record;

    fn sample_graph() -> LineageGraph {
        let mut graph = LineageGraph::new();
        let zoo = Record::parse(
            Path::new("zoos/jp/0007_z.txt"),
            "[zoo]\n_id: 7\nen.name: Chausuyama Zoo\n",
        )
        .unwrap();
        graph.import_site(&zoo, Namespace::Zoo).unwrap();
        let wild = Record::parse(
            Path::new("wild/cn/0003_w.txt"),
            "[wild]\n_id: 3\nen.name: Sichuan Range\n",
        )
        .unwrap();
        graph.import_site(&wild, Namespace::Wild).unwrap();
        let panda = Record::parse(
            Path::new("pandas/0007/0001_maple.txt"),
            "[panda]\n_id: 1\nen.name: Maple\nbirthday: 2014/05/01\ndeath: unknown\ngender: f\nbirthplace: wild.3\nzoo: 7\n",
        )
        .unwrap();
        graph.import_panda(&panda).unwrap();
        graph
    }

    #[test]
    fn totals_count_per_kind() {
        let doc = ExportDocument::from_graph(&sample_graph());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["_totals"]["pandas"], 1);
        assert_eq!(value["_totals"]["zoos"], 1);
        assert_eq!(value["_totals"]["wilds"], 1);
        assert_eq!(value["_totals"]["locations"], 2);
        assert_eq!(value["_totals"]["media"], 0);
        assert_eq!(value["_totals"]["last_born"], 2014);
        assert_eq!(value["_totals"]["last_died"], 1970);
    }

    #[test]
    fn edges_use_signed_wire_ids() {
        let doc = ExportDocument::from_graph(&sample_graph());
        let value = serde_json::to_value(&doc).unwrap();
        let edges = value["edges"].as_array().unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0]["_label"], "birthplace");
        assert_eq!(edges[0]["_out"], 1);
        assert_eq!(edges[0]["_in"], 3);
        assert_eq!(edges[1]["_label"], "zoo");
        assert_eq!(edges[1]["_in"], -7);
    }

    #[test]
    fn vertices_flatten_typed_fields() {
        let doc = ExportDocument::from_graph(&sample_graph());
        let value = serde_json::to_value(&doc).unwrap();
        let vertices = value["vertices"].as_array().unwrap();
        assert_eq!(vertices.len(), 3);
        // Import order: zoo, wild, panda
        assert_eq!(vertices[0]["_id"], -7);
        assert_eq!(vertices[1]["_id"], 3);
        assert_eq!(vertices[2]["_id"], 1);
        assert_eq!(vertices[2]["birthday"], "2014/05/01");
        assert_eq!(vertices[2]["death"], "unknown");
        assert_eq!(vertices[2]["gender"], "Female");
        assert_eq!(vertices[2]["en.name"], "Maple");
    }

    #[test]
    fn export_writes_parent_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dest = tmp.path().join("export").join("redpanda.json");
        export_json_graph(&sample_graph(), &dest).unwrap();

        let text = fs::read_to_string(&dest).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("vertices").is_some());
        assert!(value.get("_photo").is_some());
    }

    #[test]
    fn photo_block_exports_credit_and_max() {
        let mut graph = sample_graph();
        let media = Record::parse(
            Path::new("media/0001_m.txt"),
            "[media]\n_id: 1\nphoto.4: http://x\nphoto.4.author: alice\n",
        )
        .unwrap();
        graph.import_media(&media).unwrap();

        let value = serde_json::to_value(ExportDocument::from_graph(&graph)).unwrap();
        assert_eq!(value["_photo"]["credit"]["alice"], 1);
        assert_eq!(value["_photo"]["entity_max"], 4);
        assert_eq!(value["_totals"]["media"], 1);
    }
}
