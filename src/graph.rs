use crate::config::{
    MEDIA_DIR, PANDA_DIR, PROGRESS_INTERVAL, SUMMARY_EPOCH_YEAR, WILD_DIR, ZOO_DIR,
};
use crate::error::{BuildError, Result};
use crate::fields;
use crate::model::{
    Edge, EntityId, MediaVertex, Namespace, PandaVertex, RecordedDate, SiteVertex, Vertex,
    FAMILY_LABEL, LITTER_LABEL,
};
use crate::record::Record;
use crate::validate;
use crate::walk;
use chrono::Datelike;
use indicatif::ProgressBar;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Most recent recorded birth and death years across the dataset
#[derive(Debug, Clone, Copy)]
pub struct Summary {
    pub last_born: i32,
    pub last_died: i32,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            last_born: SUMMARY_EPOCH_YEAR,
            last_died: SUMMARY_EPOCH_YEAR,
        }
    }
}

impl Summary {
    pub fn observe_birth(&mut self, date: RecordedDate) {
        if let Some(d) = date.date() {
            self.last_born = self.last_born.max(d.year());
        }
    }

    pub fn observe_death(&mut self, date: RecordedDate) {
        if let Some(d) = date.date() {
            self.last_died = self.last_died.max(d.year());
        }
    }
}

/// Per-author photo credit counts and the largest photo index seen on
/// any single record
#[derive(Debug, Default)]
pub struct PhotoTally {
    pub credit: FxHashMap<String, u64>,
    pub max_index: u32,
}

impl PhotoTally {
    fn credit_author(&mut self, author: &str, index: u32) {
        *self.credit.entry(author.to_string()).or_insert(0) += 1;
        self.max_index = self.max_index.max(index);
    }
}

/// The accumulating lineage graph.
///
/// Owns the vertex and edge collections, the per-kind id registry used for
/// site reference resolution, and the running summary counters. Lifecycle:
/// create, import one category at a time (zoos, wild ranges, pandas, media
/// -- sites must land before the pandas that reference them), verify after
/// each category, then hand the collections read-only to the exporter.
/// Vertices and edges are appended exactly once, in file order, and never
/// mutated afterward.
#[derive(Debug, Default)]
pub struct LineageGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    site_ids: FxHashSet<EntityId>,
    zoo_count: usize,
    wild_count: usize,
    panda_count: usize,
    media_count: usize,
    summary: Summary,
    photo: PhotoTally,
}

impl LineageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import and verify every category under the input root, in order
    pub fn build(root: &Path) -> anyhow::Result<Self> {
        let mut graph = Self::new();
        graph.import_category(&root.join(ZOO_DIR), Namespace::Zoo)?;
        graph.import_category(&root.join(WILD_DIR), Namespace::Wild)?;
        graph.import_category(&root.join(PANDA_DIR), Namespace::Panda)?;
        graph.import_category(&root.join(MEDIA_DIR), Namespace::Media)?;
        Ok(graph)
    }

    fn import_category(&mut self, dir: &Path, ns: Namespace) -> anyhow::Result<()> {
        let files = walk::collect_record_files(dir)?;
        info!(category = %ns, files = files.len(), "Importing records");
        let pb = ProgressBar::new_spinner();

        for (n, path) in files.iter().enumerate() {
            let record = Record::load(path)?;
            record.expect_section(ns.section())?;
            match ns {
                Namespace::Zoo | Namespace::Wild => self.import_site(&record, ns)?,
                Namespace::Panda => self.import_panda(&record)?,
                Namespace::Media => self.import_media(&record)?,
            }
            if n as u64 % PROGRESS_INTERVAL == 0 {
                pb.tick();
            }
        }
        pb.finish_and_clear();

        self.verify_category(ns)?;
        info!(category = %ns, "Category imported and verified");
        Ok(())
    }

    /// Batch checks over the full accumulated graph, run once per category
    fn verify_category(&self, ns: Namespace) -> Result<()> {
        validate::check_duplicate_ids(&self.vertices, ns)?;
        if ns == Namespace::Panda {
            validate::check_litters(&self.vertices, &self.edges)?;
        }
        Ok(())
    }

    /// Import one zoo or wild-range record as a site vertex
    pub fn import_site(&mut self, record: &Record, ns: Namespace) -> Result<()> {
        let id = fields::parse_declared_id(record.require("_id")?, ns, "_id", &record.path)?;
        let mut vertex_fields = BTreeMap::new();

        for (key, value) in record.fields() {
            if key == "_id" {
                continue;
            }
            if value == "unknown" || value == "none" {
                continue;
            }
            if key.contains("name") {
                fields::check_name(value, key, &record.path)?;
            }
            self.observe_photo(record, key)?;
            vertex_fields.insert(key.to_string(), value.to_string());
        }

        self.site_ids.insert(id);
        let vertex = SiteVertex {
            id,
            fields: vertex_fields,
        };
        match ns {
            Namespace::Zoo => {
                self.zoo_count += 1;
                self.vertices.push(Vertex::Zoo(vertex));
            }
            Namespace::Wild => {
                self.wild_count += 1;
                self.vertices.push(Vertex::Wild(vertex));
            }
            _ => unreachable!("sites are zoos or wild ranges"),
        }
        Ok(())
    }

    /// Import one panda record as a vertex plus its outgoing edges.
    ///
    /// Site references (`birthplace`, residence `zoo`/`wild`) must resolve
    /// against already-imported sites; residence references are also
    /// cross-checked against the record's own file path to catch misfiled
    /// records. `children`/`litter` targets may not be imported yet, so
    /// they become edges unresolved and are checked at validation time.
    pub fn import_panda(&mut self, record: &Record) -> Result<()> {
        let id = fields::parse_declared_id(
            record.require("_id")?,
            Namespace::Panda,
            "_id",
            &record.path,
        )?;
        let mut vertex_fields = BTreeMap::new();
        let mut edges = Vec::new();
        let mut birthday = RecordedDate::Unknown;
        let mut death = RecordedDate::Unknown;
        let mut gender = None;

        for (key, value) in record.fields() {
            if key == "_id" {
                continue;
            }
            // Birth and death are recorded whether or not a date is known
            if key.contains("birthday") || key.contains("death") {
                let date = fields::check_date(value, key, &record.path)?;
                if key.contains("birthday") {
                    birthday = date;
                    self.summary.observe_birth(date);
                } else {
                    death = date;
                    self.summary.observe_death(date);
                }
                continue;
            }
            if value == "unknown" || value == "none" {
                continue;
            }
            if key.contains("name") {
                fields::check_name(value, key, &record.path)?;
                vertex_fields.insert(key.to_string(), value.to_string());
            } else if key.contains("gender") {
                gender = Some(fields::check_gender(value, &record.path)?);
            } else if key.contains("birthplace") {
                let site = fields::parse_site_ref(value, key, &record.path)?;
                self.resolve_site(site, &record.path)?;
                edges.push(Edge::new(id, site, key));
            } else if key.contains("children") {
                for child in fields::split_panda_ids(value, key, &record.path)? {
                    edges.push(Edge::new(id, child, FAMILY_LABEL));
                }
            } else if key.contains("litter") {
                for sibling in fields::split_panda_ids(value, key, &record.path)? {
                    edges.push(Edge::new(id, sibling, LITTER_LABEL));
                }
            } else if self.observe_photo(record, key)? {
                vertex_fields.insert(key.to_string(), value.to_string());
            } else if key.contains("wild") {
                let site = fields::parse_wild_ref(value, key, &record.path)?;
                self.resolve_site(site, &record.path)?;
                check_site_path(site, &record.path)?;
                edges.push(Edge::new(id, site, key));
            } else if key.contains("zoo") {
                let site = fields::parse_zoo_ref(value, key, &record.path)?;
                self.resolve_site(site, &record.path)?;
                check_site_path(site, &record.path)?;
                edges.push(Edge::new(id, site, key));
            } else {
                vertex_fields.insert(key.to_string(), value.to_string());
            }
        }

        self.edges.extend(edges);
        self.vertices.push(Vertex::Panda(PandaVertex {
            id,
            birthday,
            death,
            gender,
            fields: vertex_fields,
        }));
        self.panda_count += 1;
        Ok(())
    }

    /// Import one group-media record as a vertex
    pub fn import_media(&mut self, record: &Record) -> Result<()> {
        let id = fields::parse_declared_id(
            record.require("_id")?,
            Namespace::Media,
            "_id",
            &record.path,
        )?;
        let mut vertex_fields = BTreeMap::new();

        for (key, value) in record.fields() {
            if key == "_id" {
                continue;
            }
            if value == "unknown" || value == "none" {
                continue;
            }
            self.observe_photo(record, key)?;
            vertex_fields.insert(key.to_string(), value.to_string());
        }

        self.vertices.push(Vertex::Media(MediaVertex {
            id,
            fields: vertex_fields,
        }));
        self.media_count += 1;
        Ok(())
    }

    /// Tally a photo credit if `key` is an indexed photo field; returns
    /// whether it was one
    fn observe_photo(&mut self, record: &Record, key: &str) -> Result<bool> {
        let Some(index) = fields::photo_index(key) else {
            return Ok(false);
        };
        let author_key = format!("{}.author", key);
        let author = record.get(&author_key).ok_or_else(|| BuildError::Record {
            path: record.path.clone(),
            reason: format!("missing photo credit field: {}", author_key),
        })?;
        self.photo.credit_author(author, index);
        Ok(true)
    }

    fn resolve_site(&self, id: EntityId, path: &Path) -> Result<()> {
        if self.site_ids.contains(&id) {
            Ok(())
        } else {
            Err(BuildError::MissingSite {
                path: path.to_path_buf(),
                id,
            })
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn photo(&self) -> &PhotoTally {
        &self.photo
    }

    pub fn zoo_count(&self) -> usize {
        self.zoo_count
    }

    pub fn wild_count(&self) -> usize {
        self.wild_count
    }

    /// Panda count is the count of panda record files imported
    pub fn panda_count(&self) -> usize {
        self.panda_count
    }

    pub fn media_count(&self) -> usize {
        self.media_count
    }
}

/// A residence site id must appear textually in the per-site directory
/// the record sits in, guarding against misfiled records
fn check_site_path(id: EntityId, path: &Path) -> Result<()> {
    let site_dir = path
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if site_dir.contains(&id.num.to_string()) {
        Ok(())
    } else {
        Err(BuildError::SitePathMismatch {
            path: path.to_path_buf(),
            id,
        })
    }
}
