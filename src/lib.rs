//! Ailurus: red panda lineage dataset builder
//!
//! This crate ingests a tree of keyed text records describing red pandas,
//! the zoos and wild ranges they inhabit, and associated media, and builds
//! a single JSON interchange document for family tree querying:
//!
//! 1. **Import Pass** -- Read each category of records (zoos, wild ranges,
//!    pandas, media) into typed vertices and directed labeled edges, applying
//!    per-field format rules and resolving site references as records arrive
//! 2. **Validation Pass** -- After each category completes, run batch checks
//!    over the accumulated graph (duplicate ids, litter birthday agreement)
//! 3. **Export Pass** -- Serialize the vertex and edge collections plus
//!    summary totals and photo credits to a pretty-printed JSON document
//!
//! # Architecture
//!
//! The pipeline is a strictly single-threaded, fail-fast batch build:
//!
//! - **Ordered imports** -- Sites import before pandas so panda records can
//!   resolve their zoo/wild references; media imports last
//! - **Deterministic traversal** -- Files visit in lexicographic path order,
//!   so a fixed input tree always produces the same output document
//! - **Fail-fast errors** -- The first format or consistency violation aborts
//!   the build before any output is written
//! - **Namespaced ids** -- Each entity kind has its own id space, carried as
//!   an explicit namespace tag rather than a sign convention
//!
//! # Key Modules
//!
//! - [`record`] -- Keyed text record reader (one `[section]` per file)
//! - [`fields`] -- Per-field format rules (dates, names, genders, id lists)
//! - [`model`] -- Core data types (EntityId, Vertex, Edge, Gender)
//! - [`graph`] -- LineageGraph builder and per-category importers
//! - [`walk`] -- Deterministic record-file traversal
//! - [`validate`] -- Batch dataset checks (duplicate ids, litters)
//! - [`export`] -- JSON interchange document writer
//! - [`vitamin`] -- Publish-mode character inventory for font subsetting
//! - [`error`] -- Fatal error taxonomy
//! - [`config`] -- Constants for import and export
//!
//! # Example Usage
//!
//! ```bash
//! # Build the dataset from the current directory
//! ailurus build -i . -o export/redpanda.json
//!
//! # Build and refresh the font-subsetting character inventory
//! ailurus build -i . -o export/redpanda.json --publish
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod fields;
pub mod graph;
pub mod model;
pub mod record;
pub mod validate;
pub mod vitamin;
pub mod walk;
