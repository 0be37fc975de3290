//! Publish-mode character inventory for font subsetting.
//!
//! The hosted font service downloads only the glyphs named in the page, so
//! publishing scans every presentation asset for the unique set of
//! characters it contains and substitutes that inventory into the
//! `${vitamins}` placeholder in `index.html`. This has no effect on graph
//! correctness and only runs when publishing a real page.

use crate::config::{VITAMIN_MANIFEST, VITAMIN_PLACEHOLDER, VITAMIN_SEED};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Union of characters across the manifest files, sorted, newlines
/// stripped, prefixed with the fixed HTML-entity seed
pub fn collect_charset(root: &Path, manifest: &[&str]) -> Result<String> {
    let mut chars = BTreeSet::new();
    for rel in manifest {
        let path = root.join(rel);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read presentation asset: {}", path.display()))?;
        chars.extend(text.chars());
    }
    chars.remove(&'\n');
    chars.remove(&'\r');

    let mut inventory = String::from(VITAMIN_SEED);
    inventory.extend(chars);
    Ok(inventory)
}

/// Substitute the inventory for the placeholder in the index page
pub fn inject_charset(index_path: &Path, inventory: &str) -> Result<()> {
    let page = fs::read_to_string(index_path)
        .with_context(|| format!("Failed to read index page: {}", index_path.display()))?;
    let page = page.replace(VITAMIN_PLACEHOLDER, inventory);
    fs::write(index_path, page)
        .with_context(|| format!("Failed to write index page: {}", index_path.display()))?;
    Ok(())
}

/// Full publish step: scan the standard manifest and update index.html
pub fn run_publish(root: &Path) -> Result<()> {
    let inventory = collect_charset(root, VITAMIN_MANIFEST)?;
    inject_charset(&root.join("index.html"), &inventory)?;
    info!(chars = inventory.chars().count(), "Character inventory injected");
    Ok(())
}
