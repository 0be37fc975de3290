use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Collect every `.txt` record file under a category directory, in
/// lexicographic path order.
///
/// Zoo and wild records sit one directory down (grouped by region), panda
/// records two down (grouped by region, then by site), so the walk recurses
/// without a fixed depth and sorts the full path list at the end. A missing
/// category directory yields an empty list rather than an error, so sparse
/// datasets still build.
pub fn collect_record_files(category_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if category_dir.is_dir() {
        visit(category_dir, &mut files)?;
    }
    files.sort();
    Ok(files)
}

fn visit(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in: {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            visit(&path, files)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        {
            files.push(path);
        }
    }
    Ok(())
}
