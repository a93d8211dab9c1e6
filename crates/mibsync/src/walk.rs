//! Alert file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Recursively collect files under `root` with the given extension.
///
/// Paths are sorted so trap OIDs are assigned in a stable order across
/// runs and platforms.
pub fn find_alert_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(extension)
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));

    tracing::debug!(root = %root.display(), count = files.len(), "Alert files discovered");

    Ok(files)
}
