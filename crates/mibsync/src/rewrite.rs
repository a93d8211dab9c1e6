//! Splice generated definitions back into the MIB file.
//!
//! The managed section runs from the marker line to the end of the module:
//! everything after the marker is replaced by the rendered registry followed
//! by `END`. The file is replaced through a temp file in the same directory
//! and an atomic rename, so an interrupted run leaves the old file intact.

use std::io::Write;
use std::path::Path;

use mibsync_core::types::MARKER_LINE;
use tempfile::NamedTempFile;

use crate::error::Result;

/// What a rewrite did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// `false` when the marker line was not found and the file was left alone.
    pub spliced: bool,
    pub bytes_written: usize,
}

/// Replace everything after the first marker line with `generated` + `END`.
///
/// Returns `None` when `original` has no marker line terminated by `\n`.
pub fn splice(original: &str, generated: &str) -> Option<String> {
    let mut out = String::with_capacity(original.len() + generated.len());

    for line in original.split_inclusive('\n') {
        out.push_str(line);
        if line.strip_suffix('\n') == Some(MARKER_LINE) {
            out.push_str(generated);
            out.push_str("END\n");
            return Some(out);
        }
    }

    None
}

/// Rewrite the MIB at `path` with `generated` spliced after the marker.
pub fn rewrite_file(path: &Path, generated: &str) -> Result<RewriteOutcome> {
    let original = std::fs::read_to_string(path)?;

    let Some(updated) = splice(&original, generated) else {
        tracing::warn!(path = %path.display(), "Marker line not found, MIB left unchanged");
        return Ok(RewriteOutcome {
            spliced: false,
            bytes_written: 0,
        });
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(updated.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::info!(
        path = %path.display(),
        bytes = updated.len(),
        "MIB rewritten"
    );

    Ok(RewriteOutcome {
        spliced: true,
        bytes_written: updated.len(),
    })
}
