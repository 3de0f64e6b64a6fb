//! Directory walking
//!
//! Recursive, suffix-filtered traversal used by batch conversion.

use std::fs::Metadata;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ConvertError;

/// Visit every non-directory entry under `root` whose file name ends with
/// `suffix`, in sorted order.
///
/// Entries that can't be read are handed to `on_error` and the walk carries
/// on; `visit` results are never allowed to stop the walk either.
pub fn walk_matching<F, E>(root: &Path, suffix: &str, mut visit: F, mut on_error: E)
where
    F: FnMut(&Path, &Metadata),
    E: FnMut(PathBuf, ConvertError),
{
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                on_error(path, ConvertError::Walk(err));
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }
        if !entry.file_name().to_string_lossy().ends_with(suffix) {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => visit(entry.path(), &metadata),
            Err(err) => on_error(entry.path().to_path_buf(), ConvertError::Walk(err)),
        }
    }
}
