use std::path::{Path, PathBuf};

use crate::error::Result;

/// List the files in `dir` whose extension matches `extension`
/// (case-insensitive, without the dot), sorted by filename ascending.
///
/// Subdirectories are ignored; nothing is recursed into.
pub fn list_spectrum_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!("{} .{extension} files in {}", files.len(), dir.display());
    Ok(files)
}
