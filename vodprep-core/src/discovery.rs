//! Input discovery for batch mode.
//!
//! Scans the top level of a drop directory for recordings eligible for
//! processing. Subdirectories are not searched; a landing directory is flat.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Extensions (case-insensitive) treated as processable recordings.
const PROCESSABLE_EXTENSIONS: &[&str] = &["mp4", "mkv", "mov"];

/// True when the path is a file with a processable video extension.
#[must_use]
pub fn is_processable_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                PROCESSABLE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
}

/// Finds recordings eligible for processing in `input_dir`, sorted by path
/// so batch runs are deterministic.
///
/// Returns [`CoreError::NoFilesFound`] when the directory holds none.
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            is_processable_file(&path).then_some(path)
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }
    files.sort();
    Ok(files)
}
