// Size estimation for the delete prompt
// Advisory only: counts the files directly inside a folder, nothing deeper

use std::fs;
use std::path::Path;

use tracing::trace;

/// Sum of the sizes of the regular files directly inside `dir`.
/// Subdirectories, symlinks and entries whose metadata can't be read are skipped.
/// A directory that can't be read counts as 0.
pub fn estimate_size(dir: &Path) -> u64 {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            trace!(dir = %dir.display(), error = %e, "size estimate unavailable");
            return 0;
        }
    };

    read_dir
        .filter_map(Result::ok)
        .filter_map(|entry| entry.metadata().ok())
        .filter(|metadata| metadata.is_file())
        .map(|metadata| metadata.len())
        .sum()
}

pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
