// Candidate removal
// Directories go recursively; symlinks and plain files are unlinked, never followed

use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use super::error::SweepError;

pub struct Deleter {
    dry_run: bool,
}

impl Deleter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Remove `path`: recursively for a directory, just the link or file
    /// otherwise. In dry-run mode nothing is touched.
    pub fn delete(&self, path: &Path) -> Result<(), SweepError> {
        if self.dry_run {
            info!(path = %path.display(), "dry run, not deleting");
            return Ok(());
        }

        let delete_err = |source: io::Error| SweepError::Delete {
            path: path.to_path_buf(),
            source,
        };

        if fs::symlink_metadata(path).map_err(delete_err)?.is_dir() {
            fs::remove_dir_all(path).map_err(delete_err)?;
        } else {
            fs::remove_file(path).map_err(delete_err)?;
        }
        info!(path = %path.display(), "deleted");
        Ok(())
    }
}
