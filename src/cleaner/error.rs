// Error handling for the cleaner
// Two kinds of failure: configuration problems and filesystem I/O

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for sweep
/// Every variant carries the offending path or rule so it can be reported as-is.
/// The underlying I/O error is exposed through `source()`, not repeated in `Display`.
#[derive(Debug)]
pub enum SweepError {
    /// Configuration errors
    ConfigNotFound { path: PathBuf },
    ConfigRead { path: PathBuf, source: io::Error },
    ConfigParse { path: PathBuf, reason: String },
    InvalidRule { index: usize, reason: String },

    /// File system errors
    ReadDir { path: PathBuf, source: io::Error },
    Delete { path: PathBuf, source: io::Error },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            // Configuration errors
            SweepError::ConfigNotFound { path } => {
                writeln!(f, "Config file not found: {}", path.display())?;
                write!(f, "Suggestion: Check the --config path or remove the flag to use the defaults")
            }
            SweepError::ConfigRead { path, .. } => {
                writeln!(f, "Failed to read config {}", path.display())?;
                write!(f, "Suggestion: Check that the config file is readable")
            }
            SweepError::ConfigParse { path, reason } => {
                writeln!(f, "Failed to parse config {}: {}", path.display(), reason)?;
                write!(f, "Suggestion: Each rule is a [[sweep]] table with `folder` and `predicate` keys")
            }
            SweepError::InvalidRule { index, reason } => {
                writeln!(f, "Invalid rule #{}: {}", index + 1, reason)?;
                write!(f, "Suggestion: `folder` must be a plain directory name and `predicate` a non-empty list of file names")
            }

            // File system errors
            SweepError::ReadDir { path, .. } => {
                writeln!(f, "Could not read directory {}", path.display())?;
                write!(f, "Suggestion: Check directory permissions, or whether it was removed during the walk")
            }
            SweepError::Delete { path, .. } => {
                writeln!(f, "Could not delete {}", path.display())?;
                write!(f, "Suggestion: Check permissions on the folder and its contents")
            }
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::ConfigRead { source, .. }
            | SweepError::ReadDir { source, .. }
            | SweepError::Delete { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl SweepError {
    /// True for errors raised while loading or validating configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SweepError::ConfigNotFound { .. }
                | SweepError::ConfigRead { .. }
                | SweepError::ConfigParse { .. }
                | SweepError::InvalidRule { .. }
        )
    }

    /// The path the error is about, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            SweepError::ConfigNotFound { path }
            | SweepError::ConfigRead { path, .. }
            | SweepError::ConfigParse { path, .. }
            | SweepError::ReadDir { path, .. }
            | SweepError::Delete { path, .. } => Some(path.as_path()),
            SweepError::InvalidRule { .. } => None,
        }
    }
}
