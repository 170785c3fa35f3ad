//! Rule configuration.
//!
//! Rules live in a TOML file as an array of `[[sweep]]` tables:
//!
//! ```toml
//! [[sweep]]
//! folder = "node_modules"
//! predicate = ["package.json"]
//! ```
//!
//! Lookup order is an explicit `--config` path, then `.sweep.toml` in the
//! directory being swept, then `sweep/config.toml` under the user config
//! directory. With none of those present the built-in defaults apply.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::error::SweepError;
use super::patterns::{default_predicates, Predicate};

pub const PROJECT_CONFIG_NAME: &str = ".sweep.toml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    sweep: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    folder: String,
    predicate: Vec<String>,
}

/// Where the active rules came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub predicates: Vec<Predicate>,
    pub source: ConfigSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            predicates: default_predicates(),
            source: ConfigSource::Default,
        }
    }
}

impl Config {
    /// Parse rule definitions. `path` is only used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<Self, SweepError> {
        let raw: RawConfig = toml::from_str(content).map_err(|e| SweepError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if raw.sweep.is_empty() {
            warn!(path = %path.display(), "config defines no rules, nothing will be matched");
        }

        let predicates = raw
            .sweep
            .into_iter()
            .enumerate()
            .map(|(index, rule)| -> Result<Predicate, SweepError> {
                validate_rule(index, &rule)?;
                Ok(Predicate::any_of(rule.folder, rule.predicate))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            predicates,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, SweepError> {
        let content = fs::read_to_string(path).map_err(|source| SweepError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Resolve the configuration for a sweep of `root`.
    ///
    /// An explicit path must exist. Otherwise the first existing file among
    /// [`default_locations`] is used, falling back to the built-in rules.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self, SweepError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(SweepError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::from_file(path);
        }

        Self::load_first(&default_locations(root))
    }

    /// Load the first of `candidates` that exists, or the defaults.
    pub fn load_first(candidates: &[PathBuf]) -> Result<Self, SweepError> {
        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::from_file(path)
            }
            None => {
                debug!("no config file found, using built-in rules");
                Ok(Self::default())
            }
        }
    }
}

/// Config files consulted, in order, when no path is given explicitly.
pub fn default_locations(root: &Path) -> Vec<PathBuf> {
    let mut locations = vec![root.join(PROJECT_CONFIG_NAME)];
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("sweep").join("config.toml"));
    }
    locations
}

fn validate_rule(index: usize, rule: &RawRule) -> Result<(), SweepError> {
    let invalid = |reason: &str| SweepError::InvalidRule {
        index,
        reason: reason.to_string(),
    };

    let folder = rule.folder.as_str();
    if folder.is_empty() {
        return Err(invalid("`folder` is empty"));
    }
    if folder == "." || folder == ".." || folder.contains(&['/', '\\'][..]) {
        return Err(invalid(&format!("`folder` must be a single directory name, got {folder:?}")));
    }
    if rule.predicate.is_empty() {
        return Err(invalid(&format!("`predicate` for {folder:?} lists no trigger files")));
    }
    if rule.predicate.iter().any(|name| name.is_empty()) {
        return Err(invalid(&format!("`predicate` for {folder:?} contains an empty name")));
    }

    Ok(())
}
