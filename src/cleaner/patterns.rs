//! Trigger/target rules.
//!
//! A [`Predicate`] pairs a trigger (which file names activate it) with the
//! name of the folder it targets. The walker evaluates predicates in list
//! order, so the order of a predicate set is also the yield order inside a
//! single directory.

use std::collections::BTreeSet;
use std::fmt;

/// Names excluded at every level of a walk unless the caller says otherwise.
pub const DEFAULT_IGNORE: &[&str] = &[".git", ".hg", ".svn"];

/// Decides whether a directory entry name activates a predicate.
#[derive(Clone)]
pub enum Trigger {
    /// Matches when the entry name is one of these.
    AnyOf(BTreeSet<String>),
    /// Matches when the function returns true.
    Func(fn(&str) -> bool),
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Trigger::AnyOf(names) => f.debug_tuple("AnyOf").field(names).finish(),
            Trigger::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl Trigger {
    pub fn any_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Trigger::AnyOf(names.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Trigger::AnyOf(names) => names.contains(name),
            Trigger::Func(f) => f(name),
        }
    }
}

/// One "trigger file -> target folder" rule.
#[derive(Debug, Clone)]
pub struct Predicate {
    pub trigger: Trigger,
    pub folder: String,
}

impl Predicate {
    pub fn new(folder: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            trigger,
            folder: folder.into(),
        }
    }

    /// Shorthand for a rule triggered by any of the given file names.
    pub fn any_of<I, S>(folder: impl Into<String>, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(folder, Trigger::any_of(triggers))
    }
}

/// The rules used when no configuration file is found.
pub fn default_predicates() -> Vec<Predicate> {
    vec![
        Predicate::any_of("node_modules", ["package.json"]),
        Predicate::any_of("target", ["Cargo.toml"]),
    ]
}

pub fn default_ignore() -> BTreeSet<String> {
    DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect()
}
