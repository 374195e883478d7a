// Exact class name -> file lookup, doubling as the negative-result cache

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A class map value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMapEntry {
    /// Explicit mapping to a file
    File(PathBuf),
    /// Known to be unresolvable; short-circuits the prefix search
    Missing,
}

impl ClassMapEntry {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ClassMapEntry::File(path) => Some(path),
            ClassMapEntry::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ClassMapEntry::Missing)
    }
}

/// Class map owned by a single loader.
///
/// Absence of a key means "not yet queried", which is distinct from
/// [`ClassMapEntry::Missing`].
#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    entries: HashMap<String, ClassMapEntry>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, class_name: &str) -> Option<&ClassMapEntry> {
        self.entries.get(class_name)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.entries.contains_key(class_name)
    }

    /// Merge positive mappings. Later entries win, including over a cached
    /// miss.
    pub fn merge<I, K, P>(&mut self, mapping: I)
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<PathBuf>,
    {
        for (class_name, path) in mapping {
            self.entries
                .insert(class_name.into(), ClassMapEntry::File(path.into()));
        }
    }

    pub fn mark_missing(&mut self, class_name: &str) {
        self.entries
            .insert(class_name.to_string(), ClassMapEntry::Missing);
    }

    /// Drop cached misses, either for one class or all of them.
    /// Returns how many entries were removed.
    pub fn clear_missing(&mut self, class_name: Option<&str>) -> usize {
        match class_name {
            Some(name) => {
                if self.entries.get(name).is_some_and(ClassMapEntry::is_missing) {
                    self.entries.remove(name);
                    1
                } else {
                    0
                }
            }
            None => {
                let before = self.entries.len();
                self.entries.retain(|_, entry| !entry.is_missing());
                before - self.entries.len()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassMapEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }
}
