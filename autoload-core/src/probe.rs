// File existence probes used as the terminal test for every candidate path

use std::cell::Cell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Answers "does this path exist as a file".
///
/// The loader never reads file contents; loading a resolved file is up to the
/// caller.
pub trait FileProbe {
    fn is_file(&self, path: &Path) -> bool;
}

/// Probe backed by the local filesystem. Blocking, no retry.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileProbe;

impl FileProbe for OsFileProbe {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory probe for virtual filesystems.
///
/// Counts every probe so callers can check how much filesystem traffic a
/// resolution caused.
#[derive(Debug, Default)]
pub struct MemoryProbe {
    files: HashSet<PathBuf>,
    probes: Cell<usize>,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a probe that knows the given files
    pub fn with_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            probes: Cell::new(0),
        }
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>) {
        self.files.insert(path.into());
    }

    pub fn remove(&mut self, path: &Path) -> bool {
        self.files.remove(path)
    }

    /// Number of probes answered so far
    pub fn probe_count(&self) -> usize {
        self.probes.get()
    }

    pub fn reset_count(&self) {
        self.probes.set(0);
    }
}

impl FileProbe for MemoryProbe {
    fn is_file(&self, path: &Path) -> bool {
        self.probes.set(self.probes.get() + 1);
        self.files.contains(path)
    }
}

impl<T: FileProbe + ?Sized> FileProbe for &T {
    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }
}

impl<T: FileProbe + ?Sized> FileProbe for Box<T> {
    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }
}
