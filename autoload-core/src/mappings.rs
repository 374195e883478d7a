// Autoload mappings - bulk input for a loader (autoload.json)

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::NAMESPACE_SEPARATOR;

/// One directory or a list of directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathList {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl PathList {
    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.iter().cloned().collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        match self {
            PathList::One(path) => std::slice::from_ref(path).iter(),
            PathList::Many(paths) => paths.iter(),
        }
    }

    pub fn extend(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        let mut all = self.to_vec();
        all.extend(paths);
        *self = PathList::Many(all);
    }

    fn map_paths(&mut self, f: impl Fn(&Path) -> PathBuf) {
        match self {
            PathList::One(path) => *path = f(path.as_path()),
            PathList::Many(paths) => {
                for path in paths.iter_mut() {
                    *path = f(path.as_path());
                }
            }
        }
    }
}

impl From<Vec<PathBuf>> for PathList {
    fn from(paths: Vec<PathBuf>) -> Self {
        PathList::Many(paths)
    }
}

impl From<PathBuf> for PathList {
    fn from(path: PathBuf) -> Self {
        PathList::One(path)
    }
}

/// The three mapping tables plus the files to load eagerly.
///
/// ```json
/// {
///   "namespaces": { "Twig_": "vendor/twig/lib" },
///   "psr4": { "App\\": ["src", "lib"] },
///   "classmap": { "Kernel": "app/Kernel.php" },
///   "files": ["src/helpers.php"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoloadMappings {
    /// PSR-0 prefix -> directories (empty prefix = fallback)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub namespaces: IndexMap<String, PathList>,

    /// PSR-4 prefix -> directories (empty prefix = fallback)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub psr4: IndexMap<String, PathList>,

    /// Exact class name -> file
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub classmap: IndexMap<String, PathBuf>,

    /// Files the host loads unconditionally at startup
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<PathBuf>,
}

impl AutoloadMappings {
    /// Parse a mapping file. Relative paths are resolved against the
    /// directory containing it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut mappings = Self::from_str(&content)
            .with_context(|| format!("Invalid mapping file {}", path.display()))?;

        if let Some(base) = path.parent() {
            mappings.rebase(base);
        }
        Ok(mappings)
    }

    /// Parse mappings from a JSON string
    pub fn from_str(content: &str) -> Result<Self> {
        let mappings: AutoloadMappings =
            serde_json::from_str(content).context("Failed to parse autoload mappings")?;

        mappings.validate()?;
        Ok(mappings)
    }

    /// Write mappings as pretty JSON
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_json()?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize autoload mappings")
    }

    fn validate(&self) -> Result<()> {
        for prefix in self.psr4.keys() {
            if !prefix.is_empty() && !prefix.ends_with(NAMESPACE_SEPARATOR) {
                anyhow::bail!(
                    "PSR-4 prefix {:?} must end with a namespace separator",
                    prefix
                );
            }
        }
        Ok(())
    }

    /// Append PSR-4 directories to a prefix
    pub fn add_psr4(&mut self, prefix: &str, dirs: impl IntoIterator<Item = PathBuf>) {
        append(&mut self.psr4, prefix, dirs);
    }

    /// Append PSR-0 directories to a prefix
    pub fn add_namespace(&mut self, prefix: &str, dirs: impl IntoIterator<Item = PathBuf>) {
        append(&mut self.namespaces, prefix, dirs);
    }

    /// Make every relative path absolute against `base`
    pub fn rebase(&mut self, base: &Path) {
        let join = |path: &Path| {
            if path.is_relative() {
                base.join(path)
            } else {
                path.to_path_buf()
            }
        };

        for dirs in self.namespaces.values_mut().chain(self.psr4.values_mut()) {
            dirs.map_paths(join);
        }
        for file in self.classmap.values_mut().chain(self.files.iter_mut()) {
            *file = join(file.as_path());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
            && self.psr4.is_empty()
            && self.classmap.is_empty()
            && self.files.is_empty()
    }
}

fn append(
    table: &mut IndexMap<String, PathList>,
    prefix: &str,
    dirs: impl IntoIterator<Item = PathBuf>,
) {
    match table.get_mut(prefix) {
        Some(existing) => existing.extend(dirs),
        None => {
            table.insert(prefix.to_string(), PathList::Many(dirs.into_iter().collect()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mappings() {
        let json = r#"{
            "namespaces": { "Twig_": "/vendor/twig/lib" },
            "psr4": {
                "App\\": ["/src", "/lib"],
                "": "/fallback"
            },
            "classmap": { "Kernel": "/app/Kernel.php" },
            "files": ["/src/helpers.php"]
        }"#;

        let mappings = AutoloadMappings::from_str(json).unwrap();
        assert_eq!(
            mappings.namespaces["Twig_"],
            PathList::One(PathBuf::from("/vendor/twig/lib"))
        );
        assert_eq!(
            mappings.psr4["App\\"].to_vec(),
            vec![PathBuf::from("/src"), PathBuf::from("/lib")]
        );
        let keys: Vec<&str> = mappings.psr4.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["App\\", ""]);
        assert_eq!(mappings.files, vec![PathBuf::from("/src/helpers.php")]);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let mappings = AutoloadMappings::from_str("{}").unwrap();
        assert!(mappings.is_empty());
    }

    #[test]
    fn test_invalid_psr4_prefix_rejected() {
        let err = AutoloadMappings::from_str(r#"{ "psr4": { "App": "/src" } }"#).unwrap_err();
        assert!(err.to_string().contains("namespace separator"));
    }

    #[test]
    fn test_append_merges_dirs() {
        let mut mappings = AutoloadMappings::default();
        mappings.add_psr4("App\\", vec![PathBuf::from("/a")]);
        mappings.add_psr4("App\\", vec![PathBuf::from("/b")]);

        assert_eq!(
            mappings.psr4["App\\"].to_vec(),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn test_file_paths_are_rebased() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let file = tmp.path().join("autoload.json");
        std::fs::write(
            &file,
            r#"{ "psr4": { "App\\": "src" }, "classmap": { "Abs": "/abs/Abs.php" } }"#,
        )
        .expect("wrote mapping file");

        let mappings = AutoloadMappings::from_file(&file).unwrap();
        assert_eq!(mappings.psr4["App\\"].to_vec(), vec![tmp.path().join("src")]);
        assert_eq!(mappings.classmap["Abs"], PathBuf::from("/abs/Abs.php"));
    }

    #[test]
    fn test_round_trip_through_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let file = tmp.path().join("autoload.json");

        let mut mappings = AutoloadMappings::default();
        mappings.add_namespace("Legacy_", vec![tmp.path().join("legacy")]);
        mappings.to_file(&file).unwrap();

        assert_eq!(AutoloadMappings::from_file(&file).unwrap(), mappings);
    }
}
