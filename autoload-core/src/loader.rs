// Class loader - resolves class names to files using PSR-0, PSR-4 and a class map

use crate::chain::{AutoloadChain, ClassResolver, SharedResolver};
use crate::class_map::ClassMap;
use crate::error::{ChainError, ConfigError};
use crate::mappings::AutoloadMappings;
use crate::paths::{
    logical_path_psr0, logical_path_psr4, normalize_class_name, IntoDirs, NAMESPACE_SEPARATOR,
};
use crate::probe::{FileProbe, OsFileProbe};
use indexmap::IndexMap;
use log::{debug, trace};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Extension appended to every logical path
pub const DEFAULT_EXTENSION: &str = ".php";

/// Extension tried after the primary one when running under HHVM
pub const HACK_EXTENSION: &str = ".hh";

/// PSR-0 / PSR-4 class loader.
///
/// Lookup order, first existing file wins:
/// 1. class map (no filesystem access, may hold a cached miss)
/// 2. PSR-4 prefixes sharing the class's first character, in registration order
/// 3. PSR-4 fallback directories
/// 4. PSR-0 prefixes sharing the class's first character, in registration order
/// 5. PSR-0 fallback directories
/// 6. include path, when enabled
///
/// Prefixes are matched in the order they were registered, not longest
/// first. A miss is cached in the class map; hits are not.
///
/// # Example
/// ```
/// use autoload_core::{ClassLoader, MemoryProbe};
/// use std::path::Path;
///
/// let probe = MemoryProbe::with_files(["/src/Http/Request.php"]);
/// let mut loader = ClassLoader::with_probe(probe);
/// loader.add_psr4("App\\", "/src", false).unwrap();
///
/// let file = loader.find_file("App\\Http\\Request");
/// assert_eq!(file.as_deref(), Some(Path::new("/src/Http/Request.php")));
/// assert_eq!(loader.find_file("App\\Missing"), None);
/// ```
#[derive(Debug)]
pub struct ClassLoader<F = OsFileProbe> {
    /// first char -> prefix -> prefix length in bytes
    prefix_lengths_psr4: HashMap<char, IndexMap<String, usize>>,
    prefix_dirs_psr4: IndexMap<String, Vec<PathBuf>>,
    fallback_dirs_psr4: Vec<PathBuf>,

    /// first char -> prefix -> directories
    prefixes_psr0: IndexMap<char, IndexMap<String, Vec<PathBuf>>>,
    fallback_dirs_psr0: Vec<PathBuf>,

    class_map: ClassMap,

    use_include_path: bool,
    include_path: Vec<PathBuf>,

    extension: String,
    alternate_extension: Option<String>,

    probe: F,
}

impl ClassLoader {
    /// Create an empty loader probing the local filesystem
    pub fn new() -> Self {
        Self::with_probe(OsFileProbe)
    }

    /// Build a loader from bulk mappings.
    ///
    /// Namespace (PSR-0) and PSR-4 entries replace whatever the prefix held,
    /// class map entries are merged.
    pub fn from_mappings(mappings: &AutoloadMappings) -> Result<Self, ConfigError> {
        let mut loader = Self::new();
        loader.apply_mappings(mappings)?;
        Ok(loader)
    }
}

impl Default for ClassLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileProbe> ClassLoader<F> {
    /// Create an empty loader with a custom file probe
    pub fn with_probe(probe: F) -> Self {
        Self {
            prefix_lengths_psr4: HashMap::new(),
            prefix_dirs_psr4: IndexMap::new(),
            fallback_dirs_psr4: Vec::new(),
            prefixes_psr0: IndexMap::new(),
            fallback_dirs_psr0: Vec::new(),
            class_map: ClassMap::new(),
            use_include_path: false,
            include_path: Vec::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            alternate_extension: None,
            probe,
        }
    }

    /// Apply bulk mappings, see [`ClassLoader::from_mappings`]
    pub fn apply_mappings(&mut self, mappings: &AutoloadMappings) -> Result<(), ConfigError> {
        for (prefix, dirs) in &mappings.namespaces {
            self.set(prefix, dirs.to_vec());
        }
        for (prefix, dirs) in &mappings.psr4 {
            self.set_psr4(prefix, dirs.to_vec())?;
        }
        if !mappings.classmap.is_empty() {
            self.add_class_map(mappings.classmap.clone());
        }

        debug!(
            "Applied {} PSR-0, {} PSR-4 and {} class map entries",
            mappings.namespaces.len(),
            mappings.psr4.len(),
            mappings.classmap.len()
        );
        Ok(())
    }

    /// PSR-0 prefixes flattened across first-character buckets
    pub fn prefixes(&self) -> IndexMap<String, Vec<PathBuf>> {
        self.prefixes_psr0
            .values()
            .flat_map(|bucket| bucket.iter())
            .map(|(prefix, dirs)| (prefix.clone(), dirs.clone()))
            .collect()
    }

    pub fn prefixes_psr4(&self) -> &IndexMap<String, Vec<PathBuf>> {
        &self.prefix_dirs_psr4
    }

    pub fn fallback_dirs(&self) -> &[PathBuf] {
        &self.fallback_dirs_psr0
    }

    pub fn fallback_dirs_psr4(&self) -> &[PathBuf] {
        &self.fallback_dirs_psr4
    }

    pub fn class_map(&self) -> &ClassMap {
        &self.class_map
    }

    /// Merge class name -> file mappings. Later entries win, including over
    /// cached misses.
    pub fn add_class_map<I, K, P>(&mut self, class_map: I)
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<PathBuf>,
    {
        self.class_map.merge(class_map);
    }

    /// Register PSR-0 directories for a prefix, merging with existing ones.
    ///
    /// An empty prefix targets the PSR-0 fallback directories.
    pub fn add(&mut self, prefix: &str, paths: impl IntoDirs, prepend: bool) {
        let paths = paths.into_dirs();

        let Some(first_char) = prefix.chars().next() else {
            merge_dirs(&mut self.fallback_dirs_psr0, paths, prepend);
            return;
        };

        let bucket = self.prefixes_psr0.entry(first_char).or_default();
        match bucket.get_mut(prefix) {
            Some(dirs) => merge_dirs(dirs, paths, prepend),
            None => {
                bucket.insert(prefix.to_string(), paths);
            }
        }
    }

    /// Register PSR-4 directories for a namespace prefix, merging with
    /// existing ones.
    ///
    /// An empty prefix targets the PSR-4 fallback directories.
    ///
    /// # Errors
    /// [`ConfigError::InvalidPsr4Prefix`] if a new, non-empty prefix does not
    /// end with `\`. Nothing is modified in that case.
    pub fn add_psr4(
        &mut self,
        prefix: &str,
        paths: impl IntoDirs,
        prepend: bool,
    ) -> Result<(), ConfigError> {
        let paths = paths.into_dirs();

        if prefix.is_empty() {
            merge_dirs(&mut self.fallback_dirs_psr4, paths, prepend);
            return Ok(());
        }

        if let Some(dirs) = self.prefix_dirs_psr4.get_mut(prefix) {
            merge_dirs(dirs, paths, prepend);
            return Ok(());
        }

        self.insert_psr4(prefix, paths)
    }

    /// Replace the PSR-0 directories of a prefix (or the fallback
    /// directories for an empty prefix)
    pub fn set(&mut self, prefix: &str, paths: impl IntoDirs) {
        let paths = paths.into_dirs();

        match prefix.chars().next() {
            Some(first_char) => {
                self.prefixes_psr0
                    .entry(first_char)
                    .or_default()
                    .insert(prefix.to_string(), paths);
            }
            None => self.fallback_dirs_psr0 = paths,
        }
    }

    /// Replace the PSR-4 directories of a prefix (or the fallback
    /// directories for an empty prefix)
    ///
    /// # Errors
    /// [`ConfigError::InvalidPsr4Prefix`] if a non-empty prefix does not end
    /// with `\`.
    pub fn set_psr4(&mut self, prefix: &str, paths: impl IntoDirs) -> Result<(), ConfigError> {
        let paths = paths.into_dirs();

        if prefix.is_empty() {
            self.fallback_dirs_psr4 = paths;
            return Ok(());
        }

        self.insert_psr4(prefix, paths)
    }

    fn insert_psr4(&mut self, prefix: &str, paths: Vec<PathBuf>) -> Result<(), ConfigError> {
        let first_char = psr4_first_char(prefix)?;

        self.prefix_lengths_psr4
            .entry(first_char)
            .or_default()
            .insert(prefix.to_string(), prefix.len());
        self.prefix_dirs_psr4.insert(prefix.to_string(), paths);
        Ok(())
    }

    /// Toggle probing of the include path as the last resort
    pub fn set_use_include_path(&mut self, use_include_path: bool) {
        self.use_include_path = use_include_path;
    }

    pub fn use_include_path(&self) -> bool {
        self.use_include_path
    }

    /// Directories searched with the PSR-0 logical path when the include
    /// path is enabled
    pub fn set_include_path(&mut self, dirs: impl IntoDirs) {
        self.include_path = dirs.into_dirs();
    }

    pub fn include_path(&self) -> &[PathBuf] {
        &self.include_path
    }

    pub fn set_extension(&mut self, ext: impl Into<String>) {
        self.extension = ext.into();
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Extension retried when the primary one finds nothing, e.g.
    /// [`HACK_EXTENSION`]
    pub fn set_alternate_extension(&mut self, ext: Option<String>) {
        self.alternate_extension = ext;
    }

    pub fn alternate_extension(&self) -> Option<&str> {
        self.alternate_extension.as_deref()
    }

    pub fn probe(&self) -> &F {
        &self.probe
    }

    /// Forget cached misses for one class, or for every class when `None`.
    /// Returns the number of entries dropped.
    pub fn clear_negative_cache(&mut self, class_name: Option<&str>) -> usize {
        self.class_map
            .clear_missing(class_name.map(normalize_class_name))
    }

    /// Find the file defining `class_name`.
    ///
    /// Returns `None` when no candidate exists. Misses are cached in the
    /// class map, so a second lookup of the same class does not touch the
    /// filesystem until [`ClassLoader::clear_negative_cache`] or
    /// [`ClassLoader::add_class_map`] changes that entry.
    pub fn find_file(&mut self, class_name: &str) -> Option<PathBuf> {
        let class_name = normalize_class_name(class_name);

        if let Some(entry) = self.class_map.get(class_name) {
            trace!("Class map hit for {}", class_name);
            return entry.path().map(Path::to_path_buf);
        }

        if let Some(file) = self.find_file_with_extension(class_name, &self.extension) {
            return Some(file);
        }

        if let Some(ext) = &self.alternate_extension {
            if let Some(file) = self.find_file_with_extension(class_name, ext) {
                return Some(file);
            }
        }

        debug!("No file found for class {}, caching miss", class_name);
        self.class_map.mark_missing(class_name);
        None
    }

    fn find_file_with_extension(&self, class_name: &str, ext: &str) -> Option<PathBuf> {
        let logical_psr4 = logical_path_psr4(class_name, ext);
        let first_char = class_name.chars().next();

        // PSR-4 lookup
        if let Some(prefixes) = first_char.and_then(|c| self.prefix_lengths_psr4.get(&c)) {
            for (prefix, &length) in prefixes {
                if !class_name.starts_with(prefix.as_str()) {
                    continue;
                }
                let (Some(dirs), Some(relative)) = (
                    self.prefix_dirs_psr4.get(prefix),
                    logical_psr4.get(length..),
                ) else {
                    continue;
                };
                if let Some(file) = self.first_existing(dirs, relative) {
                    return Some(file);
                }
            }
        }

        // PSR-4 fallback dirs
        if let Some(file) = self.first_existing(&self.fallback_dirs_psr4, &logical_psr4) {
            return Some(file);
        }

        // PSR-0 lookup
        let logical_psr0 = logical_path_psr0(class_name, &logical_psr4, ext);

        if let Some(prefixes) = first_char.and_then(|c| self.prefixes_psr0.get(&c)) {
            for (prefix, dirs) in prefixes {
                if !class_name.starts_with(prefix.as_str()) {
                    continue;
                }
                if let Some(file) = self.first_existing(dirs, &logical_psr0) {
                    return Some(file);
                }
            }
        }

        // PSR-0 fallback dirs
        if let Some(file) = self.first_existing(&self.fallback_dirs_psr0, &logical_psr0) {
            return Some(file);
        }

        // PSR-0 include path
        if self.use_include_path {
            return self.first_existing(&self.include_path, &logical_psr0);
        }

        None
    }

    fn first_existing(&self, dirs: &[PathBuf], relative: &str) -> Option<PathBuf> {
        dirs.iter().map(|dir| dir.join(relative)).find(|file| {
            let found = self.probe.is_file(file);
            trace!("Probe {} -> {}", file.display(), found);
            found
        })
    }
}

impl<F: FileProbe + 'static> ClassLoader<F> {
    /// Add a shared loader to a resolver chain. Returns `false` if it was
    /// already registered.
    pub fn register(
        loader: &Rc<RefCell<Self>>,
        chain: &mut AutoloadChain,
        prepend: bool,
    ) -> bool {
        let resolver: SharedResolver = loader.clone();
        chain.register(resolver, prepend)
    }

    /// Remove a shared loader from a resolver chain
    pub fn unregister(
        loader: &Rc<RefCell<Self>>,
        chain: &mut AutoloadChain,
    ) -> Result<(), ChainError> {
        let resolver: SharedResolver = loader.clone();
        chain.unregister(&resolver)
    }
}

impl<F: FileProbe> ClassResolver for ClassLoader<F> {
    fn resolve(&mut self, class_name: &str) -> Option<PathBuf> {
        self.find_file(class_name)
    }
}

/// Validate a non-empty PSR-4 prefix and return its first character
fn psr4_first_char(prefix: &str) -> Result<char, ConfigError> {
    match prefix.chars().next() {
        Some(first_char) if prefix.ends_with(NAMESPACE_SEPARATOR) => Ok(first_char),
        _ => Err(ConfigError::InvalidPsr4Prefix {
            prefix: prefix.to_string(),
        }),
    }
}

fn merge_dirs(existing: &mut Vec<PathBuf>, paths: Vec<PathBuf>, prepend: bool) {
    if prepend {
        let tail = std::mem::replace(existing, paths);
        existing.extend(tail);
    } else {
        existing.extend(paths);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_map::ClassMapEntry;
    use crate::probe::MemoryProbe;

    fn p(path: &str) -> PathBuf {
        PathBuf::from(path)
    }

    fn native(path: &str) -> PathBuf {
        PathBuf::from(path.replace('/', std::path::MAIN_SEPARATOR_STR))
    }

    fn loader_with(files: &[&str]) -> ClassLoader<MemoryProbe> {
        ClassLoader::with_probe(MemoryProbe::with_files(files.iter().map(|f| native(f))))
    }

    #[test]
    fn test_psr4_prepend_and_set_order() {
        let mut loader = loader_with(&[]);
        loader.add_psr4("Foo\\", "/a", false).unwrap();
        loader.add_psr4("Foo\\", "/b", true).unwrap();
        assert_eq!(loader.prefixes_psr4()["Foo\\"], vec![p("/b"), p("/a")]);

        loader.add_psr4("Foo\\", vec!["/c", "/d"], false).unwrap();
        assert_eq!(
            loader.prefixes_psr4()["Foo\\"],
            vec![p("/b"), p("/a"), p("/c"), p("/d")]
        );

        loader.set_psr4("Foo\\", "/c").unwrap();
        assert_eq!(loader.prefixes_psr4()["Foo\\"], vec![p("/c")]);
    }

    #[test]
    fn test_invalid_psr4_prefix_does_not_mutate() {
        let mut loader = loader_with(&[]);
        let err = loader.add_psr4("Foo", "/a", false).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPsr4Prefix {
                prefix: "Foo".to_string()
            }
        );
        assert!(loader.prefixes_psr4().is_empty());
        assert!(loader.prefix_lengths_psr4.is_empty());
        assert!(loader.fallback_dirs_psr4().is_empty());

        assert!(loader.set_psr4("Foo", "/a").is_err());
        assert!(loader.prefixes_psr4().is_empty());
    }

    #[test]
    fn test_empty_prefix_targets_fallback() {
        let mut loader = loader_with(&[]);
        loader.add_psr4("", "/a", false).unwrap();
        loader.add_psr4("", "/b", true).unwrap();
        assert_eq!(loader.fallback_dirs_psr4(), &[p("/b"), p("/a")]);

        loader.set_psr4("", vec!["/z"]).unwrap();
        assert_eq!(loader.fallback_dirs_psr4(), &[p("/z")]);

        loader.add("", "/lib", false);
        loader.add("", "/vendor", true);
        assert_eq!(loader.fallback_dirs(), &[p("/vendor"), p("/lib")]);

        loader.set("", "/only");
        assert_eq!(loader.fallback_dirs(), &[p("/only")]);
    }

    #[test]
    fn test_psr0_prefixes_are_flattened_in_order() {
        let mut loader = loader_with(&[]);
        loader.add("Twig_", "/twig", false);
        loader.add("Monolog\\", "/monolog", false);
        loader.add("Twig_", "/twig2", true);
        loader.set("Symfony\\", "/symfony");

        let prefixes = loader.prefixes();
        let keys: Vec<&str> = prefixes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Twig_", "Monolog\\", "Symfony\\"]);
        assert_eq!(prefixes["Twig_"], vec![p("/twig2"), p("/twig")]);
    }

    #[test]
    fn test_psr4_resolution() {
        let mut loader = loader_with(&["/src/Http/Request.php"]);
        loader.add_psr4("App\\", "/src", false).unwrap();

        assert_eq!(
            loader.find_file("App\\Http\\Request"),
            Some(native("/src/Http/Request.php"))
        );
        // Leading separators are ignored
        assert_eq!(
            loader.find_file("\\App\\Http\\Request"),
            Some(native("/src/Http/Request.php"))
        );
    }

    #[test]
    fn test_psr4_directories_searched_in_order() {
        let mut loader = loader_with(&["/a/Foo.php", "/b/Foo.php"]);
        loader.add_psr4("Ns\\", vec!["/b", "/a"], false).unwrap();
        assert_eq!(loader.find_file("Ns\\Foo"), Some(native("/b/Foo.php")));
    }

    #[test]
    fn test_psr4_fallback() {
        let mut loader = loader_with(&["/fallback/Some/Thing.php"]);
        loader.add_psr4("Other\\", "/other", false).unwrap();
        loader.add_psr4("", "/fallback", false).unwrap();

        assert_eq!(
            loader.find_file("Some\\Thing"),
            Some(native("/fallback/Some/Thing.php"))
        );
    }

    #[test]
    fn test_psr0_legacy_underscores() {
        let mut loader = loader_with(&["/lib/Foo/Bar/Baz.php"]);
        loader.add("", "/lib", false);

        assert_eq!(
            loader.find_file("Foo_Bar_Baz"),
            Some(native("/lib/Foo/Bar/Baz.php"))
        );
    }

    #[test]
    fn test_psr0_namespaced_class_part() {
        let mut loader = loader_with(&["/vendor/Foo/Bar/Baz.php"]);
        loader.add("Foo\\", "/vendor", false);

        let file = loader.find_file("Foo\\Bar_Baz").unwrap();
        assert!(file.ends_with("Foo/Bar/Baz.php"));
        assert_eq!(file, native("/vendor/Foo/Bar/Baz.php"));
    }

    #[test]
    fn test_psr4_wins_over_psr0() {
        let mut loader = loader_with(&["/psr4/Bar.php", "/psr0/Foo/Bar.php"]);
        loader.add("Foo\\", "/psr0", false);
        loader.add_psr4("Foo\\", "/psr4", false).unwrap();

        assert_eq!(loader.find_file("Foo\\Bar"), Some(native("/psr4/Bar.php")));
    }

    #[test]
    fn test_prefix_must_match_textually() {
        // Same first character, not a prefix of the class
        let mut loader = loader_with(&["/foobar/Baz.php", "/foo/Baz.php"]);
        loader.add_psr4("FooBar\\", "/foobar", false).unwrap();
        loader.add_psr4("Foo\\", "/foo", false).unwrap();

        assert_eq!(loader.find_file("Foo\\Baz"), Some(native("/foo/Baz.php")));
    }

    #[test]
    fn test_registration_order_beats_specificity() {
        let mut loader = loader_with(&["/p1/C.php", "/p2/B/C.php"]);
        loader.add_psr4("A\\", "/p2", false).unwrap();
        loader.add_psr4("A\\B\\", "/p1", false).unwrap();

        // "A\" was registered first, so it wins although "A\B\" is longer
        assert_eq!(loader.find_file("A\\B\\C"), Some(native("/p2/B/C.php")));
    }

    #[test]
    fn test_re_adding_prefix_keeps_table_position() {
        let mut loader = loader_with(&["/p1/C.php", "/p2/B/C.php"]);
        loader.add_psr4("A\\B\\", "/nowhere", false).unwrap();
        loader.add_psr4("A\\", "/p2", false).unwrap();
        loader.add_psr4("A\\B\\", "/p1", false).unwrap();

        assert_eq!(loader.find_file("A\\B\\C"), Some(native("/p1/C.php")));
    }

    #[test]
    fn test_class_map_short_circuits_probe() {
        let mut loader = loader_with(&[]);
        loader.add_class_map([("Foo\\Bar", "/x.php")]);

        assert_eq!(loader.find_file("Foo\\Bar"), Some(p("/x.php")));
        assert_eq!(loader.probe().probe_count(), 0);
    }

    #[test]
    fn test_miss_is_cached() {
        let mut loader = loader_with(&[]);
        loader.add_psr4("Foo\\", vec!["/a", "/b"], false).unwrap();
        loader.add("", "/lib", false);

        assert_eq!(loader.find_file("Foo\\Missing"), None);
        let probes = loader.probe().probe_count();
        assert!(probes > 0);
        assert_eq!(
            loader.class_map().get("Foo\\Missing"),
            Some(&ClassMapEntry::Missing)
        );

        assert_eq!(loader.find_file("Foo\\Missing"), None);
        assert_eq!(loader.probe().probe_count(), probes);
    }

    #[test]
    fn test_class_map_overrides_cached_miss() {
        let mut loader = loader_with(&[]);
        assert_eq!(loader.find_file("Late"), None);

        loader.add_class_map([("Late", "/late.php")]);
        assert_eq!(loader.find_file("Late"), Some(p("/late.php")));
    }

    #[test]
    fn test_clear_negative_cache() {
        let mut loader = loader_with(&[]);
        loader.add_psr4("Foo\\", "/src", false).unwrap();
        assert_eq!(loader.find_file("Foo\\Bar"), None);
        assert_eq!(loader.find_file("Foo\\Baz"), None);

        loader.probe.insert(native("/src/Bar.php"));
        assert_eq!(loader.find_file("Foo\\Bar"), None);

        assert_eq!(loader.clear_negative_cache(Some("\\Foo\\Bar")), 1);
        assert_eq!(loader.find_file("Foo\\Bar"), Some(native("/src/Bar.php")));
        assert!(loader.class_map().contains("Foo\\Baz"));

        assert_eq!(loader.clear_negative_cache(None), 1);
        assert!(loader.class_map().is_empty());
    }

    #[test]
    fn test_hits_are_not_cached() {
        let mut loader = loader_with(&["/src/Bar.php"]);
        loader.add_psr4("Foo\\", "/src", false).unwrap();

        assert!(loader.find_file("Foo\\Bar").is_some());
        assert!(!loader.class_map().contains("Foo\\Bar"));

        // Remapping is reflected on the next lookup
        loader.set_psr4("Foo\\", "/elsewhere").unwrap();
        assert_eq!(loader.find_file("Foo\\Bar"), None);
    }

    #[test]
    fn test_alternate_extension_retry() {
        let mut loader = loader_with(&["/src/Widget.hh"]);
        loader.add_psr4("Ui\\", "/src", false).unwrap();
        assert_eq!(loader.find_file("Ui\\Widget"), None);

        loader.clear_negative_cache(None);
        loader.set_alternate_extension(Some(HACK_EXTENSION.to_string()));
        assert_eq!(loader.find_file("Ui\\Widget"), Some(native("/src/Widget.hh")));
    }

    #[test]
    fn test_primary_extension_preferred() {
        let mut loader = loader_with(&["/src/Widget.hh", "/src/Widget.php"]);
        loader.add_psr4("Ui\\", "/src", false).unwrap();
        loader.set_alternate_extension(Some(HACK_EXTENSION.to_string()));

        assert_eq!(loader.find_file("Ui\\Widget"), Some(native("/src/Widget.php")));
    }

    #[test]
    fn test_include_path() {
        let mut loader = loader_with(&["/usr/share/php/Zend/Loader.php"]);
        loader.set_include_path(vec!["/usr/share/php"]);
        assert_eq!(loader.find_file("Zend_Loader"), None);

        loader.clear_negative_cache(None);
        loader.set_use_include_path(true);
        assert!(loader.use_include_path());
        assert_eq!(
            loader.find_file("Zend_Loader"),
            Some(native("/usr/share/php/Zend/Loader.php"))
        );
    }

    #[test]
    fn test_apply_mappings() {
        let mut mappings = AutoloadMappings::default();
        mappings
            .psr4
            .insert("App\\".to_string(), vec![p("/app")].into());
        mappings
            .namespaces
            .insert("Legacy_".to_string(), vec![p("/legacy")].into());
        mappings
            .classmap
            .insert("Kernel".to_string(), p("/app/Kernel.php"));

        let mut loader = loader_with(&[]);
        loader.add_psr4("App\\", "/old", false).unwrap();
        loader.apply_mappings(&mappings).unwrap();

        assert_eq!(loader.prefixes_psr4()["App\\"], vec![p("/app")]);
        assert_eq!(loader.prefixes()["Legacy_"], vec![p("/legacy")]);
        assert_eq!(loader.find_file("Kernel"), Some(p("/app/Kernel.php")));
    }
}
