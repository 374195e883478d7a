// Directory list inputs and logical path construction

use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

/// Namespace separator in fully-qualified class names
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Anything that can be registered as a list of base directories.
///
/// A single path is treated as a one-element list.
pub trait IntoDirs {
    fn into_dirs(self) -> Vec<PathBuf>;
}

impl IntoDirs for &str {
    fn into_dirs(self) -> Vec<PathBuf> {
        vec![PathBuf::from(self)]
    }
}

impl IntoDirs for String {
    fn into_dirs(self) -> Vec<PathBuf> {
        vec![PathBuf::from(self)]
    }
}

impl IntoDirs for &Path {
    fn into_dirs(self) -> Vec<PathBuf> {
        vec![self.to_path_buf()]
    }
}

impl IntoDirs for PathBuf {
    fn into_dirs(self) -> Vec<PathBuf> {
        vec![self]
    }
}

impl<T: Into<PathBuf>> IntoDirs for Vec<T> {
    fn into_dirs(self) -> Vec<PathBuf> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<PathBuf>, const N: usize> IntoDirs for [T; N] {
    fn into_dirs(self) -> Vec<PathBuf> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: AsRef<Path>> IntoDirs for &[T] {
    fn into_dirs(self) -> Vec<PathBuf> {
        self.iter().map(|p| p.as_ref().to_path_buf()).collect()
    }
}

/// `Foo\Bar\Baz` + `.php` -> `Foo/Bar/Baz.php`
pub fn logical_path_psr4(class_name: &str, ext: &str) -> String {
    let mut path: String = class_name
        .chars()
        .map(|c| {
            if c == NAMESPACE_SEPARATOR {
                MAIN_SEPARATOR
            } else {
                c
            }
        })
        .collect();
    path.push_str(ext);
    path
}

/// PSR-0 logical path, derived from the PSR-4 one.
///
/// Namespace segments are kept literally, underscores in the class part
/// become directory separators:
/// - `Foo\Bar_Baz` -> `Foo/Bar/Baz.php`
/// - `Foo_Bar_Baz` -> `Foo/Bar/Baz.php`
pub fn logical_path_psr0(class_name: &str, logical_psr4: &str, ext: &str) -> String {
    match class_name.rfind(NAMESPACE_SEPARATOR) {
        Some(pos) => {
            // Separators are single-byte on both sides of the conversion, so
            // byte offsets line up.
            let (namespace, class) = logical_psr4.split_at(pos + 1);
            let mut path = namespace.to_string();
            path.push_str(&underscores_to_separators(class));
            path
        }
        None => {
            let mut path = underscores_to_separators(class_name);
            path.push_str(ext);
            path
        }
    }
}

fn underscores_to_separators(s: &str) -> String {
    s.replace('_', MAIN_SEPARATOR_STR)
}

/// Strip every leading namespace separator
pub fn normalize_class_name(class_name: &str) -> &str {
    class_name.trim_start_matches(NAMESPACE_SEPARATOR)
}
