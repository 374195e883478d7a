// Composer vendor directory ingestion
//
// Builds autoload mappings from vendor/composer/installed.json and the root
// project's composer.json, then registers a loader for them.

use crate::chain::AutoloadChain;
use crate::loader::ClassLoader;
use crate::mappings::{AutoloadMappings, PathList};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;
use std::cell::RefCell;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

/// `autoload` / `autoload-dev` section of a composer.json or installed package
#[derive(Debug, Clone, Default, Deserialize)]
struct AutoloadSection {
    #[serde(rename = "psr-4", default)]
    psr4: IndexMap<String, PathList>,

    #[serde(rename = "psr-0", default)]
    psr0: IndexMap<String, PathList>,

    #[serde(default)]
    classmap: Vec<PathBuf>,

    #[serde(default)]
    files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct InstalledPackage {
    name: String,

    /// Relative to vendor/composer (Composer 2 only)
    #[serde(rename = "install-path")]
    install_path: Option<PathBuf>,

    #[serde(default)]
    autoload: AutoloadSection,
}

/// installed.json is a bare array in Composer 1 and an object in Composer 2
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstalledJson {
    V2 { packages: Vec<InstalledPackage> },
    V1(Vec<InstalledPackage>),
}

impl InstalledJson {
    fn into_packages(self) -> Vec<InstalledPackage> {
        match self {
            InstalledJson::V2 { packages } => packages,
            InstalledJson::V1(packages) => packages,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RootManifest {
    #[serde(default)]
    autoload: AutoloadSection,

    #[serde(rename = "autoload-dev", default)]
    autoload_dev: AutoloadSection,
}

/// Result of [`init`]: the registered loader and the files the caller must
/// load before anything else
#[derive(Debug)]
pub struct ComposerInit {
    pub loader: Rc<RefCell<ClassLoader>>,
    pub files: Vec<PathBuf>,
}

/// Read the autoload configuration of a Composer vendor directory.
///
/// Root project entries come first, then installed packages in
/// installed.json order. Prefixes are ordered the way Composer's generated
/// maps are: reverse-sorted, so a longer prefix precedes any prefix it
/// extends.
///
/// `classmap` sections name directories to scan for class declarations and
/// are skipped; only explicit class maps from a mapping file are supported.
pub fn load_vendor<P: AsRef<Path>>(vendor_dir: P) -> Result<AutoloadMappings> {
    let vendor_dir = vendor_dir.as_ref();
    let composer_dir = vendor_dir.join("composer");

    if !composer_dir.is_dir() {
        anyhow::bail!(
            "Composer directory does not exist: {}",
            composer_dir.display()
        );
    }

    let mut mappings = AutoloadMappings::default();

    if let Some(project_dir) = vendor_dir.parent() {
        let manifest_path = project_dir.join("composer.json");
        if manifest_path.is_file() {
            let root = read_json::<RootManifest>(&manifest_path)?;
            add_section(&mut mappings, "<root>", project_dir, &root.autoload);
            add_section(&mut mappings, "<root>", project_dir, &root.autoload_dev);
        }
    }

    let installed_path = composer_dir.join("installed.json");
    if installed_path.is_file() {
        let installed = read_json::<InstalledJson>(&installed_path)?;
        for package in installed.into_packages() {
            let install_dir = match &package.install_path {
                Some(path) => normalize(&composer_dir.join(path)),
                None => vendor_dir.join(&package.name),
            };
            add_section(&mut mappings, &package.name, &install_dir, &package.autoload);
        }
    } else {
        debug!("No installed.json in {}", composer_dir.display());
    }

    mappings.psr4.sort_by(|a, _, b, _| b.cmp(a));
    mappings.namespaces.sort_by(|a, _, b, _| b.cmp(a));

    info!(
        "Loaded {} PSR-4 and {} PSR-0 prefixes from {}",
        mappings.psr4.len(),
        mappings.namespaces.len(),
        vendor_dir.display()
    );
    Ok(mappings)
}

/// Load a vendor directory, register a loader for it in `chain` and return
/// the loader together with the files to load eagerly
pub fn init<P: AsRef<Path>>(
    vendor_dir: P,
    chain: &mut AutoloadChain,
    prepend: bool,
) -> Result<ComposerInit> {
    let vendor_dir = vendor_dir.as_ref();
    let mappings = load_vendor(vendor_dir)?;

    let loader = ClassLoader::from_mappings(&mappings)
        .with_context(|| format!("Invalid autoload mappings in {}", vendor_dir.display()))?;
    let loader = Rc::new(RefCell::new(loader));
    ClassLoader::register(&loader, chain, prepend);

    Ok(ComposerInit {
        loader,
        files: mappings.files,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn add_section(
    mappings: &mut AutoloadMappings,
    package: &str,
    base: &Path,
    section: &AutoloadSection,
) {
    for (prefix, dirs) in &section.psr4 {
        mappings.add_psr4(prefix, dirs.iter().map(|dir| normalize(&base.join(dir))));
    }
    for (prefix, dirs) in &section.psr0 {
        mappings.add_namespace(prefix, dirs.iter().map(|dir| normalize(&base.join(dir))));
    }
    mappings
        .files
        .extend(section.files.iter().map(|file| normalize(&base.join(file))));

    if !section.classmap.is_empty() {
        debug!(
            "Skipping {} classmap entries of {}",
            section.classmap.len(),
            package
        );
    }
}

/// Lexically resolve `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}
