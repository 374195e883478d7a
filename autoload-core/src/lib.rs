// autoload-core - PSR-0 / PSR-4 class name to file path resolution

pub mod chain;
pub mod class_map;
pub mod composer;
pub mod error;
pub mod loader;
pub mod mappings;
pub mod paths;
pub mod probe;

pub use chain::{AutoloadChain, ClassResolver, SharedResolver};
pub use class_map::{ClassMap, ClassMapEntry};
pub use composer::{load_vendor, ComposerInit};
pub use error::{ChainError, ConfigError};
pub use loader::{ClassLoader, DEFAULT_EXTENSION, HACK_EXTENSION};
pub use mappings::{AutoloadMappings, PathList};
pub use paths::{IntoDirs, NAMESPACE_SEPARATOR};
pub use probe::{FileProbe, MemoryProbe, OsFileProbe};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
