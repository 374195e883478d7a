// Error types for loader configuration and resolver chain integration

use thiserror::Error;

/// Invalid registration input. Returned from the mutating call, which leaves
/// every table untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("A non-empty PSR-4 prefix must end with a namespace separator: {prefix:?}")]
    InvalidPsr4Prefix { prefix: String },
}

/// Failures talking to the resolver chain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Resolver is not registered in this chain")]
    NotRegistered,

    #[error("Resolver re-entered while resolving '{class_name}'")]
    Reentrant { class_name: String },
}
