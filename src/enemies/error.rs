//! Error types for enemy configuration.

use thiserror::Error;

use super::components::EnemyStatus;

/// Errors raised while loading the species table or building an agent from it.
///
/// None of these are recoverable at the agent level: a level that names an
/// unknown species is a data bug.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Species name is not in the registry.
    #[error("Unknown enemy species: {0}")]
    UnknownSpecies(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A stat is out of its valid range.
    #[error("Species '{species}' has invalid {field}: {value}")]
    InvalidStat {
        species: String,
        field: &'static str,
        value: f32,
    },

    /// Two species files share a name.
    #[error("Species '{0}' is defined more than once")]
    DuplicateSpecies(String),

    /// A tuning value is out of its valid range.
    #[error("Enemy tuning has invalid {field}: {value}")]
    InvalidTuning { field: &'static str, value: f32 },

    /// A status has no animation frames.
    #[error("Species '{species}' has no frames for status {status:?}")]
    EmptyAnimation { species: String, status: EnemyStatus },
}
