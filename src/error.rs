//! Error types for schema loading and descriptor construction.
//!
//! Everything here is fatal: the first error aborts the run and nothing is
//! written.

use std::path::PathBuf;

/// Allowed duration suffixes, as listed in diagnostics.
pub const DURATION_SUFFIXES: &str = "ms, s, m, h, d, w";

/// Malformed duration default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("unsupported duration suffix in {input:?}, allowed: {}", DURATION_SUFFIXES)]
    UnsupportedSuffix { input: String },

    #[error("invalid number in duration {input:?}: {reason}")]
    InvalidMagnitude { input: String, reason: String },

    #[error("invalid duration string {input:?}: {reason}")]
    Invalid { input: String, reason: String },

    #[error("duration default must be a string, got {found}")]
    NotAString { found: &'static str },
}

/// Errors raised while loading the schema or building field descriptors.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("cannot read schema file {}: {source}", path.display())]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed schema {}: {source}", path.display())]
    SchemaParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("field {field:?}: {source}")]
    DurationFormat {
        field: String,
        #[source]
        source: DurationError,
    },

    #[error("fields {first:?} and {second:?} both derive the identifier {ident}")]
    NameCollision {
        first: String,
        second: String,
        ident: String,
    },
}
