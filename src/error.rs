//! Error taxonomy for the generation engine.
//!
//! Every validation error is raised before the first filesystem mutation of a
//! call. Only [`GenerateError::Io`] can surface after writes have started.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used across the generator.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors produced while parsing, composing or materializing artifacts.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A field token has the wrong shape, an invalid or reserved name, or
    /// repeats an earlier field name.
    #[error("malformed field spec `{token}`: {reason}")]
    MalformedFieldSpec { token: String, reason: String },

    /// A field token names a type outside the closed type-tag set.
    #[error("unknown field type `{type_tag}` in `{token}` (allowed: {allowed})")]
    UnknownFieldType {
        token: String,
        type_tag: String,
        allowed: String,
    },

    #[error("Invalid pagination type '{value}' (expected one of: limit-offset, cursor, none)")]
    InvalidPaginationStrategy { value: String },

    /// One or more output files already exist. Nothing was written.
    #[error("refusing to overwrite: {}", describe_conflicts(.paths))]
    TargetAlreadyExists { paths: Vec<PathBuf> },

    #[error("output directory {path:?} already exists and is not empty")]
    OutputDirectoryNotEmpty { path: PathBuf },

    #[error("invalid entity name `{name}`: {reason}")]
    InvalidEntityName { name: String, reason: String },

    #[error("invalid configuration {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("boilerplate rendering failed: {0}")]
    StaticRender(#[from] minijinja::Error),

    #[error("filesystem error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Stable snake_case identifier of the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GenerateError::MalformedFieldSpec { .. } => "malformed_field_spec",
            GenerateError::UnknownFieldType { .. } => "unknown_field_type",
            GenerateError::InvalidPaginationStrategy { .. } => "invalid_pagination_strategy",
            GenerateError::TargetAlreadyExists { .. } => "target_already_exists",
            GenerateError::OutputDirectoryNotEmpty { .. } => "output_directory_not_empty",
            GenerateError::InvalidEntityName { .. } => "invalid_entity_name",
            GenerateError::Config { .. } => "config",
            GenerateError::Render(_) => "render",
            GenerateError::StaticRender(_) => "static_render",
            GenerateError::Io { .. } => "io",
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> Self {
        GenerateError::MalformedFieldSpec {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

fn describe_conflicts(paths: &[PathBuf]) -> String {
    let mut out = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if paths.len() == 1 {
        out.push_str(" already exists");
    } else {
        out.push_str(" already exist");
    }
    out
}
