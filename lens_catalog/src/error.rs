//! Errors raised while loading catalog data.

use std::path::PathBuf;

use thiserror::Error;

use crate::SovereigntyId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON knowledge base: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML knowledge base: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML knowledge base: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported knowledge base format: {0}")]
    UnsupportedFormat(String),

    #[error("duplicate sovereignty id {0}")]
    DuplicateSovereignty(SovereigntyId),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
