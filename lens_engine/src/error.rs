//! Error types for the lens engine.

use thiserror::Error;

use lens_catalog::CatalogError;

/// Failures the engine surfaces to callers.
///
/// Missing sessions and unknown lens keys are not errors; those paths return
/// `Option`/`bool` or zero values instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A custom lens tried to take a built-in key.
    #[error("lens key '{0}' is reserved for a built-in lens")]
    ReservedLensKey(String),

    /// A custom lens key is already bound.
    #[error("lens key '{0}' is already registered")]
    DuplicateLensKey(String),

    /// A custom lens definition failed archetypal validation.
    #[error("invalid lens configuration: {}", suggestions.join("; "))]
    InvalidLens { suggestions: Vec<String> },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl EngineError {
    /// Configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::ReservedLensKey("ethical".into());
        assert_eq!(err.to_string(), "lens key 'ethical' is reserved for a built-in lens");

        let err = EngineError::InvalidLens {
            suggestions: vec!["first".into(), "second".into()],
        };
        assert_eq!(err.to_string(), "invalid lens configuration: first; second");
    }

    #[test]
    fn test_catalog_error_converts() {
        let err: EngineError = CatalogError::UnsupportedFormat("ini".into()).into();
        assert!(matches!(err, EngineError::Catalog(_)));
        assert_eq!(err.to_string(), "unsupported knowledge base format: ini");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }
}
