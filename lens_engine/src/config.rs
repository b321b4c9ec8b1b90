//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};

/// Configuration for the lens engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Every this-many interactions the observer emits a pulse insight.
    pub pulse_threshold: u64,

    /// How many recent insights an observer read returns.
    pub insight_window: usize,

    /// Blend used by `synthesize` when the caller passes none.
    pub default_blend: f32,

    /// Knowledge-base entries interpolated into a custom lens narrative.
    pub custom_context_limit: usize,

    /// Oldest sessions are evicted past this count. `None` keeps every session.
    pub max_sessions: Option<usize>,

    /// Knowledge-base file (`.json`, `.toml`, `.yaml`).
    pub knowledge_base: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pulse_threshold: 9,
            insight_window: 5,
            default_blend: 0.5,
            custom_context_limit: 5,
            max_sessions: None,
            knowledge_base: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate TOML settings; missing keys take defaults.
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| {
            EngineError::config(format!("failed to read {}: {}", path.display(), err))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.pulse_threshold == 0 {
            return Err(EngineError::config("pulse_threshold must be at least 1"));
        }
        if self.insight_window == 0 {
            return Err(EngineError::config("insight_window must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.default_blend) {
            return Err(EngineError::config(format!(
                "default_blend must be within [0, 1], got {}",
                self.default_blend
            )));
        }
        if self.max_sessions == Some(0) {
            return Err(EngineError::config("max_sessions must be at least 1 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.pulse_threshold, 9);
        assert_eq!(config.insight_window, 5);
        assert!(config.max_sessions.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            pulse_threshold = 3
            knowledge_base = "data/neurons.yaml"
            "#,
        )
        .unwrap();
        assert_eq!(config.pulse_threshold, 3);
        assert_eq!(config.insight_window, 5);
        assert_eq!(config.knowledge_base, Some(PathBuf::from("data/neurons.yaml")));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(EngineConfig::from_toml_str("pulse_threshold = 0").is_err());
        assert!(EngineConfig::from_toml_str("insight_window = 0").is_err());
        assert!(EngineConfig::from_toml_str("default_blend = 1.5").is_err());
        assert!(EngineConfig::from_toml_str("max_sessions = 0").is_err());
        assert!(matches!(
            EngineConfig::from_toml_str("pulse_threshold = \"nine\""),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_sessions = 100").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.max_sessions, Some(100));

        assert!(EngineConfig::load("/nonexistent/lens.toml").is_err());
    }
}
