//! Knowledge base - the loaded-once, read-only collection of sovereignty records.
//!
//! Records keep their load order; every lens filter walks them in that order,
//! so "first two matches" is stable for a given data file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::sovereignty::{SovereigntyId, SovereigntyRecord};

/// On-disk document shape: `{ sovereignties: [...] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct KnowledgeDocument {
    #[serde(default)]
    sovereignties: Vec<SovereigntyRecord>,
}

/// Supported knowledge-base file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeFormat {
    Json,
    Toml,
    Yaml,
}

impl KnowledgeFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(KnowledgeFormat::Json),
            "toml" => Ok(KnowledgeFormat::Toml),
            "yaml" | "yml" => Ok(KnowledgeFormat::Yaml),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// The read-only collection of sovereignty records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KnowledgeBase {
    records: Vec<SovereigntyRecord>,
}

impl KnowledgeBase {
    /// Build a knowledge base, rejecting duplicate ids.
    pub fn new(records: Vec<SovereigntyRecord>) -> CatalogResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateSovereignty(record.id));
            }
        }
        Ok(Self { records })
    }

    /// A knowledge base with no records.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON `{ "sovereignties": [...] }` document.
    pub fn from_json_str(content: &str) -> CatalogResult<Self> {
        let doc: KnowledgeDocument = serde_json::from_str(content)?;
        Self::new(doc.sovereignties)
    }

    /// Parse a TOML document with a `sovereignties` table array.
    pub fn from_toml_str(content: &str) -> CatalogResult<Self> {
        let doc: KnowledgeDocument = toml::from_str(content)?;
        Self::new(doc.sovereignties)
    }

    /// Parse a YAML document with a `sovereignties` list.
    pub fn from_yaml_str(content: &str) -> CatalogResult<Self> {
        // An empty YAML document deserializes to unit, not to a map.
        if content.trim().is_empty() {
            return Ok(Self::empty());
        }
        let doc: KnowledgeDocument = serde_yaml::from_str(content)?;
        Self::new(doc.sovereignties)
    }

    /// Parse `content` in the given format.
    pub fn parse(content: &str, format: KnowledgeFormat) -> CatalogResult<Self> {
        match format {
            KnowledgeFormat::Json => Self::from_json_str(content),
            KnowledgeFormat::Toml => Self::from_toml_str(content),
            KnowledgeFormat::Yaml => Self::from_yaml_str(content),
        }
    }

    /// Load from a file, choosing the parser by extension.
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let format = KnowledgeFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let knowledge = Self::parse(&content, format)?;
        info!(path = %path.display(), records = knowledge.len(), "Loaded knowledge base");
        Ok(knowledge)
    }

    /// Load from a file, substituting an empty knowledge base on any failure.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(knowledge) => knowledge,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Knowledge base unavailable, continuing with an empty one"
                );
                Self::empty()
            }
        }
    }

    /// All records, in load order.
    pub fn records(&self) -> &[SovereigntyRecord] {
        &self.records
    }

    /// The record with `id`, if loaded.
    pub fn get(&self, id: SovereigntyId) -> Option<&SovereigntyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in authored order.
    pub fn iter(&self) -> impl Iterator<Item = &SovereigntyRecord> {
        self.records.iter()
    }

    /// Records matching a predicate, in load order.
    pub fn filter<F>(&self, predicate: F) -> Vec<&SovereigntyRecord>
    where
        F: Fn(&SovereigntyRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }
}
