//! Lens processing - turning a text and the knowledge base into one narrative per lens.
//!
//! - **builtin**: the ten keyword-driven lens processors
//! - **custom**: processors bound to user-authored lens definitions
//! - **registry**: key -> processor bindings
//! - **manager**: fan-out over a lens set, plus synthesis

mod builtin;
mod custom;
mod manager;
mod registry;

pub use builtin::*;
pub use custom::*;
pub use manager::*;
pub use registry::*;

use serde::ser::{Serialize, SerializeMap, Serializer};

use lens_catalog::KnowledgeBase;

/// Produces a narrative for a text from one perspective.
///
/// Implementations must not mutate shared state; the same processor is
/// called concurrently from many sessions.
pub trait LensProcessor: Send + Sync {
    fn process(&self, text: &str, knowledge: &KnowledgeBase) -> String;
}

/// Lens key -> narrative, in the order lenses were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LensOutputs {
    entries: Vec<(String, String)>,
}

impl LensOutputs {
    /// An empty output map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. A key already present is left unchanged.
    pub fn insert(&mut self, lens: impl Into<String>, narrative: impl Into<String>) -> bool {
        let lens = lens.into();
        if self.contains(&lens) {
            return false;
        }
        self.entries.push((lens, narrative.into()));
        true
    }

    /// Narrative produced by `lens`, if any.
    pub fn get(&self, lens: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == lens)
            .map(|(_, narrative)| narrative.as_str())
    }

    /// Whether `lens` produced output.
    pub fn contains(&self, lens: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == lens)
    }

    /// Lens keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// `(lens, narrative)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, narrative)| (key.as_str(), narrative.as_str()))
    }

    /// Number of lenses with output.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for LensOutputs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, narrative) in &self.entries {
            map.serialize_entry(key, narrative)?;
        }
        map.end()
    }
}

/// Whitespace-token count used by lens comparisons.
pub fn word_count(narrative: &str) -> usize {
    narrative.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs_keep_insertion_order() {
        let mut outputs = LensOutputs::new();
        outputs.insert("logical", "L");
        outputs.insert("ethical", "E");

        let keys: Vec<_> = outputs.keys().collect();
        assert_eq!(keys, vec!["logical", "ethical"]);
        assert_eq!(outputs.get("ethical"), Some("E"));
        assert_eq!(outputs.get("symbolic"), None);
    }

    #[test]
    fn test_outputs_ignore_repeated_key() {
        let mut outputs = LensOutputs::new();
        assert!(outputs.insert("ethical", "first"));
        assert!(!outputs.insert("ethical", "second"));
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs.get("ethical"), Some("first"));
    }

    #[test]
    fn test_outputs_serialize_as_ordered_object() {
        let mut outputs = LensOutputs::new();
        outputs.insert("symbolic", "S");
        outputs.insert("emotional", "M");

        let json = serde_json::to_string(&outputs).unwrap();
        assert_eq!(json, r#"{"symbolic":"S","emotional":"M"}"#);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("a b c"), 3);
        assert_eq!(word_count("  spaced\tout\nwords  "), 3);
        assert_eq!(word_count(""), 0);
    }
}
