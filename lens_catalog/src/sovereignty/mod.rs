//! Sovereignty records - the reference entries lenses draw narrative flavor from.

use serde::{Deserialize, Serialize};

/// Unique identifier for sovereignty records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SovereigntyId(pub u32);

impl std::fmt::Display for SovereigntyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Aligned and distorted expressions of a sovereignty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SovereigntyExamples {
    pub aligned: String,
    pub distorted: String,
}

/// A single knowledge-base entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SovereigntyRecord {
    pub id: SovereigntyId,
    pub title: String,

    /// Short phrase describing the principle.
    pub core_freedom: String,

    /// Aligned pole first, distorted pole second.
    pub dual_potential: [String; 2],

    /// Free-text domain tags, in authored order.
    #[serde(default)]
    pub associated_domains: Vec<String>,

    #[serde(default)]
    pub examples: SovereigntyExamples,

    /// Mythic or tarot reference.
    #[serde(default)]
    pub symbolic_reference: String,
}

impl SovereigntyRecord {
    /// Create a record with the given id and title; remaining fields start empty.
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id: SovereigntyId(id),
            title: title.into(),
            core_freedom: String::new(),
            dual_potential: [String::new(), String::new()],
            associated_domains: Vec::new(),
            examples: SovereigntyExamples::default(),
            symbolic_reference: String::new(),
        }
    }

    /// Set the short principle phrase.
    pub fn with_core_freedom(mut self, core_freedom: impl Into<String>) -> Self {
        self.core_freedom = core_freedom.into();
        self
    }

    /// Set the aligned and distorted poles.
    pub fn with_dual_potential(
        mut self,
        aligned: impl Into<String>,
        distorted: impl Into<String>,
    ) -> Self {
        self.dual_potential = [aligned.into(), distorted.into()];
        self
    }

    /// Append domain tags, keeping their order.
    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.associated_domains
            .extend(domains.into_iter().map(Into::into));
        self
    }

    /// Set the mythic or tarot reference.
    pub fn with_symbolic_reference(mut self, reference: impl Into<String>) -> Self {
        self.symbolic_reference = reference.into();
        self
    }

    /// Case-insensitive substring test against every associated domain.
    pub fn domain_mentions(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.associated_domains
            .iter()
            .any(|domain| domain.to_lowercase().contains(&keyword))
    }

    /// Case-insensitive substring test against the core freedom.
    pub fn freedom_mentions(&self, keyword: &str) -> bool {
        self.core_freedom
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }

    /// Case-insensitive substring test against the symbolic reference.
    pub fn symbol_mentions(&self, keyword: &str) -> bool {
        self.symbolic_reference
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }

    /// `"title: core freedom (aligned / distorted)"`.
    pub fn context_line(&self) -> String {
        format!(
            "{}: {} ({} / {})",
            self.title, self.core_freedom, self.dual_potential[0], self.dual_potential[1]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SovereigntyRecord {
        SovereigntyRecord::new(3, "The Chooser")
            .with_core_freedom("Freedom to Choose One's Path")
            .with_dual_potential("Decisive clarity", "Paralysis")
            .with_domains(["Goal Setting", "critical thinking"])
            .with_symbolic_reference("Tarot: The Lovers")
    }

    #[test]
    fn test_record_builder() {
        let record = sample();
        assert_eq!(record.id, SovereigntyId(3));
        assert_eq!(record.associated_domains.len(), 2);
        assert_eq!(record.dual_potential[1], "Paralysis");
    }

    #[test]
    fn test_mentions_are_case_insensitive_substrings() {
        let record = sample();
        assert!(record.domain_mentions("goal setting"));
        assert!(record.domain_mentions("THINK"));
        assert!(!record.domain_mentions("trauma"));
        assert!(record.freedom_mentions("choose"));
        assert!(record.symbol_mentions("tarot"));
        assert!(!record.symbol_mentions("mythology"));
    }

    #[test]
    fn test_context_line() {
        assert_eq!(
            sample().context_line(),
            "The Chooser: Freedom to Choose One's Path (Decisive clarity / Paralysis)"
        );
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let json = r#"{
            "id": 1,
            "title": "The Witness",
            "core_freedom": "Freedom to observe",
            "dual_potential": ["Presence", "Detachment"]
        }"#;
        let record: SovereigntyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, SovereigntyId(1));
        assert!(record.associated_domains.is_empty());
        assert!(record.symbolic_reference.is_empty());
    }
}
