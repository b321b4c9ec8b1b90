//! Built-in lens identifiers and named lens patterns.

mod patterns;

pub use patterns::*;

use serde::{Deserialize, Serialize};

/// The ten built-in cognitive lenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinLens {
    Ethical,
    Emotional,
    Logical,
    Symbolic,
    Temporal,
    Energetic,
    Aesthetic,
    Survival,
    Relational,
    Transcendent,
}

impl BuiltinLens {
    pub const ALL: [BuiltinLens; 10] = [
        BuiltinLens::Ethical,
        BuiltinLens::Emotional,
        BuiltinLens::Logical,
        BuiltinLens::Symbolic,
        BuiltinLens::Temporal,
        BuiltinLens::Energetic,
        BuiltinLens::Aesthetic,
        BuiltinLens::Survival,
        BuiltinLens::Relational,
        BuiltinLens::Transcendent,
    ];

    /// The four lenses the observer and request validation treat as primary.
    pub const PRIMARY: [BuiltinLens; 4] = [
        BuiltinLens::Ethical,
        BuiltinLens::Emotional,
        BuiltinLens::Logical,
        BuiltinLens::Symbolic,
    ];

    /// Registry key, e.g. `"ethical"`.
    pub fn key(&self) -> &'static str {
        match self {
            BuiltinLens::Ethical => "ethical",
            BuiltinLens::Emotional => "emotional",
            BuiltinLens::Logical => "logical",
            BuiltinLens::Symbolic => "symbolic",
            BuiltinLens::Temporal => "temporal",
            BuiltinLens::Energetic => "energetic",
            BuiltinLens::Aesthetic => "aesthetic",
            BuiltinLens::Survival => "survival",
            BuiltinLens::Relational => "relational",
            BuiltinLens::Transcendent => "transcendent",
        }
    }

    /// Exact key lookup.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lens| lens.key() == key)
    }

    /// Bracketed narrative tag, e.g. `"[ETHICAL]"`.
    pub fn tag(&self) -> String {
        format!("[{}]", self.key().to_uppercase())
    }

    /// One of the four lenses the observer narrates.
    pub fn is_primary(&self) -> bool {
        Self::PRIMARY.contains(self)
    }
}

impl std::fmt::Display for BuiltinLens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_lookup() {
        for lens in BuiltinLens::ALL {
            assert_eq!(BuiltinLens::from_key(lens.key()), Some(lens));
        }
        assert_eq!(BuiltinLens::from_key("Ethical"), None);
        assert_eq!(BuiltinLens::from_key("custom_abc"), None);
    }

    #[test]
    fn test_tag() {
        assert_eq!(BuiltinLens::Logical.tag(), "[LOGICAL]");
        assert_eq!(BuiltinLens::Transcendent.tag(), "[TRANSCENDENT]");
    }

    #[test]
    fn test_primary_lenses() {
        assert!(BuiltinLens::Symbolic.is_primary());
        assert!(!BuiltinLens::Survival.is_primary());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&BuiltinLens::Aesthetic).unwrap();
        assert_eq!(json, "\"aesthetic\"");
    }
}
