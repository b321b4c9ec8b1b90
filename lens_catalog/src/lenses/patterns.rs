//! Named lens presets for common kinds of work.

use serde::Serialize;

use super::BuiltinLens;

/// A named, fixed set of lenses with a stated focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LensPattern {
    pub name: &'static str,
    pub lenses: &'static [BuiltinLens],
    pub focus: &'static str,
    pub description: &'static str,
}

impl LensPattern {
    pub const CODE_REVIEW: LensPattern = LensPattern {
        name: "CODE_REVIEW",
        lenses: &[BuiltinLens::Ethical, BuiltinLens::Logical],
        focus: "Security, efficiency, and maintainability analysis",
        description: "Combines ethical considerations (security, privacy) with logical analysis (structure, performance)",
    };

    pub const DEBUGGING: LensPattern = LensPattern {
        name: "DEBUGGING",
        lenses: &[BuiltinLens::Logical, BuiltinLens::Emotional],
        focus: "Systematic problem-solving with user empathy",
        description: "Balances technical analysis with understanding user impact and frustration",
    };

    pub const DOCUMENTATION: LensPattern = LensPattern {
        name: "DOCUMENTATION",
        lenses: &[BuiltinLens::Symbolic, BuiltinLens::Emotional],
        focus: "Clear communication and user understanding",
        description: "Creates intuitive explanations using metaphors and empathetic user perspective",
    };

    pub const ARCHITECTURE: LensPattern = LensPattern {
        name: "ARCHITECTURE",
        lenses: &BuiltinLens::PRIMARY,
        focus: "Holistic system design and decision-making",
        description: "Comprehensive analysis for major technical decisions using all cognitive perspectives",
    };

    pub const API_DESIGN: LensPattern = LensPattern {
        name: "API_DESIGN",
        lenses: &[BuiltinLens::Logical, BuiltinLens::Emotional],
        focus: "Developer experience and technical efficiency",
        description: "Optimizes both technical implementation and developer usability",
    };

    pub const UX_ANALYSIS: LensPattern = LensPattern {
        name: "UX_ANALYSIS",
        lenses: &[BuiltinLens::Emotional, BuiltinLens::Symbolic],
        focus: "User experience and interface intuition",
        description: "Analyzes user feelings and symbolic meaning in interface design",
    };

    pub const SECURITY_AUDIT: LensPattern = LensPattern {
        name: "SECURITY_AUDIT",
        lenses: &[BuiltinLens::Ethical, BuiltinLens::Logical],
        focus: "Comprehensive security and privacy assessment",
        description: "Combines moral/privacy implications with systematic security analysis",
    };

    /// Every pattern in catalog order.
    pub fn all() -> [&'static LensPattern; 7] {
        [
            &Self::CODE_REVIEW,
            &Self::DEBUGGING,
            &Self::DOCUMENTATION,
            &Self::ARCHITECTURE,
            &Self::API_DESIGN,
            &Self::UX_ANALYSIS,
            &Self::SECURITY_AUDIT,
        ]
    }

    /// Case-insensitive lookup; `code-review` and `CODE_REVIEW` are the same pattern.
    pub fn by_name(name: &str) -> Option<&'static LensPattern> {
        let wanted = name.trim().to_uppercase().replace('-', "_");
        Self::all().into_iter().find(|p| p.name == wanted)
    }

    /// Pick a pattern from free-text context. Falls back to `ARCHITECTURE`.
    pub fn suggest(context: &str) -> &'static LensPattern {
        const RULES: [(&[&str], &LensPattern); 7] = [
            (&["review", "audit"], &LensPattern::CODE_REVIEW),
            (&["debug", "bug", "error"], &LensPattern::DEBUGGING),
            (&["doc", "readme", "guide"], &LensPattern::DOCUMENTATION),
            (&["api", "endpoint"], &LensPattern::API_DESIGN),
            (&["ui", "ux", "user"], &LensPattern::UX_ANALYSIS),
            (&["security", "auth", "secure"], &LensPattern::SECURITY_AUDIT),
            (&["architecture", "design", "system"], &LensPattern::ARCHITECTURE),
        ];

        let context = context.to_lowercase();
        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| context.contains(k)))
            .map(|(_, pattern)| *pattern)
            .unwrap_or(&LensPattern::ARCHITECTURE)
    }

    /// Lens keys in pattern order.
    pub fn lens_keys(&self) -> Vec<String> {
        self.lenses.iter().map(|l| l.key().to_string()).collect()
    }
}
