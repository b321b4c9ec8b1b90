//! Archetypal reference data: the seven bases custom lenses are measured
//! against, and the fixed list of suggested lens templates.

use serde::Serialize;

/// A foundation template developers can build custom lenses upon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypalBase {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub archetypal_core: &'static str,
    pub examples: [&'static str; 3],
}

pub static ARCHETYPAL_BASES: [ArchetypalBase; 7] = [
    ArchetypalBase {
        id: "creator",
        name: "Creator/Destroyer",
        description: "The archetypal force of creation and destruction, building and breaking down",
        archetypal_core: "Creative-Destructive Principle",
        examples: ["Innovation vs. Disruption", "Building vs. Refactoring", "Growth vs. Pruning"],
    },
    ArchetypalBase {
        id: "caregiver",
        name: "Caregiver/Orphan",
        description: "Nurturing and being nurtured, protection and vulnerability",
        archetypal_core: "Care-Dependency Principle",
        examples: [
            "Documentation vs. Assumptions",
            "Error handling vs. Happy path",
            "Support vs. Self-reliance",
        ],
    },
    ArchetypalBase {
        id: "ruler",
        name: "Ruler/Rebel",
        description: "Order and chaos, control and freedom, structure and flexibility",
        archetypal_core: "Order-Chaos Principle",
        examples: ["Architecture vs. Agility", "Standards vs. Innovation", "Control vs. Autonomy"],
    },
    ArchetypalBase {
        id: "explorer",
        name: "Explorer/Innocent",
        description: "Seeking and discovering vs. simplicity and trust",
        archetypal_core: "Discovery-Simplicity Principle",
        examples: ["Complexity vs. Clarity", "Exploration vs. Convention", "Adventure vs. Safety"],
    },
    ArchetypalBase {
        id: "hero",
        name: "Hero/Everyman",
        description: "Individual excellence vs. collective belonging",
        archetypal_core: "Individual-Collective Principle",
        examples: [
            "Optimization vs. Accessibility",
            "Performance vs. Usability",
            "Elite vs. Democratic",
        ],
    },
    ArchetypalBase {
        id: "lover",
        name: "Lover/Magician",
        description: "Connection and transformation, passion and alchemy",
        archetypal_core: "Connection-Transformation Principle",
        examples: ["Integration vs. Isolation", "Harmony vs. Efficiency", "Beauty vs. Function"],
    },
    ArchetypalBase {
        id: "sage",
        name: "Sage/Fool",
        description: "Wisdom and spontaneity, knowledge and intuition",
        archetypal_core: "Wisdom-Spontaneity Principle",
        examples: [
            "Best practices vs. Experimentation",
            "Analysis vs. Intuition",
            "Caution vs. Boldness",
        ],
    },
];

/// Alignment reported when no archetypal base matches.
pub const GENERAL_ARCHETYPAL_PATTERN: &str = "General Archetypal Pattern";

/// A lens idea covering ground the four primary lenses leave open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedLens {
    pub name: &'static str,
    pub description: &'static str,
    pub archetypal_core: &'static str,
    pub perspective: &'static str,
    pub rationale: &'static str,
}

pub static SUGGESTED_LENSES: [SuggestedLens; 5] = [
    SuggestedLens {
        name: "Temporal Lens",
        description: "Analyzes time-based patterns, legacy vs. future, maintenance vs. innovation",
        archetypal_core: "Time-Eternity Principle",
        perspective: "Views everything through the lens of temporal dynamics and sustainability",
        rationale: "Missing temporal dimension in current ethical/emotional/logical/symbolic framework",
    },
    SuggestedLens {
        name: "Energetic Lens",
        description: "Examines energy flow, efficiency, sustainability, and resource consumption",
        archetypal_core: "Energy-Conservation Principle",
        perspective: "Sees all systems as energy transformations and flows",
        rationale: "Environmental and resource considerations often missing from technical analysis",
    },
    SuggestedLens {
        name: "Relational Lens",
        description: "Focuses on relationships, dependencies, networks, and social dynamics",
        archetypal_core: "Connection-Isolation Principle",
        perspective: "Understands everything as part of interconnected relationship networks",
        rationale: "Social and systemic relationship patterns need dedicated lens",
    },
    SuggestedLens {
        name: "Aesthetic Lens",
        description: "Evaluates beauty, elegance, harmony, and artistic expression",
        archetypal_core: "Beauty-Functionality Principle",
        perspective: "Sees the world through patterns of beauty, elegance, and aesthetic harmony",
        rationale: "Beauty and aesthetic considerations are distinct from symbolic analysis",
    },
    SuggestedLens {
        name: "Survival Lens",
        description: "Examines resilience, robustness, failure modes, and existential threats",
        archetypal_core: "Survival-Transcendence Principle",
        perspective: "Evaluates everything for survival potential and existential robustness",
        rationale: "Survival and risk assessment deserves dedicated archetypal perspective",
    },
];
