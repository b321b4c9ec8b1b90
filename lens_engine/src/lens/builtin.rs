//! The ten built-in lens processors.
//!
//! Each lens pairs a keyword rule (which knowledge-base records resonate with
//! it) with a fixed narrative template. The input text is the subject of the
//! analysis but is not woven into the narrative, so a lens produces the same
//! passage for any text against the same knowledge base.

use lens_catalog::{BuiltinLens, KnowledgeBase, SovereigntyRecord};

use super::LensProcessor;

/// Matched titles named in a resonance clause.
pub const RESONANCE_LIMIT: usize = 2;

/// Which records a lens considers relevant.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    /// Matched against associated domains and the core freedom.
    pub keywords: &'static [&'static str],
    /// Matched against the symbolic reference.
    pub symbols: &'static [&'static str],
}

impl KeywordRule {
    /// Whether a record's domains or symbolic reference hit any keyword.
    pub fn matches(&self, record: &SovereigntyRecord) -> bool {
        self.keywords
            .iter()
            .any(|k| record.domain_mentions(k) || record.freedom_mentions(k))
            || self.symbols.iter().any(|s| record.symbol_mentions(s))
    }
}

#[derive(Debug, Clone, Copy)]
struct LensTemplate {
    intro: &'static str,
    resonance_lead: &'static str,
    resonance_verb: &'static str,
    /// Starts lowercase so it can follow the resonance clause.
    body: &'static str,
    questions: &'static [&'static str],
    closing: &'static str,
}

const fn rule(
    keywords: &'static [&'static str],
    symbols: &'static [&'static str],
) -> KeywordRule {
    KeywordRule { keywords, symbols }
}

/// The keywords a built-in lens uses to find resonant records.
pub fn keyword_rule(lens: BuiltinLens) -> KeywordRule {
    match lens {
        BuiltinLens::Ethical => rule(
            &["spirituality", "relationships", "responsibility", "choice"],
            &[],
        ),
        BuiltinLens::Emotional => rule(&["emotional health", "trauma", "feel", "heart"], &[]),
        BuiltinLens::Logical => rule(
            &["critical thinking", "goal setting", "analyze", "choose"],
            &[],
        ),
        BuiltinLens::Symbolic => rule(&["spirituality", "art"], &["tarot", "mythology"]),
        BuiltinLens::Temporal => rule(&["time", "future", "legacy", "evolution"], &[]),
        BuiltinLens::Energetic => rule(&["energy", "resource", "efficiency", "flow"], &[]),
        BuiltinLens::Aesthetic => rule(&["beauty", "art", "design", "harmony"], &[]),
        BuiltinLens::Survival => rule(&["security", "resilience", "risk", "stability"], &[]),
        BuiltinLens::Relational => {
            rule(&["relationship", "connection", "network", "social"], &[])
        }
        BuiltinLens::Transcendent => rule(&["purpose", "vision", "transformation", "meaning"], &[]),
    }
}

fn template(lens: BuiltinLens) -> LensTemplate {
    match lens {
        BuiltinLens::Ethical => LensTemplate {
            intro: "From an ethical perspective, this contemplation reveals important moral dimensions.",
            resonance_lead: "The active sovereignties of",
            resonance_verb: "suggest",
            body: "we must consider the broader implications of our choices and their impact on others, examining our values, the consequences of our actions, and our responsibility toward both individual growth and collective wellbeing.",
            questions: &[
                "What would be the most virtuous response?",
                "How do our actions align with our deepest values?",
                "What would serve the highest good for all involved?",
            ],
            closing: "Ethical clarity emerges when intention and consequence are held in the same view.",
        },
        BuiltinLens::Emotional => LensTemplate {
            intro: "Through the emotional lens, this contemplation touches the heart of human experience.",
            resonance_lead: "The resonance with",
            resonance_verb: "indicates",
            body: "we must honor the full spectrum of feeling that arises, letting empathy, compassion, and emotional intelligence guide the response.",
            questions: &[
                "What emotions does this situation evoke?",
                "How might others be feeling?",
                "What would a response rooted in love and understanding look like?",
            ],
            closing: "Wisdom without heart is incomplete, and our capacity for empathy often guides us toward the most healing and connecting choices.",
        },
        BuiltinLens::Logical => LensTemplate {
            intro: "From a logical perspective, this contemplation requires systematic analysis and clear reasoning.",
            resonance_lead: "The activation of",
            resonance_verb: "suggests",
            body: "we should examine the available evidence, identify patterns, and trace cause-and-effect relationships through critical evaluation of assumptions, evidence-based decision making, and logical consistency in our reasoning.",
            questions: &[
                "What does the evidence suggest?",
                "What are the most probable outcomes?",
                "What systematic approach would be most effective?",
            ],
            closing: "Sound conclusions follow from examined premises, and the clearest path is the one whose every step can be checked.",
        },
        BuiltinLens::Symbolic => LensTemplate {
            intro: "Through the symbolic lens, this contemplation reveals deeper archetypal patterns and universal meanings.",
            resonance_lead: "The symbolic resonance with",
            resonance_verb: "indicates",
            body: "we are engaging with timeless human themes that transcend the immediate situation, recognizing the metaphorical and mythic dimensions of our experience.",
            questions: &[
                "What archetypal patterns are at play?",
                "What symbols and metaphors emerge?",
                "How does this connect to universal human experiences?",
            ],
            closing: "Our individual challenges often mirror collective human journeys, connecting us to the deeper currents of meaning that flow through all existence.",
        },
        BuiltinLens::Temporal => LensTemplate {
            intro: "Through the temporal lens, this contemplation reveals time-based patterns and evolutionary dynamics.",
            resonance_lead: "The temporal resonance with",
            resonance_verb: "indicates",
            body: "we are engaging with the flow of time and the evolution of systems.",
            questions: &[
                "What are the past influences?",
                "What are the immediate implications?",
                "What future consequences emerge?",
                "How does this balance innovation with preservation?",
            ],
            closing: "Decisions exist within the flow of time, creating legacy and shaping future possibilities through technical debt, maintenance overhead, and evolutionary trajectory.",
        },
        BuiltinLens::Energetic => LensTemplate {
            intro: "Through the energetic lens, this contemplation reveals resource flows and efficiency patterns.",
            resonance_lead: "The energetic resonance with",
            resonance_verb: "indicates",
            body: "we are engaging with the transformation of energy and resources.",
            questions: &[
                "What energy is required?",
                "How efficiently does it transform to value?",
                "What are the resource costs?",
                "Where are the optimization opportunities?",
            ],
            closing: "How a system consumes and transforms energy reveals the bottlenecks and sustainability patterns that determine its long-term viability.",
        },
        BuiltinLens::Aesthetic => LensTemplate {
            intro: "Through the aesthetic lens, this contemplation reveals beauty, elegance, and harmonious design.",
            resonance_lead: "The aesthetic resonance with",
            resonance_verb: "indicates",
            body: "we are engaging with principles of beauty and elegant design.",
            questions: &[
                "What is visually and conceptually elegant?",
                "How do form and function harmonize?",
                "What creates delight and effortless interaction?",
                "How does beauty contribute to effectiveness?",
            ],
            closing: "Elegance enhances user experience and code clarity, bringing the whole system into harmony.",
        },
        BuiltinLens::Survival => LensTemplate {
            intro: "Through the survival lens, this contemplation reveals resilience, security, and existential robustness.",
            resonance_lead: "The survival resonance with",
            resonance_verb: "indicates",
            body: "we are engaging with threats, vulnerabilities, and system robustness.",
            questions: &[
                "What are the security risks?",
                "Where are the failure points?",
                "How resilient is this to stress?",
                "What ensures long-term survival?",
            ],
            closing: "Naming critical vulnerabilities early lets a fault-tolerant system withstand challenges and adapt to changing conditions.",
        },
        BuiltinLens::Relational => LensTemplate {
            intro: "Through the relational lens, this contemplation reveals networks, connections, and interdependencies.",
            resonance_lead: "The relational resonance with",
            resonance_verb: "indicates",
            body: "we are engaging with relationship patterns and social dynamics.",
            questions: &[
                "What are the key relationships?",
                "How do dependencies flow?",
                "What are the network effects?",
                "How do connections shape outcomes?",
            ],
            closing: "Systems exist within webs of relationships, where collaboration patterns and communication flows enable emergent behaviors.",
        },
        BuiltinLens::Transcendent => LensTemplate {
            intro: "Through the transcendent lens, this contemplation reveals higher purpose and transformational potential.",
            resonance_lead: "The transcendent resonance with",
            resonance_verb: "indicates",
            body: "we are engaging with vision, meaning, and evolutionary purpose.",
            questions: &[
                "What is the higher purpose?",
                "How does this serve transformation?",
                "What paradigms might shift?",
                "How does this contribute to human flourishing?",
            ],
            closing: "Work that connects to a larger mission creates meaning and contributes to evolutionary progress.",
        },
    }
}

/// Processor for one of the ten built-in lenses.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinProcessor {
    lens: BuiltinLens,
}

impl BuiltinProcessor {
    /// Processor for `lens`.
    pub fn new(lens: BuiltinLens) -> Self {
        Self { lens }
    }

    /// Records resonating with this lens, in knowledge-base order.
    pub fn matching_records<'a>(
        &self,
        knowledge: &'a KnowledgeBase,
    ) -> Vec<&'a SovereigntyRecord> {
        let rule = keyword_rule(self.lens);
        knowledge.filter(|record| rule.matches(record))
    }

    fn resonance_clause(
        &self,
        template: &LensTemplate,
        matched: &[&SovereigntyRecord],
    ) -> Option<String> {
        let selected = &matched[..matched.len().min(RESONANCE_LIMIT)];
        if selected.is_empty() {
            return None;
        }

        let titles = selected
            .iter()
            .map(|r| r.title.as_str())
            .collect::<Vec<_>>()
            .join(" and ");

        // The symbolic lens also cites where each symbol comes from.
        let references = if self.lens == BuiltinLens::Symbolic {
            let refs: Vec<_> = selected
                .iter()
                .map(|r| r.symbolic_reference.as_str())
                .filter(|s| !s.is_empty())
                .collect();
            if refs.is_empty() {
                String::new()
            } else {
                format!(" ({})", refs.join(", "))
            }
        } else {
            String::new()
        };

        Some(format!(
            "{} {}{} {} that ",
            template.resonance_lead, titles, references, template.resonance_verb
        ))
    }
}

impl LensProcessor for BuiltinProcessor {
    fn process(&self, _text: &str, knowledge: &KnowledgeBase) -> String {
        let template = template(self.lens);
        let matched = self.matching_records(knowledge);

        let body = match self.resonance_clause(&template, &matched) {
            Some(resonance) => format!("{}{}", resonance, template.body),
            None => capitalize_first(template.body),
        };

        format!(
            "{} {} {} The {} lens asks: {} {}",
            self.lens.tag(),
            template.intro,
            body,
            self.lens.key(),
            template.questions.join(" "),
            template.closing
        )
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
