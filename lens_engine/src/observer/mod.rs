//! The session observer.
//!
//! Every interaction on a session is counted and narrated as insight records:
//!
//! 1. **Count**: increment the session's interaction count
//! 2. **Narrate**: emit insights for the interaction kind
//! 3. **Highlight**: on `Process`, replace the active knowledge entries
//! 4. **Pulse**: every `pulse_threshold` interactions, append a pulse insight

mod insight;

pub use insight::*;

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use lens_catalog::{BuiltinLens, KnowledgeBase, SovereigntyId, SovereigntyRecord};

use crate::session::{SessionId, SessionStore};

/// Label of the periodic pulse insight.
pub const PULSE_SOVEREIGNTY: &str = "Light of Attention";

const PULSE_MESSAGE: &str = "PULSE: A moment of heightened awareness emerges. \
    The observer recognizes a deepening pattern in your contemplative journey.";

/// Knowledge entries one lens contributes to the active set.
const ACTIVE_PER_LENS: usize = 2;

/// What the user did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Process,
    Compare,
    Synthesize,
}

/// The request an interaction was made with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionContext {
    pub text: String,
    pub lenses: Vec<String>,
    pub blend: Option<f32>,
}

impl InteractionContext {
    /// Context for a request on `lenses`, with no blend.
    pub fn new(text: impl Into<String>, lenses: Vec<String>) -> Self {
        Self {
            text: text.into(),
            lenses,
            blend: None,
        }
    }

    /// Attach the blend factor of a synthesis.
    pub fn with_blend(mut self, blend: f32) -> Self {
        self.blend = Some(blend);
        self
    }

    fn uses(&self, lens: BuiltinLens) -> bool {
        self.lenses.iter().any(|key| key == lens.key())
    }
}

/// Read-only view of a session's observer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObserverState {
    pub api_calls: u64,

    /// Interactions until the next pulse, in `1..=pulse_threshold`.
    pub next_pulse: u64,

    pub active_neurons: Vec<SovereigntyId>,

    /// Most recent insights, oldest first.
    pub insights: Vec<InsightRecord>,
}

impl ObserverState {
    /// What an unknown session reads as.
    pub fn empty(pulse_threshold: u64) -> Self {
        Self {
            api_calls: 0,
            next_pulse: pulse_threshold,
            active_neurons: Vec::new(),
            insights: Vec::new(),
        }
    }
}

/// How a primary lens reads the knowledge base when narrating a `Process`.
struct LensWatch {
    lens: BuiltinLens,
    matches: fn(&SovereigntyRecord) -> bool,
    fallback: &'static str,
    message: &'static str,
}

const WATCHES: [LensWatch; 4] = [
    LensWatch {
        lens: BuiltinLens::Ethical,
        matches: ethical_watch,
        fallback: "The Ethical Seeker",
        message: "The user demonstrates moral contemplation, seeking to understand the ethical dimensions of their inquiry.",
    },
    LensWatch {
        lens: BuiltinLens::Emotional,
        matches: emotional_watch,
        fallback: "The Emotional Integrator",
        message: "Emotional intelligence is being activated, showing the user's capacity for empathetic understanding.",
    },
    LensWatch {
        lens: BuiltinLens::Logical,
        matches: logical_watch,
        fallback: "The Analytical Mind",
        message: "Systematic thinking patterns emerge, indicating a structured approach to understanding.",
    },
    LensWatch {
        lens: BuiltinLens::Symbolic,
        matches: symbolic_watch,
        fallback: "The Pattern Weaver",
        message: "Archetypal awareness is awakening, revealing the user's connection to universal patterns.",
    },
];

fn ethical_watch(record: &SovereigntyRecord) -> bool {
    record.domain_mentions("spirituality") || record.freedom_mentions("responsibility")
}

fn emotional_watch(record: &SovereigntyRecord) -> bool {
    record.domain_mentions("emotional health") || record.freedom_mentions("feel")
}

fn logical_watch(record: &SovereigntyRecord) -> bool {
    record.domain_mentions("critical thinking") || record.freedom_mentions("analyze")
}

fn symbolic_watch(record: &SovereigntyRecord) -> bool {
    record.symbol_mentions("tarot") || record.domain_mentions("spirituality")
}

/// Narrates sessions held in a shared [`SessionStore`].
#[derive(Debug)]
pub struct Observer {
    sessions: Arc<SessionStore>,
    knowledge: Arc<KnowledgeBase>,
    pulse_threshold: u64,
    insight_window: usize,
}

impl Observer {
    /// `pulse_threshold` and `insight_window` are clamped to at least 1.
    pub fn new(
        sessions: Arc<SessionStore>,
        knowledge: Arc<KnowledgeBase>,
        pulse_threshold: u64,
        insight_window: usize,
    ) -> Self {
        Self {
            sessions,
            knowledge,
            pulse_threshold: pulse_threshold.max(1),
            insight_window: insight_window.max(1),
        }
    }

    /// Record one interaction. Returns `false` when the session is unknown.
    pub fn observe_interaction(
        &self,
        session: SessionId,
        kind: InteractionKind,
        context: &InteractionContext,
    ) -> bool {
        let observed = self.sessions.with_session_mut(session, |state| {
            state.interaction_count += 1;

            let insights = match kind {
                InteractionKind::Process => {
                    let (insights, active) = self.process_insights(context);
                    state.active_knowledge_ids = active;
                    insights
                }
                InteractionKind::Compare => vec![InsightRecord::light(
                    "The Discerner",
                    "The user seeks to understand differences and similarities, demonstrating mature analytical thinking.",
                )],
                InteractionKind::Synthesize => vec![InsightRecord::light(
                    "The Integrator",
                    "Integration is being sought, showing the user's desire to create unified understanding from multiple perspectives.",
                )],
            };
            state.insight_log.extend(insights);

            if state.interaction_count % self.pulse_threshold == 0 {
                state.insight_log.push(InsightRecord::light(PULSE_SOVEREIGNTY, PULSE_MESSAGE));
                debug!(session = %session, count = state.interaction_count, "Observer pulse");
            }

            state.interaction_count
        });

        match observed {
            Some(count) => {
                debug!(session = %session, ?kind, count, "Observed interaction");
                true
            }
            None => {
                debug!(session = %session, ?kind, "Ignoring interaction on unknown session");
                false
            }
        }
    }

    /// Insights and the new active set for a `Process` interaction.
    fn process_insights(
        &self,
        context: &InteractionContext,
    ) -> (Vec<InsightRecord>, Vec<SovereigntyId>) {
        let mut insights = Vec::new();
        let mut active = Vec::new();

        for watch in WATCHES.iter().filter(|watch| context.uses(watch.lens)) {
            let matched = self.knowledge.filter(watch.matches);
            active.extend(matched.iter().take(ACTIVE_PER_LENS).map(|r| r.id));

            let title = matched.first().map(|r| r.title.as_str()).unwrap_or(watch.fallback);
            insights.push(InsightRecord::light(title, watch.message));
        }

        if context.lenses.len() > 1 {
            insights.push(InsightRecord::light(
                "The Synthesizer",
                "Multi-lens activation suggests holistic thinking approach emerging.",
            ));
        }

        (insights, active)
    }

    /// Unknown sessions read as a fresh, empty observer.
    pub fn observer_state(&self, session: SessionId) -> ObserverState {
        self.sessions
            .with_session(session, |state| ObserverState {
                api_calls: state.interaction_count,
                next_pulse: self.pulse_threshold - (state.interaction_count % self.pulse_threshold),
                active_neurons: state.active_knowledge_ids.clone(),
                insights: state.recent_insights(self.insight_window).to_vec(),
            })
            .unwrap_or_else(|| ObserverState::empty(self.pulse_threshold))
    }
}
