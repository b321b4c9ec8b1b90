//! The engine's public operations, wired together.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use lens_catalog::{ArchetypalBase, KnowledgeBase, LensPattern, SovereigntyRecord, SuggestedLens};

use crate::config::EngineConfig;
use crate::custom_lens::{CustomLens, CustomLensDraft, CustomLensManager};
use crate::error::{EngineError, EngineResult};
use crate::lens::{word_count, LensManager, LensOutputs, LensRegistry};
use crate::observer::{InteractionContext, InteractionKind, Observer, ObserverState};
use crate::session::{ProcessRecord, SessionId, SessionStore};

/// One lens's side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub lens: String,
    pub output: Option<String>,
    pub word_count: usize,
}

/// Outputs for several lenses, laid side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LensComparison {
    pub outputs: LensOutputs,
    /// One entry per requested key, in request order.
    pub entries: Vec<ComparisonEntry>,
}

impl LensComparison {
    fn new<S: AsRef<str>>(outputs: LensOutputs, lens_keys: &[S]) -> Self {
        let mut entries: Vec<ComparisonEntry> = Vec::with_capacity(lens_keys.len());
        for key in lens_keys.iter().map(AsRef::as_ref) {
            if entries.iter().any(|entry| entry.lens == key) {
                continue;
            }
            let output = outputs.get(key).map(str::to_string);
            entries.push(ComparisonEntry {
                lens: key.to_string(),
                word_count: output.as_deref().map(word_count).unwrap_or(0),
                output,
            });
        }
        Self { outputs, entries }
    }

    /// Word count of one lens's output, 0 when the lens produced none.
    pub fn word_count(&self, lens: &str) -> usize {
        self.outputs.get(lens).map(word_count).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Synthesis {
    pub synthesis: String,
    pub outputs: LensOutputs,
    pub blend: f32,
}

/// A newly created custom lens and the archetype it was judged closest to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedLens {
    pub lens: CustomLens,
    pub archetypal_alignment: &'static str,
}

/// Entry point for every engine operation.
///
/// Holds the shared registry, knowledge base, session store and the
/// managers built on them. Cheap to share behind an `Arc`; every method
/// takes `&self`.
#[derive(Debug)]
pub struct LensService {
    config: EngineConfig,
    knowledge: Arc<KnowledgeBase>,
    sessions: Arc<SessionStore>,
    lenses: LensManager,
    custom_lenses: CustomLensManager,
    observer: Observer,
}

impl LensService {
    /// Validate `config`, load its knowledge base and wire every component.
    ///
    /// A missing or unreadable knowledge base degrades to an empty one.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let knowledge = match &config.knowledge_base {
            Some(path) => KnowledgeBase::load_or_empty(path),
            None => KnowledgeBase::empty(),
        };
        Self::new(config, knowledge)
    }

    /// Validate `config` and wire every component around `knowledge`.
    pub fn new(config: EngineConfig, knowledge: KnowledgeBase) -> EngineResult<Self> {
        config.validate()?;
        let knowledge = Arc::new(knowledge);
        let registry = Arc::new(LensRegistry::with_builtins());
        let sessions = Arc::new(SessionStore::new(config.max_sessions));

        let service = Self {
            lenses: LensManager::new(Arc::clone(&registry)),
            custom_lenses: CustomLensManager::new(registry, config.custom_context_limit),
            observer: Observer::new(
                Arc::clone(&sessions),
                Arc::clone(&knowledge),
                config.pulse_threshold,
                config.insight_window,
            ),
            knowledge,
            sessions,
            config,
        };

        info!(
            records = service.knowledge.len(),
            pulse_threshold = service.config.pulse_threshold,
            "Lens service ready"
        );
        Ok(service)
    }

    /// Settings the service was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The sovereignty records lens outputs draw on.
    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    /// Every live session.
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    // === Sessions ===

    /// Open a new session, evicting the oldest when the store is full.
    pub fn create_session(&self) -> SessionId {
        self.sessions.create_session()
    }

    /// Run `text` through the requested lenses and log the request.
    pub fn process<S: AsRef<str>>(
        &self,
        session: SessionId,
        text: &str,
        lens_keys: &[S],
    ) -> LensOutputs {
        let outputs = self.lenses.process_text(text, lens_keys, &self.knowledge);
        let lenses = owned_keys(lens_keys);

        let record = ProcessRecord::new(text, lenses.clone(), outputs.clone());
        self.sessions.record_process(session, record);
        self.observer.observe_interaction(
            session,
            InteractionKind::Process,
            &InteractionContext::new(text, lenses),
        );
        outputs
    }

    /// [`process`](Self::process) with the lenses of a named pattern.
    pub fn process_with_pattern(
        &self,
        session: SessionId,
        text: &str,
        pattern: &LensPattern,
    ) -> LensOutputs {
        debug!(pattern = pattern.name, "Processing with lens pattern");
        self.process(session, text, pattern.lens_keys().as_slice())
    }

    /// Run the lenses side by side with per-lens word counts. Not recorded in history.
    pub fn compare<S: AsRef<str>>(
        &self,
        session: SessionId,
        text: &str,
        lens_keys: &[S],
    ) -> LensComparison {
        let outputs = self.lenses.process_text(text, lens_keys, &self.knowledge);
        let comparison = LensComparison::new(outputs, lens_keys);

        self.observer.observe_interaction(
            session,
            InteractionKind::Compare,
            &InteractionContext::new(text, owned_keys(lens_keys)),
        );
        comparison
    }

    /// Blend the requested lenses. `blend` defaults to the configured value.
    pub fn synthesize<S: AsRef<str>>(
        &self,
        session: SessionId,
        text: &str,
        lens_keys: &[S],
        blend: Option<f32>,
    ) -> Synthesis {
        let blend = blend.unwrap_or(self.config.default_blend);
        let outputs = self.lenses.process_text(text, lens_keys, &self.knowledge);
        let synthesis = self.lenses.synthesize_outputs(&outputs, blend);

        self.observer.observe_interaction(
            session,
            InteractionKind::Synthesize,
            &InteractionContext::new(text, owned_keys(lens_keys)).with_blend(blend),
        );
        Synthesis {
            synthesis,
            outputs,
            blend,
        }
    }

    /// Observer counters and insights for a session; zeroed when unknown.
    pub fn observer_state(&self, session: SessionId) -> ObserverState {
        self.observer.observer_state(session)
    }

    /// Process records of a session, oldest first.
    pub fn session_history(&self, session: SessionId) -> Vec<ProcessRecord> {
        self.sessions.process_history(session)
    }

    // === Custom lenses ===

    /// Validate and register a custom lens.
    pub fn create_custom_lens(&self, draft: CustomLensDraft) -> EngineResult<CreatedLens> {
        let validation = self.custom_lenses.validate_archetypal_coverage(&draft);
        if !validation.is_valid {
            return Err(EngineError::InvalidLens {
                suggestions: validation.suggestions,
            });
        }

        let lens = self.custom_lenses.create_custom_lens(draft)?;
        Ok(CreatedLens {
            lens,
            archetypal_alignment: validation.archetypal_alignment,
        })
    }

    /// All custom lenses in creation order.
    pub fn list_custom_lenses(&self) -> Vec<CustomLens> {
        self.custom_lenses.list_custom_lenses()
    }

    /// Look up a custom lens by key.
    pub fn get_custom_lens(&self, key: &str) -> Option<CustomLens> {
        self.custom_lenses.get_custom_lens(key)
    }

    /// Remove a custom lens. Unknown keys return `false`.
    pub fn delete_custom_lens(&self, key: &str) -> bool {
        self.custom_lenses.delete_custom_lens(key)
    }

    /// The seven archetypal bases.
    pub fn archetypal_bases(&self) -> &'static [ArchetypalBase] {
        self.custom_lenses.archetypal_bases()
    }

    /// Suggested lenses that fill gaps in the built-in set.
    pub fn suggested_lenses(&self) -> &'static [SuggestedLens] {
        self.custom_lenses.suggested_lenses()
    }

    // === Catalog ===

    /// Every loaded sovereignty record.
    pub fn sovereignties(&self) -> &[SovereigntyRecord] {
        self.knowledge.records()
    }

    /// The seven predefined lens patterns.
    pub fn lens_patterns(&self) -> [&'static LensPattern; 7] {
        LensPattern::all()
    }

    /// Pick a pattern from keywords in `context`.
    pub fn suggest_pattern(&self, context: &str) -> &'static LensPattern {
        LensPattern::suggest(context)
    }

    /// Built-in keys followed by custom keys in creation order.
    pub fn available_lenses(&self) -> Vec<String> {
        let registry = self.lenses.registry();
        registry
            .builtin_keys()
            .into_iter()
            .map(str::to_string)
            .chain(registry.custom_keys())
            .collect()
    }
}

fn owned_keys<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
    keys.iter().map(|key| key.as_ref().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> LensService {
        LensService::new(EngineConfig::default(), KnowledgeBase::empty()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EngineConfig {
            default_blend: 2.0,
            ..EngineConfig::default()
        };
        let result = LensService::new(config, KnowledgeBase::empty());
        assert!(matches!(result, Err(EngineError::Config(_))));

        let config = EngineConfig {
            max_sessions: Some(0),
            ..EngineConfig::default()
        };
        let result = LensService::new(config, KnowledgeBase::empty());
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_comparison_entries_follow_request() {
        let service = service();
        let session = service.create_session();
        let comparison = service.compare(session, "a b c", &["logical", "missing", "logical"]);

        let lenses: Vec<_> = comparison.entries.iter().map(|e| e.lens.as_str()).collect();
        assert_eq!(lenses, vec!["logical", "missing"]);
        assert!(comparison.entries[1].output.is_none());
        assert_eq!(comparison.entries[1].word_count, 0);
        assert_eq!(comparison.word_count("missing"), 0);
        assert_eq!(comparison.word_count("logical"), comparison.entries[0].word_count);
    }

    #[test]
    fn test_synthesize_uses_default_blend() {
        let service = service();
        let session = service.create_session();

        let synthesis = service.synthesize(session, "text", &["ethical"], None);
        assert_eq!(synthesis.blend, 0.5);
        assert!(synthesis.synthesis.ends_with("Blend factor: 0.5"));

        let synthesis = service.synthesize(session, "text", &["ethical"], Some(0.8));
        assert_eq!(synthesis.blend, 0.8);
    }

    #[test]
    fn test_invalid_custom_lens_rejected() {
        let service = service();
        let err = service
            .create_custom_lens(CustomLensDraft::new("Thin"))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidLens { ref suggestions } if suggestions.len() == 3
        ));
        assert!(service.list_custom_lenses().is_empty());
    }

    #[test]
    fn test_available_lenses_include_custom() {
        let service = service();
        assert_eq!(service.available_lenses().len(), 10);

        let created = service
            .create_custom_lens(
                CustomLensDraft::new("Caretaker")
                    .with_perspective("how systems look after the people inside them")
                    .with_archetypal_core("Care-Dependency Principle")
                    .with_prompt_template(
                        "Find where the design protects its users and where it leaves them exposed.",
                    ),
            )
            .unwrap();

        let available = service.available_lenses();
        assert_eq!(available.len(), 11);
        assert_eq!(available.last(), Some(&created.lens.key));
    }

    #[test]
    fn test_process_with_pattern() {
        let service = service();
        let session = service.create_session();
        let pattern = &LensPattern::CODE_REVIEW;
        let outputs = service.process_with_pattern(session, "fn main() {}", pattern);

        let keys: Vec<_> = outputs.keys().collect();
        assert_eq!(keys, vec!["ethical", "logical"]);
        assert_eq!(service.session_history(session)[0].lenses, vec!["ethical", "logical"]);
    }

    #[test]
    fn test_unknown_session_still_processes() {
        let service = service();
        let missing = SessionId::new();

        let outputs = service.process(missing, "text", &["ethical"]);
        assert_eq!(outputs.len(), 1);
        assert!(service.session_history(missing).is_empty());
        assert_eq!(service.observer_state(missing).api_calls, 0);
    }
}
