//! Fan-out of a text over a lens set, and synthesis of the results.

use std::sync::Arc;
use tracing::debug;

use lens_catalog::KnowledgeBase;

use super::{LensOutputs, LensRegistry};

/// Returned by [`LensManager::synthesize_outputs`] when there is nothing to blend.
pub const EMPTY_SYNTHESIS: &str = "No outputs to synthesize.";

/// Dispatches texts to the processors bound in a shared registry.
#[derive(Debug, Clone)]
pub struct LensManager {
    registry: Arc<LensRegistry>,
}

impl LensManager {
    /// Process through processors resolved from `registry`.
    pub fn new(registry: Arc<LensRegistry>) -> Self {
        Self { registry }
    }

    /// The registry lens keys are resolved against.
    pub fn registry(&self) -> &Arc<LensRegistry> {
        &self.registry
    }

    /// Run every resolvable key over `text`, in caller order.
    ///
    /// Unknown keys produce no entry. A key repeated within one call is
    /// processed once.
    pub fn process_text<S: AsRef<str>>(
        &self,
        text: &str,
        lens_keys: &[S],
        knowledge: &KnowledgeBase,
    ) -> LensOutputs {
        let mut outputs = LensOutputs::new();

        for key in lens_keys.iter().map(AsRef::as_ref) {
            if outputs.contains(key) {
                continue;
            }
            match self.registry.resolve(key) {
                Some(processor) => {
                    outputs.insert(key, processor.process(text, knowledge));
                }
                None => debug!(lens = key, "Skipping unregistered lens"),
            }
        }

        debug!(requested = lens_keys.len(), produced = outputs.len(), "Processed lenses");
        outputs
    }

    /// Blend several narratives into one passage.
    ///
    /// `blend` is echoed into the text and never used numerically.
    pub fn synthesize_outputs(&self, outputs: &LensOutputs, blend: f32) -> String {
        let contributions: Vec<String> = outputs
            .iter()
            .filter(|(_, narrative)| !narrative.trim().is_empty())
            .map(|(lens, narrative)| {
                let opening = first_sentence(narrative).to_lowercase();
                format!("The {} lens contributes {}", lens, opening)
            })
            .collect();

        if contributions.is_empty() {
            return EMPTY_SYNTHESIS.to_string();
        }

        format!(
            "This synthesis integrates {count} cognitive perspectives into a unified understanding. {contributions}.\n\n\
             Through this multi-dimensional analysis, we can see that the most complete response emerges from honoring \
             all perspectives simultaneously. The synthesis suggests that wisdom lies not in choosing one lens over others, \
             but in finding the dynamic balance that serves the highest good while remaining grounded in practical reality.\n\n\
             This integrated approach recognizes that human experience is inherently multi-faceted, and our most profound \
             insights often emerge from the intersection of different ways of knowing.\n\n\
             Blend factor: {blend}",
            count = contributions.len(),
            contributions = contributions.join(", "),
            blend = blend,
        )
    }
}

/// Text up to the first `.`, after dropping a leading `[...]` tag.
fn first_sentence(narrative: &str) -> &str {
    let mut text = narrative.trim_start();
    if text.starts_with('[') {
        if let Some(end) = text.find(']') {
            text = text[end + 1..].trim_start();
        }
    }
    let sentence = match text.find('.') {
        Some(end) => &text[..end],
        None => text,
    };
    sentence.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens::LensProcessor;

    fn manager() -> LensManager {
        LensManager::new(Arc::new(LensRegistry::with_builtins()))
    }

    #[test]
    fn test_process_text_keeps_caller_order() {
        let outputs = manager().process_text(
            "test",
            &["logical", "ethical"],
            &KnowledgeBase::empty(),
        );
        let keys: Vec<_> = outputs.keys().collect();
        assert_eq!(keys, vec!["logical", "ethical"]);
        assert!(outputs.get("logical").unwrap().starts_with("[LOGICAL]"));
    }

    #[test]
    fn test_process_text_skips_unknown_and_repeated_keys() {
        let outputs = manager().process_text(
            "test",
            &["ethical", "nonexistent", "ethical", "symbolic"],
            &KnowledgeBase::empty(),
        );
        let keys: Vec<_> = outputs.keys().collect();
        assert_eq!(keys, vec!["ethical", "symbolic"]);
    }

    #[test]
    fn test_process_text_with_no_keys() {
        let keys: [&str; 0] = [];
        let outputs = manager().process_text("test", &keys, &KnowledgeBase::empty());
        assert!(outputs.is_empty());
    }

    #[test]
    fn test_synthesize_empty_outputs() {
        let manager = manager();
        assert_eq!(manager.synthesize_outputs(&LensOutputs::new(), 0.5), EMPTY_SYNTHESIS);
        assert_eq!(manager.synthesize_outputs(&LensOutputs::new(), 0.0), EMPTY_SYNTHESIS);

        let mut blank = LensOutputs::new();
        blank.insert("ethical", "");
        assert_eq!(manager.synthesize_outputs(&blank, 1.0), EMPTY_SYNTHESIS);
    }

    #[test]
    fn test_synthesize_contributions() {
        let mut outputs = LensOutputs::new();
        outputs.insert(
            "ethical",
            "[ETHICAL] From an ethical perspective, This Matters. More text.",
        );
        outputs.insert("custom", "No tag here. Second.");

        let synthesis = manager().synthesize_outputs(&outputs, 0.25);
        assert!(synthesis.starts_with(
            "This synthesis integrates 2 cognitive perspectives into a unified understanding. \
             The ethical lens contributes from an ethical perspective, this matters, \
             The custom lens contributes no tag here."
        ));
        assert!(synthesis.ends_with("Blend factor: 0.25"));
    }

    #[test]
    fn test_synthesize_builtin_narratives() {
        let manager = manager();
        let outputs = manager.process_text("x", &["ethical", "logical"], &KnowledgeBase::empty());
        let synthesis = manager.synthesize_outputs(&outputs, 0.5);
        assert!(synthesis.contains(
            "The ethical lens contributes from an ethical perspective, this contemplation reveals important moral dimensions"
        ));
        assert!(synthesis.contains("The logical lens contributes from a logical perspective"));
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(first_sentence("[TAG] One. Two."), "One");
        assert_eq!(first_sentence("[Name Analysis]\n\nFrom here. Then"), "From here");
        assert_eq!(first_sentence("no period"), "no period");
        assert_eq!(first_sentence("[unclosed tag. rest"), "[unclosed tag");
    }

    #[test]
    fn test_custom_processor_resolves_through_registry() {
        struct Fixed;
        impl LensProcessor for Fixed {
            fn process(&self, _text: &str, _knowledge: &KnowledgeBase) -> String {
                "fixed".into()
            }
        }

        let manager = manager();
        manager.registry().register_custom("custom_fixed", Arc::new(Fixed)).unwrap();
        let outputs = manager.process_text("x", &["custom_fixed"], &KnowledgeBase::empty());
        assert_eq!(outputs.get("custom_fixed"), Some("fixed"));
    }
}
