//! Processors for user-authored lenses.

use lens_catalog::KnowledgeBase;

use super::LensProcessor;
use crate::custom_lens::CustomLens;

/// Renders the structured analysis template for one custom lens.
#[derive(Debug, Clone)]
pub struct CustomLensProcessor {
    name: String,
    perspective: String,
    archetypal_core: String,
    context_limit: usize,
}

impl CustomLensProcessor {
    /// `context_limit` caps how many knowledge-base entries are listed.
    pub fn new(lens: &CustomLens, context_limit: usize) -> Self {
        Self {
            name: lens.name.clone(),
            perspective: lens.perspective.clone(),
            archetypal_core: lens.archetypal_core.clone(),
            context_limit,
        }
    }

    fn sovereignty_context(&self, knowledge: &KnowledgeBase) -> Vec<String> {
        knowledge
            .iter()
            .take(self.context_limit)
            .map(|record| format!("- {}", record.context_line()))
            .collect()
    }
}

impl LensProcessor for CustomLensProcessor {
    fn process(&self, _text: &str, knowledge: &KnowledgeBase) -> String {
        let context = self.sovereignty_context(knowledge);
        let references = match context.len() {
            1 => "1 reference".to_string(),
            n => format!("{} references", n),
        };
        let context_block = if context.is_empty() {
            "- none available".to_string()
        } else {
            context.join("\n")
        };

        format!(
            "[{name} Analysis]\n\n\
             From the perspective of {perspective}, examining through the archetypal lens of {core}:\n\n\
             The text reveals patterns that connect to deeper structural themes. When viewed through this \
             cognitive lens, the surface elements reflect underlying archetypal dynamics.\n\n\
             Key insights:\n\
             • The archetypal core of {core} shapes how the text approaches its subject\n\
             • The perspective of {perspective} brings its deeper meanings forward\n\
             • Connection to sovereignty patterns: {references} in context\n\n\
             Sovereignty context:\n\
             {context_block}\n\n\
             This analysis suggests that the text embodies both the constructive and shadow aspects of the {core} archetype.",
            name = self.name,
            perspective = self.perspective,
            core = self.archetypal_core,
            references = references,
            context_block = context_block,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom_lens::CustomLensDraft;
    use lens_catalog::SovereigntyRecord;

    fn lens() -> CustomLens {
        CustomLens::from_draft(
            "custom_test",
            CustomLensDraft::new("Order Lens")
                .with_perspective("structure and its discontents")
                .with_archetypal_core("Order-Chaos Principle")
                .with_prompt_template("Analyze how structure is imposed and resisted."),
        )
    }

    fn knowledge(count: u32) -> KnowledgeBase {
        let records = (1..=count)
            .map(|id| {
                SovereigntyRecord::new(id, format!("Record {}", id))
                    .with_core_freedom("Freedom")
                    .with_dual_potential("light", "shadow")
            })
            .collect();
        KnowledgeBase::new(records).unwrap()
    }

    #[test]
    fn test_header_and_perspective() {
        let output = CustomLensProcessor::new(&lens(), 5).process("text", &knowledge(1));
        assert!(output.starts_with("[Order Lens Analysis]\n\n"));
        assert!(output.contains(
            "From the perspective of structure and its discontents, examining through the archetypal lens of Order-Chaos Principle:"
        ));
        assert!(output.contains("Connection to sovereignty patterns: 1 reference in context"));
        assert!(output.contains("- Record 1: Freedom (light / shadow)"));
    }

    #[test]
    fn test_context_is_capped() {
        let output = CustomLensProcessor::new(&lens(), 5).process("text", &knowledge(7));
        assert!(output.contains("- Record 5:"));
        assert!(!output.contains("- Record 6:"));
        assert!(output.contains("5 references in context"));
    }

    #[test]
    fn test_empty_knowledge_base() {
        let output = CustomLensProcessor::new(&lens(), 5).process("text", &KnowledgeBase::empty());
        assert!(output.contains("Sovereignty context:\n- none available"));
        assert!(output.contains("0 references in context"));
    }
}
