//! User-authored lenses.
//!
//! A custom lens is a definition plus a processor binding in the shared
//! [`LensRegistry`]. The manager keeps both in step: creating a lens binds
//! its key, deleting it unbinds the key under the same lock.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use lens_catalog::{
    ArchetypalBase, SuggestedLens, ARCHETYPAL_BASES, GENERAL_ARCHETYPAL_PATTERN, SUGGESTED_LENSES,
};

use crate::error::EngineResult;
use crate::lens::{CustomLensProcessor, LensRegistry};

const MIN_CORE_CHARS: usize = 10;
const MIN_PERSPECTIVE_CHARS: usize = 20;
const MIN_PROMPT_CHARS: usize = 50;

pub const CORE_SUGGESTION: &str =
    "Define a clear archetypal core principle (e.g., 'Order-Chaos Principle')";
pub const PERSPECTIVE_SUGGESTION: &str =
    "Expand the perspective description to show how this lens sees the world";
pub const PROMPT_SUGGESTION: &str =
    "Provide more specific guidance on how this lens should analyze content";

/// A lens definition before it has a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomLensDraft {
    pub name: String,
    pub description: String,
    pub perspective: String,
    pub archetypal_core: String,
    pub prompt_template: String,
    pub author: Option<String>,
}

impl CustomLensDraft {
    /// An empty draft with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set what the lens is for.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set how the lens sees the world.
    pub fn with_perspective(mut self, perspective: impl Into<String>) -> Self {
        self.perspective = perspective.into();
        self
    }

    /// Set the archetypal principle the lens is built on.
    pub fn with_archetypal_core(mut self, core: impl Into<String>) -> Self {
        self.archetypal_core = core.into();
        self
    }

    /// Set the guidance used when analyzing text.
    pub fn with_prompt_template(mut self, prompt: impl Into<String>) -> Self {
        self.prompt_template = prompt.into();
        self
    }

    /// Record who wrote the lens.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// A registered custom lens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomLens {
    /// `custom_<uuid>`; never collides with a built-in key.
    pub key: String,
    pub name: String,
    pub description: String,
    pub perspective: String,
    pub archetypal_core: String,
    pub prompt_template: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CustomLens {
    /// Bind a draft to `key`, stamped with the current time.
    pub fn from_draft(key: impl Into<String>, draft: CustomLensDraft) -> Self {
        Self {
            key: key.into(),
            name: draft.name,
            description: draft.description,
            perspective: draft.perspective,
            archetypal_core: draft.archetypal_core,
            prompt_template: draft.prompt_template,
            author: draft.author,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of [`CustomLensManager::validate_archetypal_coverage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypalValidation {
    pub is_valid: bool,
    pub suggestions: Vec<String>,
    /// Name of the closest archetypal base, or the general pattern.
    pub archetypal_alignment: &'static str,
}

/// Owns custom lens definitions and their registry bindings.
#[derive(Debug)]
pub struct CustomLensManager {
    registry: Arc<LensRegistry>,
    lenses: Mutex<Vec<CustomLens>>,
    context_limit: usize,
}

impl CustomLensManager {
    /// `context_limit` is handed to every processor this manager creates.
    pub fn new(registry: Arc<LensRegistry>, context_limit: usize) -> Self {
        Self {
            registry,
            lenses: Mutex::new(Vec::new()),
            context_limit,
        }
    }

    /// Assign a key, bind a processor, and store the definition.
    pub fn create_custom_lens(&self, draft: CustomLensDraft) -> EngineResult<CustomLens> {
        let key = format!("custom_{}", Uuid::new_v4().simple());
        let lens = CustomLens::from_draft(key, draft);
        let processor = CustomLensProcessor::new(&lens, self.context_limit);

        let mut lenses = self.lenses.lock();
        self.registry.register_custom(lens.key.clone(), Arc::new(processor))?;
        lenses.push(lens.clone());

        debug!(key = %lens.key, name = %lens.name, "Created custom lens");
        Ok(lens)
    }

    /// Look up a custom lens by key.
    pub fn get_custom_lens(&self, key: &str) -> Option<CustomLens> {
        self.lenses.lock().iter().find(|lens| lens.key == key).cloned()
    }

    /// All custom lenses in creation order.
    pub fn list_custom_lenses(&self) -> Vec<CustomLens> {
        self.lenses.lock().clone()
    }

    /// Remove the definition and its binding. Unknown keys return `false`.
    pub fn delete_custom_lens(&self, key: &str) -> bool {
        let mut lenses = self.lenses.lock();
        let Some(position) = lenses.iter().position(|lens| lens.key == key) else {
            return false;
        };
        lenses.remove(position);
        self.registry.unregister_custom(key);

        debug!(key, "Deleted custom lens");
        true
    }

    /// Check a draft's fields against the minimum lengths and find its closest archetype.
    pub fn validate_archetypal_coverage(&self, draft: &CustomLensDraft) -> ArchetypalValidation {
        let mut suggestions = Vec::new();

        if char_len(&draft.archetypal_core) < MIN_CORE_CHARS {
            suggestions.push(CORE_SUGGESTION.to_string());
        }
        if char_len(&draft.perspective) < MIN_PERSPECTIVE_CHARS {
            suggestions.push(PERSPECTIVE_SUGGESTION.to_string());
        }
        if char_len(&draft.prompt_template) < MIN_PROMPT_CHARS {
            suggestions.push(PROMPT_SUGGESTION.to_string());
        }

        ArchetypalValidation {
            is_valid: suggestions.is_empty(),
            suggestions,
            archetypal_alignment: closest_archetypal_base(draft)
                .map(|base| base.name)
                .unwrap_or(GENERAL_ARCHETYPAL_PATTERN),
        }
    }

    /// The seven archetypal bases custom lenses are measured against.
    pub fn archetypal_bases(&self) -> &'static [ArchetypalBase] {
        &ARCHETYPAL_BASES
    }

    /// Lens ideas that cover ground the primary lenses leave open.
    pub fn suggested_lenses(&self) -> &'static [SuggestedLens] {
        &SUGGESTED_LENSES
    }
}

/// Length in characters, whitespace included.
fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// First base whose id appears in the draft, or whose text mentions the draft's name.
fn closest_archetypal_base(draft: &CustomLensDraft) -> Option<&'static ArchetypalBase> {
    let lens_text = format!(
        "{} {} {}",
        draft.name, draft.description, draft.archetypal_core
    )
    .to_lowercase();
    let name = draft.name.trim().to_lowercase();

    ARCHETYPAL_BASES.iter().find(|base| {
        let base_text = format!("{} {}", base.name, base.description).to_lowercase();
        lens_text.contains(base.id) || (!name.is_empty() && base_text.contains(&name))
    })
}
