//! Lens key -> processor bindings.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use lens_catalog::BuiltinLens;

use super::{BuiltinProcessor, LensProcessor};
use crate::error::{EngineError, EngineResult};

/// Resolves lens keys to processors.
///
/// Built-in bindings are fixed at construction; custom bindings come and go
/// with the custom lens manager.
pub struct LensRegistry {
    builtins: HashMap<&'static str, Arc<dyn LensProcessor>>,
    custom: RwLock<HashMap<String, Arc<dyn LensProcessor>>>,
    /// Custom keys in registration order.
    custom_order: RwLock<Vec<String>>,
}

impl LensRegistry {
    /// A registry with all ten built-in lenses bound.
    pub fn with_builtins() -> Self {
        let builtins = BuiltinLens::ALL
            .iter()
            .map(|&lens| {
                let processor: Arc<dyn LensProcessor> = Arc::new(BuiltinProcessor::new(lens));
                (lens.key(), processor)
            })
            .collect();

        Self {
            builtins,
            custom: RwLock::new(HashMap::new()),
            custom_order: RwLock::new(Vec::new()),
        }
    }

    /// The processor bound to `key`; built-ins win over custom bindings.
    pub fn resolve(&self, key: &str) -> Option<Arc<dyn LensProcessor>> {
        if let Some(processor) = self.builtins.get(key) {
            return Some(Arc::clone(processor));
        }
        self.custom.read().get(key).cloned()
    }

    /// Whether `key` is bound to any processor.
    pub fn contains(&self, key: &str) -> bool {
        self.builtins.contains_key(key) || self.custom.read().contains_key(key)
    }

    /// Built-in keys in canonical lens order.
    pub fn builtin_keys(&self) -> Vec<&'static str> {
        BuiltinLens::ALL.iter().map(|lens| lens.key()).collect()
    }

    /// Custom keys in registration order.
    pub fn custom_keys(&self) -> Vec<String> {
        self.custom_order.read().clone()
    }

    /// Bind a custom processor. Built-in and already bound keys are rejected.
    pub fn register_custom(
        &self,
        key: impl Into<String>,
        processor: Arc<dyn LensProcessor>,
    ) -> EngineResult<()> {
        let key = key.into();
        if BuiltinLens::from_key(&key).is_some() {
            return Err(EngineError::ReservedLensKey(key));
        }

        let mut custom = self.custom.write();
        if custom.contains_key(&key) {
            return Err(EngineError::DuplicateLensKey(key));
        }
        custom.insert(key.clone(), processor);
        self.custom_order.write().push(key);
        Ok(())
    }

    /// Returns `false` when the key was not bound. Built-ins cannot be removed.
    pub fn unregister_custom(&self, key: &str) -> bool {
        let mut custom = self.custom.write();
        if custom.remove(key).is_none() {
            return false;
        }
        self.custom_order.write().retain(|k| k != key);
        true
    }
}

impl Default for LensRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for LensRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LensRegistry")
            .field("builtins", &self.builtin_keys())
            .field("custom", &self.custom_keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_catalog::KnowledgeBase;

    struct Echo;

    impl LensProcessor for Echo {
        fn process(&self, text: &str, _knowledge: &KnowledgeBase) -> String {
            format!("echo: {}", text)
        }
    }

    #[test]
    fn test_builtins_resolve() {
        let registry = LensRegistry::with_builtins();
        for lens in BuiltinLens::ALL {
            assert!(registry.contains(lens.key()));
            assert!(registry.resolve(lens.key()).is_some());
        }
        assert!(registry.resolve("unknown").is_none());
        assert!(registry.custom_keys().is_empty());
    }

    #[test]
    fn test_register_and_unregister_custom() {
        let registry = LensRegistry::with_builtins();
        registry.register_custom("custom_echo", Arc::new(Echo)).unwrap();

        let processor = registry.resolve("custom_echo").unwrap();
        assert_eq!(processor.process("hi", &KnowledgeBase::empty()), "echo: hi");
        assert_eq!(registry.custom_keys(), vec!["custom_echo".to_string()]);

        assert!(registry.unregister_custom("custom_echo"));
        assert!(!registry.contains("custom_echo"));
        assert!(!registry.unregister_custom("custom_echo"));
    }

    #[test]
    fn test_builtin_keys_are_reserved() {
        let registry = LensRegistry::with_builtins();
        let err = registry.register_custom("ethical", Arc::new(Echo)).unwrap_err();
        assert!(matches!(err, EngineError::ReservedLensKey(key) if key == "ethical"));
        assert!(!registry.unregister_custom("ethical"));
        assert!(registry.contains("ethical"));
    }

    #[test]
    fn test_duplicate_custom_key_rejected() {
        let registry = LensRegistry::with_builtins();
        registry.register_custom("custom_a", Arc::new(Echo)).unwrap();
        let err = registry.register_custom("custom_a", Arc::new(Echo)).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateLensKey(_)));
        assert_eq!(registry.custom_keys().len(), 1);
    }

    #[test]
    fn test_custom_keys_keep_registration_order() {
        let registry = LensRegistry::with_builtins();
        for key in ["custom_b", "custom_a", "custom_c"] {
            registry.register_custom(key, Arc::new(Echo)).unwrap();
        }
        registry.unregister_custom("custom_a");
        assert_eq!(registry.custom_keys(), vec!["custom_b", "custom_c"]);
    }
}
