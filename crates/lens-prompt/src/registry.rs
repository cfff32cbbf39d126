//! Named template registry

use crate::{Language, PromptError, PromptTemplate, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Templates by name, rendered in one fixed language unless told otherwise
///
/// The language is chosen at construction; build a second registry for a second
/// language rather than switching this one.
///
/// # Examples
///
/// ```
/// use lens_prompt::{JinjaTemplate, Language, PromptRegistry};
/// use serde_json::json;
///
/// let registry = PromptRegistry::new(Language::Korean);
/// registry.register(JinjaTemplate::bilingual("step", "Analyze {{ t }}", "{{ t }} 분석").unwrap());
///
/// assert_eq!(registry.render("step", &json!({ "t": "005930" })).unwrap(), "005930 분석");
/// ```
pub struct PromptRegistry {
    language: Language,
    templates: RwLock<BTreeMap<String, Arc<dyn PromptTemplate>>>,
}

impl PromptRegistry {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            templates: RwLock::new(BTreeMap::new()),
        }
    }

    /// Language used by [`PromptRegistry::render`]
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Add a template under its own name; returns `true` if it replaced one
    pub fn register<T: PromptTemplate + 'static>(&self, template: T) -> bool {
        let name = template.name().to_string();
        self.templates
            .write()
            .map(|mut templates| templates.insert(name, Arc::new(template)).is_some())
            .unwrap_or(false)
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn PromptTemplate>> {
        self.templates
            .read()
            .ok()
            .and_then(|templates| templates.get(name).cloned())
            .ok_or_else(|| PromptError::Unknown(name.to_string()))
    }

    /// Render in the registry language, falling back to English, then any variant
    pub fn render(&self, name: &str, vars: &serde_json::Value) -> Result<String> {
        self.render_in(name, &self.language, vars)
    }

    /// Render in `lang` with the same fallback as [`PromptRegistry::render`]
    pub fn render_in(&self, name: &str, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        self.lookup(name)?.render_with_fallback(lang, vars)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Template names, sorted
    pub fn names(&self) -> Vec<String> {
        self.templates
            .read()
            .map(|templates| templates.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new(Language::English)
    }
}

impl std::fmt::Debug for PromptRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRegistry")
            .field("language", &self.language)
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JinjaTemplate;
    use serde_json::json;

    #[test]
    fn test_register_and_render() {
        let registry = PromptRegistry::default();
        assert!(registry.is_empty());
        assert!(!registry.register(JinjaTemplate::new("ticker", "Ticker {{ t }}").unwrap()));

        assert!(registry.contains("ticker"));
        assert_eq!(
            registry.render("ticker", &json!({ "t": "035720" })).unwrap(),
            "Ticker 035720"
        );
    }

    #[test]
    fn test_render_in_other_language() {
        let registry = PromptRegistry::default();
        registry.register(JinjaTemplate::bilingual("g", "Hi {{ n }}", "안녕 {{ n }}").unwrap());
        let out = registry
            .render_in("g", &Language::Korean, &json!({ "n": "코스닥" }))
            .unwrap();
        assert_eq!(out, "안녕 코스닥");
        assert_eq!(registry.language(), &Language::English);
    }

    #[test]
    fn test_korean_registry_falls_back_to_english() {
        let registry = PromptRegistry::new(Language::Korean);
        registry.register(JinjaTemplate::new("en-only", "Task").unwrap());
        assert_eq!(registry.render("en-only", &json!({})).unwrap(), "Task");
    }

    #[test]
    fn test_unknown_template() {
        let registry = PromptRegistry::default();
        let err = registry.render("missing", &json!({})).unwrap_err();
        assert!(matches!(err, PromptError::Unknown(_)));
        assert_eq!(err.to_string(), "No template named 'missing'");
    }

    #[test]
    fn test_names_sorted_and_replace() {
        let registry = PromptRegistry::default();
        registry.register(JinjaTemplate::new("b", "B").unwrap());
        registry.register(JinjaTemplate::new("a", "A1").unwrap());
        assert!(registry.register(JinjaTemplate::new("a", "A2").unwrap()));

        assert_eq!(registry.names(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.render("a", &json!({})).unwrap(), "A2");
    }
}
