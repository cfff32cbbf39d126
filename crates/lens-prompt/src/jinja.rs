//! MiniJinja-based template implementation

use crate::{Language, PromptError, PromptTemplate, Result};
use minijinja::Environment;

/// A prompt template backed by MiniJinja
///
/// Variants are kept in insertion order so that language fallback is deterministic.
/// Rendering preserves the template text byte for byte, including a trailing newline.
///
/// # Examples
///
/// ```
/// use lens_prompt::{JinjaTemplate, Language, PromptTemplate};
/// use serde_json::json;
///
/// let template = JinjaTemplate::bilingual(
///     "greeting",
///     "Analyze {{ name }}.",
///     "{{ name }}을(를) 분석하세요.",
/// ).unwrap();
///
/// let ko = template.render(&Language::Korean, &json!({ "name": "삼성전자" })).unwrap();
/// assert_eq!(ko, "삼성전자을(를) 분석하세요.");
/// ```
pub struct JinjaTemplate {
    name: String,
    variants: Vec<(Language, String)>,
}

impl JinjaTemplate {
    pub fn builder(name: impl Into<String>) -> JinjaTemplateBuilder {
        JinjaTemplateBuilder::new(name)
    }

    /// Single English variant
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Result<Self> {
        Self::builder(name).english(template).build()
    }

    /// Single Korean variant
    pub fn korean(name: impl Into<String>, template: impl Into<String>) -> Result<Self> {
        Self::builder(name).korean(template).build()
    }

    /// English and Korean variants
    pub fn bilingual(
        name: impl Into<String>,
        english: impl Into<String>,
        korean: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(name).english(english).korean(korean).build()
    }

    fn environment<'source>() -> Environment<'source> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env
    }
}

impl PromptTemplate for JinjaTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn languages(&self) -> Vec<Language> {
        self.variants.iter().map(|(lang, _)| lang.clone()).collect()
    }

    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        let source = self
            .raw_template(lang)
            .ok_or_else(|| PromptError::MissingVariant {
                template: self.name.clone(),
                language: lang.code().to_string(),
            })?;

        let env = Self::environment();
        let value = minijinja::Value::from_serialize(vars);
        env.render_str(source, value)
            .map_err(|e| PromptError::Render {
                template: self.name.clone(),
                detail: e.to_string(),
            })
    }

    fn raw_template(&self, lang: &Language) -> Option<&str> {
        self.variants
            .iter()
            .find(|(l, _)| l == lang)
            .map(|(_, source)| source.as_str())
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .field("languages", &self.languages())
            .finish()
    }
}

/// Builder for [`JinjaTemplate`]
pub struct JinjaTemplateBuilder {
    name: String,
    variants: Vec<(Language, String)>,
}

impl JinjaTemplateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    /// Add or replace the variant for `lang`
    pub fn template(mut self, lang: Language, content: impl Into<String>) -> Self {
        let content = content.into();
        match self.variants.iter_mut().find(|(l, _)| *l == lang) {
            Some(slot) => slot.1 = content,
            None => self.variants.push((lang, content)),
        }
        self
    }

    pub fn english(self, content: impl Into<String>) -> Self {
        self.template(Language::English, content)
    }

    pub fn korean(self, content: impl Into<String>) -> Self {
        self.template(Language::Korean, content)
    }

    /// Parse every variant and build the template
    pub fn build(self) -> Result<JinjaTemplate> {
        if self.variants.is_empty() {
            return Err(PromptError::Empty(self.name));
        }

        {
            let env = JinjaTemplate::environment();
            for (lang, content) in &self.variants {
                env.template_from_str(content)
                    .map_err(|e| PromptError::Parse {
                        template: self.name.clone(),
                        language: lang.code().to_string(),
                        detail: e.to_string(),
                    })?;
            }
        }

        Ok(JinjaTemplate {
            name: self.name,
            variants: self.variants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_template() {
        let template = JinjaTemplate::new("test", "Ticker: {{ ticker }}").unwrap();
        let out = template
            .render(&Language::English, &json!({ "ticker": "005930" }))
            .unwrap();
        assert_eq!(out, "Ticker: 005930");
    }

    #[test]
    fn test_trailing_newline_preserved() {
        let template = JinjaTemplate::new("test", "Line\n").unwrap();
        let out = template.render(&Language::English, &json!({})).unwrap();
        assert_eq!(out, "Line\n");
    }

    #[test]
    fn test_builder_replaces_variant() {
        let template = JinjaTemplate::builder("test")
            .english("v1")
            .english("v2")
            .korean("한")
            .build()
            .unwrap();
        assert_eq!(template.raw_template(&Language::English), Some("v2"));
        assert_eq!(
            template.languages(),
            vec![Language::English, Language::Korean]
        );
    }

    #[test]
    fn test_conditional_block() {
        let template = JinjaTemplate::new(
            "conditional",
            "{% if segments %}[Segments]{% endif %}Task",
        )
        .unwrap();
        let with = template
            .render(&Language::English, &json!({ "segments": "x" }))
            .unwrap();
        assert_eq!(with, "[Segments]Task");
        let without = template
            .render(&Language::English, &json!({ "segments": "" }))
            .unwrap();
        assert_eq!(without, "Task");
    }

    #[test]
    fn test_no_templates_error() {
        assert!(JinjaTemplate::builder("empty").build().is_err());
    }

    #[test]
    fn test_invalid_template_error() {
        let err = JinjaTemplate::new("broken", "{{ unclosed").unwrap_err();
        assert!(matches!(err, PromptError::Parse { .. }));
    }

    #[test]
    fn test_render_missing_language() {
        let template = JinjaTemplate::korean("ko-only", "안녕").unwrap();
        assert!(template.render(&Language::English, &json!({})).is_err());
        let out = template
            .render_with_fallback(&Language::English, &json!({}))
            .unwrap();
        assert_eq!(out, "안녕");
    }
}
