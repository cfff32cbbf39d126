//! Core prompt template trait

use crate::{Language, PromptError, Result};

/// A named template with one variant per language
///
/// Variables are passed as `serde_json::Value` so the trait stays dyn-compatible.
pub trait PromptTemplate: Send + Sync {
    fn name(&self) -> &str;

    /// Languages this template has a variant for, in a stable order
    fn languages(&self) -> Vec<Language>;

    fn supports_language(&self, lang: &Language) -> bool {
        self.languages().contains(lang)
    }

    /// Render the variant for `lang`; fails if there is none
    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String>;

    /// Render `lang`, else English, else the first available variant
    fn render_with_fallback(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        if self.supports_language(lang) {
            return self.render(lang, vars);
        }
        if self.supports_language(&Language::English) {
            return self.render(&Language::English, vars);
        }
        let fallback = self
            .languages()
            .into_iter()
            .next()
            .ok_or_else(|| PromptError::Empty(self.name().to_string()))?;
        self.render(&fallback, vars)
    }

    /// Raw template source for a language
    fn raw_template(&self, lang: &Language) -> Option<&str>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedTemplate {
        variants: Vec<(Language, &'static str)>,
    }

    impl PromptTemplate for FixedTemplate {
        fn name(&self) -> &str {
            "fixed"
        }

        fn languages(&self) -> Vec<Language> {
            self.variants.iter().map(|(l, _)| l.clone()).collect()
        }

        fn render(&self, lang: &Language, _vars: &serde_json::Value) -> Result<String> {
            self.raw_template(lang)
                .map(str::to_string)
                .ok_or_else(|| PromptError::MissingVariant {
                    template: "fixed".to_string(),
                    language: lang.code().to_string(),
                })
        }

        fn raw_template(&self, lang: &Language) -> Option<&str> {
            self.variants
                .iter()
                .find(|(l, _)| l == lang)
                .map(|(_, s)| *s)
        }
    }

    #[test]
    fn test_fallback_prefers_english() {
        let template = FixedTemplate {
            variants: vec![(Language::Korean, "안녕"), (Language::English, "Hello")],
        };
        let out = template
            .render_with_fallback(&Language::Other("ja".to_string()), &json!({}))
            .unwrap();
        assert_eq!(out, "Hello");
    }

    #[test]
    fn test_fallback_to_first() {
        let template = FixedTemplate {
            variants: vec![(Language::Korean, "안녕")],
        };
        let out = template
            .render_with_fallback(&Language::English, &json!({}))
            .unwrap();
        assert_eq!(out, "안녕");
    }

    #[test]
    fn test_fallback_no_languages() {
        let template = FixedTemplate { variants: vec![] };
        assert!(
            template
                .render_with_fallback(&Language::English, &json!({}))
                .is_err()
        );
    }
}
