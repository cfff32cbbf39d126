//! # lens-prompt
//!
//! Prompt templates for corp-lens.
//!
//! - [`JinjaTemplate`]: MiniJinja templates with Korean and English variants
//! - [`PromptRegistry`]: named templates rendered in one chosen language
//! - [`PromptBuilder`]: fluent assembly of data-dependent prompt blocks
//!
//! ## Example
//!
//! ```
//! use lens_prompt::{JinjaTemplate, Language, PromptRegistry};
//! use serde_json::json;
//!
//! let registry = PromptRegistry::default();
//! registry.register(
//!     JinjaTemplate::bilingual("summary", "Summarize {{ name }}", "{{ name }} 요약").unwrap(),
//! );
//!
//! let out = registry
//!     .render_in("summary", &Language::Korean, &json!({ "name": "카카오" }))
//!     .unwrap();
//! assert_eq!(out, "카카오 요약");
//! ```

mod builder;
mod error;
mod jinja;
mod language;
mod registry;
mod template;

pub use builder::PromptBuilder;
pub use error::{PromptError, Result};
pub use jinja::{JinjaTemplate, JinjaTemplateBuilder};
pub use language::Language;
pub use registry::PromptRegistry;
pub use template::PromptTemplate;
