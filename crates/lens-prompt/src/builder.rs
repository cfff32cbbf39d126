//! Fluent prompt builder
//!
//! [`PromptBuilder`] assembles prompt text piece by piece, for blocks whose
//! shape depends on which data is present.

/// A fluent builder for constructing prompts
///
/// # Examples
///
/// ```
/// use lens_prompt::PromptBuilder;
///
/// let prompt = PromptBuilder::new()
///     .text("[Company Profile]")
///     .newline()
///     .field("Name", "삼성전자")
///     .when(false, "Sector: -\n")
///     .build();
///
/// assert_eq!(prompt, "[Company Profile]\nName: 삼성전자\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    parts: Vec<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw text
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.parts.push(content.into());
        self
    }

    pub fn newline(self) -> Self {
        self.text("\n")
    }

    /// Two newlines
    pub fn blank_line(self) -> Self {
        self.text("\n\n")
    }

    /// Append `content` only if `condition` holds
    pub fn when(self, condition: bool, content: impl Into<String>) -> Self {
        if condition { self.text(content) } else { self }
    }

    /// `- item` line
    pub fn bullet(self, item: impl Into<String>) -> Self {
        self.text(format!("- {}\n", item.into()))
    }

    /// `1. item` lines, one per entry
    pub fn numbered_list<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (i, item) in items.into_iter().enumerate() {
            self = self.text(format!("{}. {}\n", i + 1, item.into()));
        }
        self
    }

    /// `label: value` line
    pub fn field(self, label: &str, value: impl std::fmt::Display) -> Self {
        self.text(format!("{label}: {value}\n"))
    }

    /// Append each line produced by `f` for every item
    pub fn each<I, T, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(T) -> String,
    {
        for item in items {
            self.parts.push(f(item));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(String::is_empty)
    }

    pub fn build(self) -> String {
        self.parts.concat()
    }
}
