//! Configuration for report generation

use crate::error::{ReportError, Result};
use lens_prompt::Language;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Size contracts and tuning knobs for [`ReportService`](crate::ReportService)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Market days fetched for charts and exports
    pub history_days: usize,

    /// Financial rows used by reports and prompts
    pub financial_rows: usize,

    /// Disclosures listed under report references
    pub disclosure_limit: usize,

    /// Initial visible window of the chart view
    pub default_visible_bars: usize,

    /// Lifetime of memoized chart views
    pub window_cache_ttl: Duration,

    pub window_cache_enabled: bool,

    /// Language analysis prompts are rendered in
    pub prompt_language: Language,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            history_days: 365,
            financial_rows: 4,
            disclosure_limit: 10,
            default_visible_bars: 90,
            window_cache_ttl: Duration::from_secs(60),
            window_cache_enabled: true,
            prompt_language: Language::English,
        }
    }
}

impl ReportConfig {
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Apply `LENS_*` environment overrides
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup, then validate
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LENS_HISTORY_DAYS") {
            self.history_days = parse_count("LENS_HISTORY_DAYS", &v)?;
        }
        if let Some(v) = lookup("LENS_FINANCIAL_ROWS") {
            self.financial_rows = parse_count("LENS_FINANCIAL_ROWS", &v)?;
        }
        if let Some(v) = lookup("LENS_DISCLOSURE_LIMIT") {
            self.disclosure_limit = parse_count("LENS_DISCLOSURE_LIMIT", &v)?;
        }
        if let Some(v) = lookup("LENS_VISIBLE_BARS") {
            self.default_visible_bars = parse_count("LENS_VISIBLE_BARS", &v)?;
        }
        if let Some(v) = lookup("LENS_PROMPT_LANGUAGE") {
            self.prompt_language = Language::from_code(&v);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("history_days", self.history_days),
            ("financial_rows", self.financial_rows),
            ("disclosure_limit", self.disclosure_limit),
            ("default_visible_bars", self.default_visible_bars),
        ] {
            if value == 0 {
                return Err(ReportError::Config(format!(
                    "{name} must be greater than 0"
                )));
            }
        }

        if self.window_cache_enabled && self.window_cache_ttl.is_zero() {
            return Err(ReportError::Config(
                "window_cache_ttl must be non-zero when the window cache is enabled".to_string(),
            ));
        }

        if !self.prompt_language.is_known() {
            return Err(ReportError::Config(format!(
                "Unsupported prompt language: {}",
                self.prompt_language.code()
            )));
        }

        Ok(())
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| ReportError::Config(format!("{key} must be a positive integer, got '{value}'")))
}

/// Builder for ReportConfig
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    history_days: Option<usize>,
    financial_rows: Option<usize>,
    disclosure_limit: Option<usize>,
    default_visible_bars: Option<usize>,
    window_cache_ttl: Option<Duration>,
    window_cache_enabled: Option<bool>,
    prompt_language: Option<Language>,
}

impl ReportConfigBuilder {
    pub fn history_days(mut self, days: usize) -> Self {
        self.history_days = Some(days);
        self
    }

    pub fn financial_rows(mut self, rows: usize) -> Self {
        self.financial_rows = Some(rows);
        self
    }

    pub fn disclosure_limit(mut self, limit: usize) -> Self {
        self.disclosure_limit = Some(limit);
        self
    }

    pub fn default_visible_bars(mut self, bars: usize) -> Self {
        self.default_visible_bars = Some(bars);
        self
    }

    pub fn window_cache_ttl(mut self, ttl: Duration) -> Self {
        self.window_cache_ttl = Some(ttl);
        self
    }

    /// Turn chart view memoization on or off
    pub fn window_cache(mut self, enabled: bool) -> Self {
        self.window_cache_enabled = Some(enabled);
        self
    }

    pub fn prompt_language(mut self, lang: Language) -> Self {
        self.prompt_language = Some(lang);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ReportConfig> {
        let defaults = ReportConfig::default();

        let config = ReportConfig {
            history_days: self.history_days.unwrap_or(defaults.history_days),
            financial_rows: self.financial_rows.unwrap_or(defaults.financial_rows),
            disclosure_limit: self.disclosure_limit.unwrap_or(defaults.disclosure_limit),
            default_visible_bars: self
                .default_visible_bars
                .unwrap_or(defaults.default_visible_bars),
            window_cache_ttl: self.window_cache_ttl.unwrap_or(defaults.window_cache_ttl),
            window_cache_enabled: self
                .window_cache_enabled
                .unwrap_or(defaults.window_cache_enabled),
            prompt_language: self.prompt_language.unwrap_or(defaults.prompt_language),
        };

        config.validate()?;
        Ok(config)
    }
}
