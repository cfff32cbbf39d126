//! Configuration management utilities

use serde::{Deserialize, Serialize};

/// Deployment environment, read from `LENS_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "prod" | "production" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    pub environment: Environment,
}

impl Config {
    /// Defaults overridden by `LENS_ENV`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(env) = std::env::var("LENS_ENV") {
            config.environment = Environment::parse(&env);
        }
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "corp-lens".to_string(),
            environment: Environment::Development,
        }
    }
}
