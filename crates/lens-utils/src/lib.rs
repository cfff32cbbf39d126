//! Shared utilities for corp-lens
//!
//! Logging setup and process-level configuration used by the binaries.

pub mod config;
pub mod logging;

pub use config::{Config, Environment};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
