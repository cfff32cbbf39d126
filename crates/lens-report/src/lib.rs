//! Analytics and report generation for corp-lens
//!
//! Turns stored company snapshots into artifacts for people and for external AI tools:
//!
//! - [`timeseries`]: bar ordering, visible-window selection and zoom steps
//! - [`volume_profile`]: support/resistance levels from a 20-bucket volume profile
//! - [`metrics`]: fallback PER/PBR, KRW magnitude formatting, dashboard metrics
//! - [`report`]: overview Markdown, narratives Markdown and chart CSV
//! - [`prompts`]: per-step analysis prompts and persona system prompts
//! - [`service`]: [`ReportService`], which fetches through a [`CompanyRepository`]
//!   and drives all of the above
//!
//! Everything except the service is synchronous and pure; identical inputs give
//! byte-identical output.
//!
//! # Example
//!
//! ```rust,ignore
//! use lens_core::{InMemoryRepository, Snapshot};
//! use lens_report::{ArtifactKind, ReportConfig, ReportService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let snapshot = Snapshot::from_json(&std::fs::read_to_string("snapshot.json")?)?;
//!     let repository = Arc::new(InMemoryRepository::new(snapshot));
//!     let service = ReportService::new(repository, ReportConfig::default().with_env()?)?;
//!
//!     let artifact = service.render("005930", ArtifactKind::Overview).await?;
//!     std::fs::write(&artifact.filename, artifact.content)?;
//!     Ok(())
//! }
//! ```
//!
//! [`CompanyRepository`]: lens_core::CompanyRepository

pub mod cache;
pub mod config;
pub mod error;
pub mod metrics;
pub mod prompts;
pub mod report;
pub mod service;
pub mod timeseries;
pub mod volume_profile;

pub use cache::{WindowCache, WindowKey};
pub use config::{ReportConfig, ReportConfigBuilder};
pub use error::{ReportError, Result};
pub use metrics::{
    MetricsSnapshot, RatioValue, Ratios, SegmentShare, fill_ratios, format_grouped,
    format_money, segment_mix,
};
pub use prompts::{
    AnalysisPromptBuilder, Persona, PersonaProfile, StepType, build_prompt, persona_prompt,
    register_prompts,
};
pub use report::{Artifact, ArtifactKind, render_chart, render_narratives, render_overview};
pub use service::ReportService;
pub use timeseries::{ChartView, select_window, sort_bars, zoom_in, zoom_out};
pub use volume_profile::{BUCKET_COUNT, VolumeProfile, support_resistance};

// Re-export Language from lens-prompt
pub use lens_prompt::Language;
