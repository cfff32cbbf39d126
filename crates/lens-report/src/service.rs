//! Report service facade
//!
//! Fetches entity snapshots through the injected [`CompanyRepository`], validates them and
//! hands them to the pure renderers. The service holds no mutable state apart from the
//! optional chart view cache.

use crate::cache::{WindowCache, WindowKey};
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::metrics::{MetricsSnapshot, SegmentShare, segment_mix};
use crate::prompts::{AnalysisPromptBuilder, Persona, StepType};
use crate::report::{Artifact, ArtifactKind, render_chart, render_narratives, render_overview};
use crate::timeseries::ChartView;
use lens_core::{
    CollectorService, Company, CompanyRepository, Error as CoreError, PersonaAnalysisService,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Entry point for every artifact, prompt and metric of a company
pub struct ReportService {
    repository: Arc<dyn CompanyRepository>,
    collector: Option<Arc<dyn CollectorService>>,
    persona_analysis: Option<Arc<dyn PersonaAnalysisService>>,
    prompts: AnalysisPromptBuilder,
    window_cache: Option<WindowCache>,
    config: ReportConfig,
}

impl ReportService {
    pub fn new(repository: Arc<dyn CompanyRepository>, config: ReportConfig) -> Result<Self> {
        config.validate()?;
        let prompts = AnalysisPromptBuilder::with_language(config.prompt_language.clone())?;
        let window_cache = config
            .window_cache_enabled
            .then(|| WindowCache::new(config.window_cache_ttl));

        Ok(Self {
            repository,
            collector: None,
            persona_analysis: None,
            prompts,
            window_cache,
            config,
        })
    }

    /// Attach the external data collector used by [`ReportService::refresh`]
    pub fn with_collector(mut self, collector: Arc<dyn CollectorService>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Attach the external persona analysis process
    pub fn with_persona_analysis(mut self, service: Arc<dyn PersonaAnalysisService>) -> Self {
        self.persona_analysis = Some(service);
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Company by exact ticker
    pub async fn company(&self, ticker: &str) -> Result<Company> {
        self.repository
            .company(ticker)
            .await?
            .ok_or_else(|| CoreError::NotFound(ticker.to_string()).into())
    }

    /// Resolve a search query: all-digit queries are tickers, anything else a name fragment
    pub async fn resolve_company(&self, query: &str) -> Result<Company> {
        let query = query.trim();
        let found = if !query.is_empty() && query.chars().all(|c| c.is_ascii_digit()) {
            self.repository.company(query).await?
        } else {
            self.repository.find_by_name(query).await?
        };

        match found {
            Some(company) => {
                debug!(query, ticker = %company.ticker, "Resolved company");
                Ok(company)
            }
            None => Err(CoreError::NotFound(query.to_string()).into()),
        }
    }

    /// Render one artifact for `ticker`
    pub async fn render(&self, ticker: &str, kind: ArtifactKind) -> Result<Artifact> {
        let artifact = match kind {
            ArtifactKind::Overview => self.overview(ticker).await?,
            ArtifactKind::Narratives => self.narratives(ticker).await?,
            ArtifactKind::Chart => self.chart(ticker).await?,
        };
        info!(
            ticker,
            kind = %kind,
            bytes = artifact.content.len(),
            filename = %artifact.filename,
            "Rendered artifact"
        );
        Ok(artifact)
    }

    pub async fn overview(&self, ticker: &str) -> Result<Artifact> {
        let company = self.company(ticker).await?;
        let financials = self
            .repository
            .financials(ticker, self.config.financial_rows)
            .await?;
        let segments = self.repository.segments(ticker).await?;
        let disclosures = self
            .repository
            .disclosures(ticker, self.config.disclosure_limit)
            .await?;

        render_overview(&company, &financials, &segments, &disclosures).inspect_err(|e| {
            warn!(ticker, error = %e, "Overview rendering failed");
        })
    }

    pub async fn narratives(&self, ticker: &str) -> Result<Artifact> {
        let company = self.company(ticker).await?;
        let narratives = self.repository.narratives(ticker).await?;
        let disclosures = self
            .repository
            .disclosures(ticker, self.config.disclosure_limit)
            .await?;

        Ok(render_narratives(&company, &narratives, &disclosures))
    }

    pub async fn chart(&self, ticker: &str) -> Result<Artifact> {
        let company = self.company(ticker).await?;
        let bars = self
            .repository
            .market_bars(ticker, self.config.history_days)
            .await?;

        render_chart(&company, &bars).inspect_err(|e| {
            warn!(ticker, error = %e, "Chart export failed");
        })
    }

    /// Visible window plus support/resistance levels; `None` uses the configured default
    pub async fn chart_view(&self, ticker: &str, visible: Option<usize>) -> Result<ChartView> {
        let visible = visible.unwrap_or(self.config.default_visible_bars);
        let compute = || async move {
            self.company(ticker).await?;
            let bars = self
                .repository
                .market_bars(ticker, self.config.history_days)
                .await?;
            ChartView::new(&bars, visible)
        };

        match &self.window_cache {
            Some(cache) => {
                cache
                    .get_or_compute(WindowKey::new(ticker, visible), compute)
                    .await
            }
            None => compute().await,
        }
    }

    /// Dashboard headline metrics
    pub async fn metrics(&self, ticker: &str) -> Result<MetricsSnapshot> {
        let company = self.company(ticker).await?;
        let financials = self
            .repository
            .financials(ticker, self.config.financial_rows)
            .await?;
        MetricsSnapshot::build(&company, &financials)
    }

    /// Revenue mix of the latest segment period
    pub async fn segment_mix(&self, ticker: &str) -> Result<Vec<SegmentShare>> {
        self.company(ticker).await?;
        let segments = self.repository.segments(ticker).await?;
        Ok(segment_mix(&segments))
    }

    /// Prompt text for one analysis step
    pub async fn analysis_prompt(&self, ticker: &str, step: StepType) -> Result<String> {
        let company = self.company(ticker).await?;
        let financials = self
            .repository
            .financials(ticker, self.config.financial_rows)
            .await?;
        let segments = self.repository.segments(ticker).await?;

        self.prompts.build(step, &company, &financials, &segments)
    }

    /// Korean system prompt of `persona`
    pub fn persona_prompt(&self, persona: Persona) -> Result<String> {
        self.prompts.persona(persona)
    }

    /// Run the external collector, then drop memoized views
    pub async fn refresh(&self, ticker: &str) -> Result<()> {
        let collector = self
            .collector
            .as_ref()
            .ok_or(ReportError::MissingCollaborator("collector"))?;

        info!(ticker, "Requesting data collection");
        collector.refresh(ticker).await.inspect_err(|e| {
            warn!(ticker, error = %e, "Data collection failed");
        })?;

        if let Some(cache) = &self.window_cache {
            cache.clear().await;
        }
        Ok(())
    }

    /// Text produced by the external persona analysis process
    pub async fn persona_analysis(&self, ticker: &str, persona: Persona) -> Result<String> {
        let service = self
            .persona_analysis
            .as_ref()
            .ok_or(ReportError::MissingCollaborator("persona analysis service"))?;

        self.company(ticker).await?;
        info!(ticker, persona = %persona, "Requesting persona analysis");
        Ok(service.generate(ticker, persona.id()).await?)
    }
}

impl std::fmt::Debug for ReportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportService")
            .field("config", &self.config)
            .field("collector", &self.collector.is_some())
            .field("persona_analysis", &self.persona_analysis.is_some())
            .finish_non_exhaustive()
    }
}
