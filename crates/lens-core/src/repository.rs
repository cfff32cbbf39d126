//! Injected data-access and collaborator interfaces

use crate::error::Result;
use crate::model::{Company, Disclosure, FinancialRecord, MarketBar, Narrative, Segment};
use async_trait::async_trait;

/// Typed fetch methods over the company data store
///
/// Implementations are opened once per process and shared behind an `Arc`.
/// Size and order contracts are part of the interface:
/// - `financials` returns at most `limit` rows ordered by (year desc, quarter desc)
/// - `market_bars` returns at most the latest `days` bars, in any order
/// - `disclosures` returns at most `limit` rows ordered by receipt date desc
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Look up a company by exact ticker
    async fn company(&self, ticker: &str) -> Result<Option<Company>>;

    /// First company whose name contains `fragment`, case-insensitively
    async fn find_by_name(&self, fragment: &str) -> Result<Option<Company>>;

    async fn financials(&self, ticker: &str, limit: usize) -> Result<Vec<FinancialRecord>>;

    async fn market_bars(&self, ticker: &str, days: usize) -> Result<Vec<MarketBar>>;

    async fn segments(&self, ticker: &str) -> Result<Vec<Segment>>;

    async fn narratives(&self, ticker: &str) -> Result<Vec<Narrative>>;

    async fn disclosures(&self, ticker: &str, limit: usize) -> Result<Vec<Disclosure>>;
}

/// Triggers external data ingestion for a ticker
#[async_trait]
pub trait CollectorService: Send + Sync {
    async fn refresh(&self, ticker: &str) -> Result<()>;
}

/// Invokes an external text-generation process for a persona
#[async_trait]
pub trait PersonaAnalysisService: Send + Sync {
    async fn generate(&self, ticker: &str, persona: &str) -> Result<String>;
}
