//! In-memory repository backed by a serializable snapshot

use crate::error::{Error, Result};
use crate::model::{Company, Disclosure, FinancialRecord, MarketBar, Narrative, Segment};
use crate::repository::CompanyRepository;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything stored for one company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyBundle {
    pub company: Company,
    #[serde(default)]
    pub financials: Vec<FinancialRecord>,
    #[serde(default)]
    pub market: Vec<MarketBar>,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub narratives: Vec<Narrative>,
    #[serde(default)]
    pub disclosures: Vec<Disclosure>,
}

impl CompanyBundle {
    pub fn new(company: Company) -> Self {
        Self {
            company,
            financials: Vec::new(),
            market: Vec::new(),
            segments: Vec::new(),
            narratives: Vec::new(),
            disclosures: Vec::new(),
        }
    }
}

/// Serialized form of a whole data store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub companies: Vec<CompanyBundle>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Storage(format!("Invalid snapshot: {e}")))
    }
}

/// [`CompanyRepository`] over an immutable [`Snapshot`]
///
/// Honors the same ordering and limit contracts as a SQL-backed store would.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    order: Vec<String>,
    bundles: HashMap<String, CompanyBundle>,
}

impl InMemoryRepository {
    pub fn new(snapshot: Snapshot) -> Self {
        let mut order = Vec::with_capacity(snapshot.companies.len());
        let mut bundles = HashMap::with_capacity(snapshot.companies.len());
        for bundle in snapshot.companies {
            let ticker = bundle.company.ticker.clone();
            if bundles.insert(ticker.clone(), bundle).is_none() {
                order.push(ticker);
            }
        }
        Self { order, bundles }
    }

    /// Number of companies held
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn bundle(&self, ticker: &str) -> Option<&CompanyBundle> {
        self.bundles.get(ticker)
    }
}

impl From<Snapshot> for InMemoryRepository {
    fn from(snapshot: Snapshot) -> Self {
        Self::new(snapshot)
    }
}

#[async_trait]
impl CompanyRepository for InMemoryRepository {
    async fn company(&self, ticker: &str) -> Result<Option<Company>> {
        Ok(self.bundle(ticker).map(|b| b.company.clone()))
    }

    async fn find_by_name(&self, fragment: &str) -> Result<Option<Company>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .order
            .iter()
            .filter_map(|ticker| self.bundles.get(ticker))
            .find(|b| b.company.name.to_lowercase().contains(&needle))
            .map(|b| b.company.clone()))
    }

    async fn financials(&self, ticker: &str, limit: usize) -> Result<Vec<FinancialRecord>> {
        let mut rows = self
            .bundle(ticker)
            .map(|b| b.financials.clone())
            .unwrap_or_default();
        rows.sort_by(|a, b| b.year.cmp(&a.year).then(b.quarter.cmp(&a.quarter)));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn market_bars(&self, ticker: &str, days: usize) -> Result<Vec<MarketBar>> {
        let mut bars = self
            .bundle(ticker)
            .map(|b| b.market.clone())
            .unwrap_or_default();
        bars.sort_by(|a, b| b.date.cmp(&a.date));
        bars.truncate(days);
        Ok(bars)
    }

    async fn segments(&self, ticker: &str) -> Result<Vec<Segment>> {
        Ok(self
            .bundle(ticker)
            .map(|b| b.segments.clone())
            .unwrap_or_default())
    }

    async fn narratives(&self, ticker: &str) -> Result<Vec<Narrative>> {
        Ok(self
            .bundle(ticker)
            .map(|b| b.narratives.clone())
            .unwrap_or_default())
    }

    async fn disclosures(&self, ticker: &str, limit: usize) -> Result<Vec<Disclosure>> {
        let mut rows = self
            .bundle(ticker)
            .map(|b| b.disclosures.clone())
            .unwrap_or_default();
        rows.sort_by(|a, b| b.rcept_dt.cmp(&a.rcept_dt));
        rows.truncate(limit);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_snapshot() -> Snapshot {
        let mut samsung = CompanyBundle::new(Company::new("005930", "삼성전자"));
        samsung.financials = vec![
            FinancialRecord::new(2022, 0),
            FinancialRecord::new(2024, 1),
            FinancialRecord::new(2023, 0),
            FinancialRecord::new(2024, 2),
        ];
        samsung.market = (1..=5)
            .map(|d| {
                MarketBar::flat(
                    NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
                    70_000.0 + f64::from(d),
                    100,
                )
            })
            .collect();
        samsung.disclosures = vec![
            Disclosure {
                rcept_dt: "20240102".to_string(),
                report_nm: "A".to_string(),
                url: "https://dart.fss.or.kr/a".to_string(),
            },
            Disclosure {
                rcept_dt: "20240315".to_string(),
                report_nm: "B".to_string(),
                url: "https://dart.fss.or.kr/b".to_string(),
            },
        ];

        let hynix = CompanyBundle::new(Company::new("000660", "SK하이닉스"));
        Snapshot {
            companies: vec![samsung, hynix],
        }
    }

    #[tokio::test]
    async fn test_company_lookup() {
        let repo = InMemoryRepository::new(sample_snapshot());
        assert_eq!(repo.len(), 2);

        let company = repo.company("005930").await.unwrap().unwrap();
        assert_eq!(company.name, "삼성전자");
        assert!(repo.company("999999").await.unwrap().is_none());

        let found = repo.find_by_name("sk").await.unwrap().unwrap();
        assert_eq!(found.ticker, "000660");
    }

    #[tokio::test]
    async fn test_financials_order_and_limit() {
        let repo = InMemoryRepository::new(sample_snapshot());
        let rows = repo.financials("005930", 3).await.unwrap();
        let periods: Vec<_> = rows.iter().map(|r| (r.year, r.quarter)).collect();
        assert_eq!(periods, vec![(2024, 2), (2024, 1), (2023, 0)]);
    }

    #[tokio::test]
    async fn test_market_bars_latest_days() {
        let repo = InMemoryRepository::new(sample_snapshot());
        let bars = repo.market_bars("005930", 2).await.unwrap();
        assert_eq!(bars.len(), 2);
        assert!(bars.iter().all(|b| b.close >= 70_004.0));
    }

    #[tokio::test]
    async fn test_disclosures_desc() {
        let repo = InMemoryRepository::new(sample_snapshot());
        let rows = repo.disclosures("005930", 10).await.unwrap();
        assert_eq!(rows[0].report_nm, "B");

        let none = repo.disclosures("000660", 10).await.unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_snapshot_from_json() {
        let snapshot = Snapshot::from_json(
            r#"{"companies": [{"company": {"ticker": "035420", "name": "NAVER"}}]}"#,
        )
        .unwrap();
        assert_eq!(snapshot.companies.len(), 1);
        assert!(snapshot.companies[0].market.is_empty());

        assert!(Snapshot::from_json("{not json").is_err());
    }
}
