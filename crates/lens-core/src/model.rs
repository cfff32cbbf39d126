//! Typed entity snapshots
//!
//! Every record here is a read-only snapshot supplied by a [`CompanyRepository`](crate::CompanyRepository).
//! Optional values are modeled as `Option` so that a reported `0` is never confused with a
//! missing figure. Floating point fields are checked by the `validate` methods before any
//! arithmetic or rendering touches them.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity anchor for every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub market_type: Option<String>,
    #[serde(default)]
    pub desc_summary: Option<String>,
    /// Market capitalization in KRW
    #[serde(default)]
    pub market_cap: Option<i64>,
    #[serde(default)]
    pub est_dt: Option<String>,
    #[serde(default)]
    pub listing_dt: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Company {
    /// Minimal company with only identity fields set
    pub fn new(ticker: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            sector: None,
            market_type: None,
            desc_summary: None,
            market_cap: None,
            est_dt: None,
            listing_dt: None,
            updated_at: None,
        }
    }
}

/// One annual (`quarter == 0`) or quarterly financial statement summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub year: i32,
    /// `0` denotes an annual record, `1..=4` a quarter
    pub quarter: u8,
    #[serde(default)]
    pub revenue: Option<i64>,
    #[serde(default)]
    pub op_profit: Option<i64>,
    #[serde(default)]
    pub net_income: Option<i64>,
    #[serde(default)]
    pub assets: Option<i64>,
    #[serde(default)]
    pub liabilities: Option<i64>,
    #[serde(default)]
    pub equity: Option<i64>,
    #[serde(default)]
    pub eps: Option<f64>,
    #[serde(default)]
    pub per: Option<f64>,
    #[serde(default)]
    pub pbr: Option<f64>,
    #[serde(default)]
    pub roe: Option<f64>,
    #[serde(default)]
    pub rnd_expenses: Option<i64>,
}

impl FinancialRecord {
    /// Empty record for the given period
    pub fn new(year: i32, quarter: u8) -> Self {
        Self {
            year,
            quarter,
            revenue: None,
            op_profit: None,
            net_income: None,
            assets: None,
            liabilities: None,
            equity: None,
            eps: None,
            per: None,
            pbr: None,
            roe: None,
            rnd_expenses: None,
        }
    }

    /// Whether this is a full-year record
    pub fn is_annual(&self) -> bool {
        self.quarter == 0
    }

    /// Display label used in report tables: `Yearly` or `{n}Q`
    pub fn quarter_label(&self) -> String {
        if self.is_annual() {
            "Yearly".to_string()
        } else {
            format!("{}Q", self.quarter)
        }
    }

    pub fn validate(&self) -> Result<()> {
        let entity = format!("financial record {}/{}", self.year, self.quarter);
        for (field, value) in [
            ("eps", self.eps),
            ("per", self.per),
            ("pbr", self.pbr),
            ("roe", self.roe),
        ] {
            check_finite(&entity, field, value)?;
        }
        Ok(())
    }
}

/// One trading day's OHLCV bar with precomputed moving averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    #[serde(default)]
    pub ma5: Option<f64>,
    #[serde(default)]
    pub ma20: Option<f64>,
    #[serde(default)]
    pub ma60: Option<f64>,
}

impl MarketBar {
    /// Bar with identical open/high/low/close and no moving averages
    pub fn flat(date: NaiveDate, close: f64, volume: u64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume,
            ma5: None,
            ma20: None,
            ma60: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let entity = format!("market bar {}", self.date);
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            check_finite(&entity, field, Some(value))?;
        }
        for (field, value) in [("ma5", self.ma5), ("ma20", self.ma20), ("ma60", self.ma60)] {
            check_finite(&entity, field, value)?;
        }
        Ok(())
    }
}

/// Validate every bar of a series, stopping at the first bad one
pub fn validate_bars(bars: &[MarketBar]) -> Result<()> {
    bars.iter().try_for_each(MarketBar::validate)
}

/// Revenue and operating profit of one business division for one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub period: String,
    pub division: String,
    #[serde(default)]
    pub revenue: Option<i64>,
    #[serde(default)]
    pub op_profit: Option<i64>,
}

/// Fixed narrative section vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    #[serde(rename = "Key Takeaways")]
    KeyTakeaways,
    #[serde(rename = "Business Overview")]
    BusinessOverview,
    #[serde(rename = "MD&A")]
    Mdna,
    #[serde(rename = "News")]
    News,
    /// Anything outside the vocabulary; never rendered
    #[serde(other)]
    Other,
}

impl SectionType {
    /// Render order for narrative reports
    pub const ORDER: [SectionType; 4] = [
        SectionType::KeyTakeaways,
        SectionType::BusinessOverview,
        SectionType::Mdna,
        SectionType::News,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::KeyTakeaways => "Key Takeaways",
            SectionType::BusinessOverview => "Business Overview",
            SectionType::Mdna => "MD&A",
            SectionType::News => "News",
            SectionType::Other => "Other",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted text from a periodic report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    #[serde(default)]
    pub id: i64,
    pub period: String,
    pub section_type: SectionType,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
}

/// Regulatory filing reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclosure {
    pub rcept_dt: String,
    pub report_nm: String,
    pub url: String,
}

/// Derived price level with its accumulated bucket volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceLevel {
    pub price: f64,
    pub weight: u64,
}

fn check_finite(entity: &str, field: &'static str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => {
            tracing::warn!(entity, field, value = v, "Rejected non-finite numeric field");
            Err(Error::invalid_numeric(entity, field, v))
        }
        _ => Ok(()),
    }
}
