//! Derived valuation ratios and KRW magnitude formatting

use crate::error::Result;
use lens_core::{Company, FinancialRecord, Segment};
use serde::Serialize;
use std::fmt;

const JO: i64 = 1_000_000_000_000;
const EOK: i64 = 100_000_000;

/// A valuation ratio and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "source", content = "value", rename_all = "lowercase")]
pub enum RatioValue {
    /// Present in the source record; rendered as stored
    Reported(f64),
    /// Computed by a fallback formula; rendered to two decimals
    Derived(f64),
}

impl RatioValue {
    pub fn value(&self) -> f64 {
        match self {
            RatioValue::Reported(v) | RatioValue::Derived(v) => *v,
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, RatioValue::Derived(_))
    }
}

impl fmt::Display for RatioValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioValue::Reported(v) => write!(f, "{v}"),
            RatioValue::Derived(v) => write!(f, "{v:.2}"),
        }
    }
}

/// PER and PBR of the latest financial record
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Ratios {
    pub per: Option<RatioValue>,
    pub pbr: Option<RatioValue>,
}

impl Ratios {
    /// PER as rendered text, `-` when unavailable
    pub fn per_text(&self) -> String {
        display_or_dash(self.per)
    }

    /// PBR as rendered text, `-` when unavailable
    pub fn pbr_text(&self) -> String {
        display_or_dash(self.pbr)
    }
}

fn display_or_dash<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Fill PER and PBR, deriving each only when it is absent and its inputs are present
///
/// - PER: `market_cap / (net_income * factor)` where `factor` is 1 for annual records
///   and 4 for quarterly ones; requires `eps`, `market_cap` and a non-zero `net_income`
/// - PBR: `market_cap / equity`; requires `market_cap` and a non-zero `equity`
///
/// # Examples
///
/// ```
/// use lens_core::{Company, FinancialRecord};
/// use lens_report::fill_ratios;
///
/// let mut company = Company::new("005930", "삼성전자");
/// company.market_cap = Some(1_000_000_000_000);
///
/// let mut record = FinancialRecord::new(2024, 0);
/// record.net_income = Some(50_000_000_000);
/// record.eps = Some(1200.0);
///
/// let ratios = fill_ratios(&company, Some(&record)).unwrap();
/// assert_eq!(ratios.per_text(), "20.00");
/// assert_eq!(ratios.pbr_text(), "-");
/// ```
pub fn fill_ratios(company: &Company, latest: Option<&FinancialRecord>) -> Result<Ratios> {
    let Some(record) = latest else {
        return Ok(Ratios::default());
    };
    record.validate()?;

    let per = record.per.map(RatioValue::Reported).or_else(|| {
        let market_cap = company.market_cap?;
        record.eps?;
        let net_income = record.net_income.filter(|&n| n != 0)?;
        let factor = if record.is_annual() { 1.0 } else { 4.0 };
        let derived = market_cap as f64 / (net_income as f64 * factor);
        tracing::debug!(ticker = %company.ticker, per = derived, "Derived fallback PER");
        Some(RatioValue::Derived(derived))
    });

    let pbr = record.pbr.map(RatioValue::Reported).or_else(|| {
        let market_cap = company.market_cap?;
        let equity = record.equity.filter(|&e| e != 0)?;
        let derived = market_cap as f64 / equity as f64;
        tracing::debug!(ticker = %company.ticker, pbr = derived, "Derived fallback PBR");
        Some(RatioValue::Derived(derived))
    });

    Ok(Ratios { per, pbr })
}

/// Render a KRW amount with 조 / 억 magnitudes
///
/// # Examples
///
/// ```
/// use lens_report::format_money;
///
/// assert_eq!(format_money(Some(1_250_000_000_000)), "1.3조");
/// assert_eq!(format_money(Some(500_000_000)), "5억");
/// assert_eq!(format_money(Some(12_345_678)), "12,345,678");
/// assert_eq!(format_money(Some(0)), "-");
/// assert_eq!(format_money(None), "-");
/// ```
pub fn format_money(value: Option<i64>) -> String {
    match value {
        None | Some(0) => "-".to_string(),
        Some(v) if v >= JO => {
            let tenths = (v as f64 / (JO as f64 / 10.0)).round() / 10.0;
            format!("{tenths:.1}조")
        }
        Some(v) if v >= EOK => format!("{}억", (v as f64 / EOK as f64).round() as i64),
        Some(v) => format_grouped(v),
    }
}

/// Thousands-grouped integer, e.g. `-1,234,567`
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Headline metrics of the company dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub market_cap: String,
    pub per: String,
    pub pbr: String,
    pub roe: String,
    pub rnd_expenses: String,
    #[serde(skip)]
    pub ratios: Ratios,
}

impl MetricsSnapshot {
    /// Build from the company and its financials, latest first
    pub fn build(company: &Company, financials: &[FinancialRecord]) -> Result<Self> {
        let latest = financials.first();
        let ratios = fill_ratios(company, latest)?;

        Ok(Self {
            market_cap: format_money(company.market_cap),
            per: ratios.per.map_or_else(|| "-".to_string(), |v| format!("{v}배")),
            pbr: ratios.pbr.map_or_else(|| "-".to_string(), |v| format!("{v}배")),
            roe: latest
                .and_then(|r| r.roe)
                .map_or_else(|| "-".to_string(), |v| format!("{v}%")),
            rnd_expenses: format_money(latest.and_then(|r| r.rnd_expenses)),
            ratios,
        })
    }

    /// `(label, value)` pairs in dashboard order
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("시가총액", &self.market_cap),
            ("주가수익비율(PER)", &self.per),
            ("주가순자산비율(PBR)", &self.pbr),
            ("자기자본이익률(ROE)", &self.roe),
            ("연구개발비(R&D)", &self.rnd_expenses),
        ]
    }
}

/// One division's share of the latest period's revenue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentShare {
    pub period: String,
    pub division: String,
    pub revenue: i64,
    /// Share of total revenue, 0..=100
    pub percent: f64,
}

/// Revenue mix of the most recent period, largest division first
///
/// Divisions without a reported revenue are left out. Returns an empty list when the
/// latest period has no positive total.
pub fn segment_mix(segments: &[Segment]) -> Vec<SegmentShare> {
    let Some(latest) = segments.iter().map(|s| s.period.as_str()).max() else {
        return Vec::new();
    };

    let rows: Vec<(&Segment, i64)> = segments
        .iter()
        .filter(|s| s.period == latest)
        .filter_map(|s| s.revenue.map(|r| (s, r)))
        .collect();
    let total: i64 = rows.iter().map(|(_, r)| *r).sum();
    if total <= 0 {
        return Vec::new();
    }

    let mut shares: Vec<SegmentShare> = rows
        .into_iter()
        .map(|(s, revenue)| SegmentShare {
            period: s.period.clone(),
            division: s.division.clone(),
            revenue,
            percent: revenue as f64 / total as f64 * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| a.division.cmp(&b.division))
    });
    shares
}
