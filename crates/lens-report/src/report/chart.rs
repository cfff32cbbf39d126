use super::{Artifact, ArtifactKind};
use crate::error::Result;
use crate::timeseries::sort_bars;
use lens_core::{Company, MarketBar, validate_bars};

/// Column header of the chart export
pub const CHART_HEADER: &str = "date,open,high,low,close,volume,ma5,ma20,ma60";

/// OHLCV CSV, one row per bar in ascending date order
///
/// Missing moving averages become empty fields. An empty series yields the header
/// line alone.
pub fn render_chart(company: &Company, bars: &[MarketBar]) -> Result<Artifact> {
    validate_bars(bars)?;

    let rows: Vec<String> = sort_bars(bars).iter().map(csv_row).collect();
    let csv = format!("{CHART_HEADER}\n{}", rows.join("\n"));

    tracing::debug!(ticker = %company.ticker, rows = rows.len(), "Rendered chart");
    Ok(Artifact::new(
        ArtifactKind::Chart,
        csv,
        format!("{}_Chart.csv", company.ticker),
    ))
}

fn csv_row(bar: &MarketBar) -> String {
    let ma = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    format!(
        "{},{},{},{},{},{},{},{},{}",
        bar.date,
        bar.open,
        bar.high,
        bar.low,
        bar.close,
        bar.volume,
        ma(bar.ma5),
        ma(bar.ma20),
        ma(bar.ma60)
    )
}
