use super::{Artifact, ArtifactKind, disclosure_bullet, recent_disclosures};
use crate::error::Result;
use crate::metrics::format_grouped;
use lens_core::{Company, Disclosure, FinancialRecord, Segment};

/// Corporate overview Markdown: profile, financial table, segment table, disclosures
///
/// Financial rows are ordered by (year desc, quarter desc) with blank cells for
/// missing figures; segment rows by period desc then division asc with `-` for
/// missing figures.
pub fn render_overview(
    company: &Company,
    financials: &[FinancialRecord],
    segments: &[Segment],
    disclosures: &[Disclosure],
) -> Result<Artifact> {
    for record in financials {
        record.validate()?;
    }

    let mut md = format!(
        "# {} ({}) - Corporate Overview\n\n",
        company.name, company.ticker
    );
    md += &format!(
        "**Sector:** {} | **Market:** {}\n",
        or_dash(company.sector.as_deref()),
        or_dash(company.market_type.as_deref())
    );
    md += &format!(
        "**Summary:** {}\n\n",
        or_dash(company.desc_summary.as_deref())
    );

    md += "## 1. Financial Highlights (Recent)\n";
    if financials.is_empty() {
        md += "No financial data available.\n";
    } else {
        md += "| Year | Quarter | Revenue | Op Profit | Net Income | Assets | Liabilities | Equity |\n";
        md += "|---|---|---|---|---|---|---|---|\n";
        let mut rows: Vec<&FinancialRecord> = financials.iter().collect();
        rows.sort_by(|a, b| b.year.cmp(&a.year).then(b.quarter.cmp(&a.quarter)));
        for f in rows {
            let cells = [
                f.revenue,
                f.op_profit,
                f.net_income,
                f.assets,
                f.liabilities,
                f.equity,
            ]
            .map(|v| v.map(format_grouped).unwrap_or_default());
            md += &format!(
                "| {} | {} | {} |\n",
                f.year,
                f.quarter_label(),
                cells.join(" | ")
            );
        }
    }

    md += "\n\n## 2. Segment Performance (Recent)\n";
    if segments.is_empty() {
        md += "No segment data available.\n";
    } else {
        md += "| Period | Division | Revenue (KRW) | Op. Profit (KRW) |\n";
        md += "| :--- | :--- | :--- | :--- |\n";
        let mut rows: Vec<&Segment> = segments.iter().collect();
        rows.sort_by(|a, b| {
            b.period
                .cmp(&a.period)
                .then_with(|| a.division.cmp(&b.division))
        });
        for s in rows {
            md += &format!(
                "| {} | {} | {} | {} |\n",
                s.period,
                s.division,
                grouped_or_dash(s.revenue),
                grouped_or_dash(s.op_profit)
            );
        }
    }

    md += "\n\n## 3. Recent Disclosures\n";
    let recent = recent_disclosures(disclosures);
    if recent.is_empty() {
        md += "No disclosures found.\n";
    } else {
        for d in recent {
            md += &disclosure_bullet(d);
        }
    }

    tracing::debug!(ticker = %company.ticker, bytes = md.len(), "Rendered overview");
    Ok(Artifact::new(
        ArtifactKind::Overview,
        md,
        format!("{}_Overview.md", company.name),
    ))
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

fn grouped_or_dash(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), format_grouped)
}
