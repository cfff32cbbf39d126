//! Deterministic report artifacts
//!
//! Each renderer returns an [`Artifact`] holding the content, the suggested filename and
//! the MIME type. Rendering embeds no timestamps, so identical inputs always produce
//! byte-identical output.

mod chart;
mod narratives;
mod overview;

pub use chart::{CHART_HEADER, render_chart};
pub use narratives::render_narratives;
pub use overview::render_overview;

use crate::error::ReportError;
use lens_core::Disclosure;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Disclosures listed in any report
pub const MAX_DISCLOSURES: usize = 10;

pub const MARKDOWN: &str = "text/markdown";
pub const CSV: &str = "text/csv";

/// The three downloadable artifact types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Overview,
    Narratives,
    Chart,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Overview,
        ArtifactKind::Narratives,
        ArtifactKind::Chart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Overview => "overview",
            ArtifactKind::Narratives => "narratives",
            ArtifactKind::Chart => "chart",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactKind::Overview | ArtifactKind::Narratives => MARKDOWN,
            ArtifactKind::Chart => CSV,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overview" => Ok(ArtifactKind::Overview),
            "narratives" => Ok(ArtifactKind::Narratives),
            "chart" => Ok(ArtifactKind::Chart),
            other => Err(ReportError::UnknownKind(other.to_string())),
        }
    }
}

/// A rendered report ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub content: String,
    /// Suggested download filename
    pub filename: String,
    pub content_type: &'static str,
}

impl Artifact {
    fn new(kind: ArtifactKind, content: String, filename: String) -> Self {
        Self {
            kind,
            content,
            filename,
            content_type: kind.content_type(),
        }
    }

    /// `(content, filename, content_type)`
    pub fn into_parts(self) -> (String, String, &'static str) {
        (self.content, self.filename, self.content_type)
    }
}

/// Up to [`MAX_DISCLOSURES`] disclosures, newest first
fn recent_disclosures(disclosures: &[Disclosure]) -> Vec<&Disclosure> {
    let mut rows: Vec<&Disclosure> = disclosures.iter().collect();
    rows.sort_by(|a, b| b.rcept_dt.cmp(&a.rcept_dt));
    rows.truncate(MAX_DISCLOSURES);
    rows
}

fn disclosure_bullet(d: &Disclosure) -> String {
    format!("- **{}** [{}]({})\n", d.rcept_dt, d.report_nm, d.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("overview".parse::<ArtifactKind>().unwrap(), ArtifactKind::Overview);
        assert_eq!(" Chart ".parse::<ArtifactKind>().unwrap(), ArtifactKind::Chart);
        assert!(matches!(
            "pdf".parse::<ArtifactKind>(),
            Err(ReportError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_kind_content_type() {
        assert_eq!(ArtifactKind::Overview.content_type(), "text/markdown");
        assert_eq!(ArtifactKind::Narratives.content_type(), "text/markdown");
        assert_eq!(ArtifactKind::Chart.content_type(), "text/csv");
    }

    #[test]
    fn test_recent_disclosures_order_and_limit() {
        let rows: Vec<Disclosure> = (1..=12)
            .map(|d| Disclosure {
                rcept_dt: format!("202401{d:02}"),
                report_nm: format!("report {d}"),
                url: format!("https://dart.fss.or.kr/{d}"),
            })
            .collect();
        let recent = recent_disclosures(&rows);
        assert_eq!(recent.len(), MAX_DISCLOSURES);
        assert_eq!(recent[0].rcept_dt, "20240112");
        assert_eq!(recent[9].rcept_dt, "20240103");
    }
}
