use super::{Artifact, ArtifactKind, disclosure_bullet, recent_disclosures};
use lens_core::{Company, Disclosure, Narrative, SectionType};

const PLACEHOLDER: &str =
    "> [!NOTE]\n> Detailed text analysis will be available in the next update.\n\n";

fn section_header(section: SectionType) -> Option<&'static str> {
    match section {
        SectionType::BusinessOverview => Some("1. Business Overview"),
        SectionType::Mdna => Some("2. MD&A"),
        SectionType::News => Some("3. News & Conference Call Summary"),
        SectionType::KeyTakeaways | SectionType::Other => None,
    }
}

/// Deep-dive Markdown for the most recent narrative period
///
/// Rows are ordered by period desc then id asc; only the first row's period is
/// rendered, section by section in [`SectionType::ORDER`]. Sections outside that
/// vocabulary are skipped.
pub fn render_narratives(
    company: &Company,
    narratives: &[Narrative],
    disclosures: &[Disclosure],
) -> Artifact {
    let mut md = format!(
        "# {} ({}) - Deep Dive Narratives\n\n",
        company.name, company.ticker
    );

    let mut rows: Vec<&Narrative> = narratives.iter().collect();
    rows.sort_by(|a, b| b.period.cmp(&a.period).then(a.id.cmp(&b.id)));

    match rows.first().map(|n| n.period.as_str()) {
        None => md += PLACEHOLDER,
        Some(latest) => {
            md += &format!("## 분기보고서 ({latest}) Key Takeaways\n");
            let current: Vec<&Narrative> =
                rows.iter().copied().filter(|n| n.period == latest).collect();

            for section in SectionType::ORDER {
                let section_rows: Vec<&Narrative> = current
                    .iter()
                    .copied()
                    .filter(|n| n.section_type == section)
                    .collect();
                if section_rows.is_empty() {
                    continue;
                }
                if let Some(header) = section_header(section) {
                    md += &format!("## {header}\n");
                }
                for row in section_rows {
                    if let Some(title) = row.title.as_deref().filter(|t| !t.is_empty()) {
                        md += &format!("### {title}\n");
                    }
                    md += &format!("{}\n\n", row.content);
                }
            }
        }
    }

    let recent = recent_disclosures(disclosures);
    if !recent.is_empty() {
        md += "---\n## Reference Links\n";
        for d in recent {
            md += &disclosure_bullet(d);
        }
    }

    tracing::debug!(ticker = %company.ticker, bytes = md.len(), "Rendered narratives");
    Artifact::new(
        ArtifactKind::Narratives,
        md,
        format!("{}_Narratives.md", company.name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrative(id: i64, period: &str, section: SectionType, title: Option<&str>, content: &str) -> Narrative {
        Narrative {
            id,
            period: period.to_string(),
            section_type: section,
            title: title.map(str::to_string),
            content: content.to_string(),
        }
    }

    fn company() -> Company {
        Company::new("035720", "카카오")
    }

    #[test]
    fn test_placeholder_without_narratives() {
        let artifact = render_narratives(&company(), &[], &[]);
        assert_eq!(
            artifact.content,
            "# 카카오 (035720) - Deep Dive Narratives\n\n\
             > [!NOTE]\n> Detailed text analysis will be available in the next update.\n\n"
        );
        assert_eq!(artifact.filename, "카카오_Narratives.md");
    }

    #[test]
    fn test_latest_period_in_section_order() {
        let rows = [
            narrative(4, "2024.1Q", SectionType::News, None, "컨퍼런스콜 요약"),
            narrative(1, "2023.4Q", SectionType::BusinessOverview, None, "old"),
            narrative(3, "2024.1Q", SectionType::BusinessOverview, Some("주요 제품"), "플랫폼"),
            narrative(2, "2024.1Q", SectionType::KeyTakeaways, None, "핵심 요약"),
            narrative(5, "2024.1Q", SectionType::Other, None, "ignored"),
        ];
        let md = render_narratives(&company(), &rows, &[]).content;
        assert_eq!(
            md,
            "# 카카오 (035720) - Deep Dive Narratives\n\n\
             ## 분기보고서 (2024.1Q) Key Takeaways\n\
             핵심 요약\n\n\
             ## 1. Business Overview\n\
             ### 주요 제품\n\
             플랫폼\n\n\
             ## 3. News & Conference Call Summary\n\
             컨퍼런스콜 요약\n\n"
        );
    }

    #[test]
    fn test_rows_within_section_follow_id() {
        let rows = [
            narrative(9, "2024", SectionType::Mdna, Some("B"), "second"),
            narrative(2, "2024", SectionType::Mdna, Some("A"), "first"),
        ];
        let md = render_narratives(&company(), &rows, &[]).content;
        let first = md.find("first").unwrap();
        let second = md.find("second").unwrap();
        assert!(first < second);
        assert!(md.contains("## 2. MD&A\n"));
    }

    #[test]
    fn test_reference_links() {
        let disclosures = [Disclosure {
            rcept_dt: "20240514".to_string(),
            report_nm: "분기보고서 (2024.03)".to_string(),
            url: "https://dart.fss.or.kr/x".to_string(),
        }];
        let md = render_narratives(&company(), &[], &disclosures).content;
        assert!(md.ends_with(
            "---\n## Reference Links\n- **20240514** [분기보고서 (2024.03)](https://dart.fss.or.kr/x)\n"
        ));
    }
}
