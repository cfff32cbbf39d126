//! Subcommand execution

use crate::cli::Command;
use anyhow::{Context, Result};
use comfy_table::{Table, presets::UTF8_FULL};
use lens_core::{InMemoryRepository, Snapshot};
use lens_report::{Persona, ReportConfig, ReportService, format_grouped};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Load a JSON snapshot file into an in-memory repository
pub fn load_repository(path: &Path) -> Result<InMemoryRepository> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot = Snapshot::from_json(&json)?;
    let repository = InMemoryRepository::new(snapshot);
    info!(path = %path.display(), companies = repository.len(), "Loaded snapshot");
    Ok(repository)
}

/// Build the service over `path` with environment-adjusted configuration
pub fn build_service(path: &Path) -> Result<ReportService> {
    let repository = Arc::new(load_repository(path)?);
    let config = ReportConfig::default().with_env()?;
    Ok(ReportService::new(repository, config)?)
}

/// Run one subcommand and return what should be printed
pub async fn run(service: &ReportService, command: Command) -> Result<String> {
    match command {
        Command::Report { company, kind, out } => {
            let company = service.resolve_company(&company).await?;
            let artifact = service.render(&company.ticker, kind).await?;
            match out {
                Some(dir) => {
                    let path = write_artifact(&dir, &artifact.filename, &artifact.content)?;
                    Ok(format!("Wrote {} ({})", path.display(), artifact.content_type))
                }
                None => Ok(artifact.content),
            }
        }
        Command::Prompt { company, step } => {
            let company = service.resolve_company(&company).await?;
            Ok(service.analysis_prompt(&company.ticker, step).await?)
        }
        Command::Persona { persona } => Ok(service.persona_prompt(Persona::from_id(&persona))?),
        Command::Levels { company, visible } => {
            let company = service.resolve_company(&company).await?;
            let view = service.chart_view(&company.ticker, visible).await?;

            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(vec!["Price", "Volume"]);
            for level in &view.levels {
                table.add_row(vec![format!("{:.0}", level.price), format_grouped(level.weight as i64)]);
            }
            Ok(format!(
                "{} ({}) - last {} of {} bars (zoom in: {}, zoom out: {})\n{table}",
                company.name,
                company.ticker,
                view.bars.len(),
                view.total,
                view.zoom_in_count(),
                view.zoom_out_count()
            ))
        }
        Command::Metrics { company } => {
            let company = service.resolve_company(&company).await?;
            let metrics = service.metrics(&company.ticker).await?;
            let mix = service.segment_mix(&company.ticker).await?;

            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
            for (label, value) in metrics.entries() {
                table.add_row(vec![label, value]);
            }

            let mut out = format!("{} ({})\n{table}", company.name, company.ticker);
            if !mix.is_empty() {
                let mut segments = Table::new();
                segments
                    .load_preset(UTF8_FULL)
                    .set_header(vec!["Period", "Division", "Revenue", "Share"]);
                for share in &mix {
                    segments.add_row(vec![
                        share.period.clone(),
                        share.division.clone(),
                        format_grouped(share.revenue),
                        format!("{:.1}%", share.percent),
                    ]);
                }
                out += &format!("\n{segments}");
            }
            Ok(out)
        }
        Command::Search { query } => {
            let company = service.resolve_company(&query).await?;
            Ok(serde_json::to_string_pretty(&company)?)
        }
    }
}

fn write_artifact(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(filename);
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
