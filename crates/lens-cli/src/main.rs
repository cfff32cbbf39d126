//! Command-line interface for corp-lens
//!
//! # Usage
//!
//! ```bash
//! lens --snapshot data.json report 005930 --kind overview --out reports/
//! lens --snapshot data.json prompt 삼성전자 --step valuation
//! lens --snapshot data.json levels 005930 --visible 60
//! ```

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use lens_utils::LogFormat;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    lens_utils::init_tracing_with("warn", format);

    let app = lens_utils::Config::from_env();
    info!(app = %app.app_name, environment = app.environment.as_str(), "Starting");

    let service = commands::build_service(&cli.snapshot)?;
    let output = commands::run(&service, cli.command).await?;
    println!("{output}");

    Ok(())
}
