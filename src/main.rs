//! price-sync - bulk catalog price updater
//!
//! Reads prices from a CSV export and pushes them to the catalog pricing API

use catalog_price_sync::config::{PriceUnits, PricingMode, SyncConfig};
use catalog_price_sync::core::batch::{BatchOrchestrator, write_report_json};
use catalog_price_sync::utils::logging::{LogFormat, init_logging};
use catalog_price_sync::{Result, VERSION};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "price-sync", version, about = "Bulk price updates for catalog items")]
struct Cli {
    /// Input CSV file (overrides CSV_FILE_PATH)
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Maximum number of concurrent requests (overrides RATE_LIMIT)
    #[arg(long, value_name = "N")]
    rate_limit: Option<usize>,

    /// Identifier mode: direct or reference_lookup (overrides PRICING_MODE)
    #[arg(long)]
    mode: Option<PricingMode>,

    /// Price units: minor_unit_rounded or major_unit_integer (overrides PRICE_UNITS)
    #[arg(long)]
    units: Option<PriceUnits>,

    /// Copy the base price into the cost price field
    #[arg(long)]
    mirror_cost_price: bool,

    /// Write the final report as JSON to this file
    #[arg(long, value_name = "PATH")]
    report_json: Option<PathBuf>,

    /// Log output format: text or json
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

impl Cli {
    fn apply(&self, config: &mut SyncConfig) {
        if let Some(csv) = &self.csv {
            config.csv_file_path = csv.clone();
        }
        if let Some(rate_limit) = self.rate_limit {
            config.rate_limit = rate_limit;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(units) = self.units {
            config.units = units;
        }
        if self.mirror_cost_price {
            config.mirror_cost_price = true;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env must be loaded before clap reads LOG_FORMAT
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.log_format);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    info!("price-sync {}", VERSION);

    let mut config = SyncConfig::from_env()?;
    cli.apply(&mut config);
    info!("Configuration: {:?}", config);

    let mut orchestrator = BatchOrchestrator::from_config(config)?;
    let report = orchestrator.run().await?;

    if let Some(path) = &cli.report_json {
        write_report_json(&report, path)?;
    }
    Ok(())
}
