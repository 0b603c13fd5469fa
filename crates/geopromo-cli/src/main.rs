mod commands;
mod replay;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use geopromo_core::OfferCategory;
use geopromo_geofence::OfferSort;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "geopromo-cli")]
#[command(about = "Zone-based offer engine command line interface")]
struct Cli {
    /// Catalog file; overrides `GEOPROMO_CATALOG_PATH`.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog zones in tie-break order.
    Zones,
    /// Resolve one coordinate and list the zone's offers.
    Resolve {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long)]
        category: Option<OfferCategory>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "newest")]
        sort: OfferSort,
    },
    /// Feed a samples file through a session, then claim offers.
    Replay {
        samples: PathBuf,
        /// Delay between samples.
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
        /// Offer id to claim after the replay; repeatable.
        #[arg(long = "claim")]
        claims: Vec<String>,
        /// Print the final session summary as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = geopromo_core::load_app_config().context("failed to load configuration")?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog_path = cli.catalog.unwrap_or_else(|| config.catalog_path.clone());
    let catalog = geopromo_core::load_catalog(&catalog_path)
        .with_context(|| format!("failed to load catalog from {}", catalog_path.display()))?;
    tracing::info!(
        env = %config.env,
        path = %catalog_path.display(),
        zones = catalog.zones.len(),
        offers = catalog.offers.len(),
        "catalog loaded"
    );

    match cli.command {
        Commands::Zones => commands::run_zones(&catalog),
        Commands::Resolve {
            lat,
            lng,
            category,
            search,
            sort,
        } => {
            let query = geopromo_geofence::OfferQuery {
                category,
                search,
                sort,
            };
            commands::run_resolve(&catalog, &config, lat, lng, &query);
        }
        Commands::Replay {
            samples,
            interval_ms,
            claims,
            json,
        } => {
            let options = commands::ReplayOptions {
                samples_path: samples,
                interval: std::time::Duration::from_millis(interval_ms),
                claims,
                json,
            };
            commands::run_replay(catalog, &config, options).await?;
        }
    }

    Ok(())
}
