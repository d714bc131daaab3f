use clap::Parser;
use log::warn;
use rickdex::catalog::{Species, Status};
use rickdex::core::config::{self, CliOverrides, RickdexConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "rickdex", about = "Browse the Rick and Morty character catalog")]
struct Args {
    /// Catalog API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Only show characters with this status
    #[arg(long, value_enum)]
    status: Option<Status>,

    /// Only show characters of this species
    #[arg(long, value_enum)]
    species: Option<Species>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to rickdex.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("rickdex.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("{}, falling back to defaults", e);
        RickdexConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        status: args.status,
        species: args.species,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Rickdex starting up (base_url={}, filters={})",
        resolved.base_url,
        resolved.filters
    );

    rickdex::tui::run(resolved)
}
