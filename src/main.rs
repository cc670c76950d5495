use anyhow::Result;
use clap::Parser;
use hotel_rank::ViewCache;
use hotel_rank::config::Config;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hotel-rank",
    about = "Hotel content ranking: chain summaries, chain listings and attribute availability"
)]
struct Cli {
    /// Path to config file (defaults are used when it does not exist)
    #[arg(short, long, default_value = "hotel-rank.toml", global = true)]
    config: PathBuf,

    /// Hotel table to load instead of the configured one
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Every chain with hotel count and mean score
    Summary,

    /// Hotels of one chain ranked by score
    Chain {
        /// Two-letter chain code, e.g. HL
        chain_code: String,
    },

    /// Attribute availability of one hotel
    Hotel {
        /// Hotel code, e.g. HLAAB
        hotel_code: String,
    },

    /// Dataset-wide present-value count per attribute
    Availability,

    /// Totals and cleaning statistics
    Stats,
}

#[derive(Serialize)]
struct Stats {
    total_hotels: usize,
    total_chains: usize,
    cleaning: hotel_rank::dataset::CleaningReport,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hotel_rank=info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };
    if let Some(data) = cli.data {
        config.data.path = data;
    }

    let cache = ViewCache::open(&config).await?;

    match cli.command {
        Command::Summary => print_json(&*cache.chain_summary_view()),
        Command::Chain { chain_code } => print_json(&*cache.chain_view(&chain_code)?),
        Command::Hotel { hotel_code } => print_json(&*cache.hotel_view(&hotel_code)?),
        Command::Availability => print_json(cache.store().availability().rows()),
        Command::Stats => print_json(&Stats {
            total_hotels: cache.total_hotels(),
            total_chains: cache.total_chains(),
            cleaning: cache.store().dataset().report(),
        }),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
