//! SciVal Publication Lookup - command line entry point.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scival_lookup::{PublicationLookup, Refresh, ScivalClient, config::Config, formatters};

#[derive(Parser, Debug)]
#[command(name = "scival-lookup")]
#[command(about = "Look up a publication in SciVal by its Scopus ID")]
#[command(version)]
struct Cli {
    /// Scopus document ID (the EID without "2-s2.0-")
    identifier: u64,

    /// Elsevier API key
    #[arg(long, env = "SCIVAL_API_KEY")]
    api_key: Option<String>,

    /// Institution token sent alongside the API key
    #[arg(long, env = "SCIVAL_INST_TOKEN")]
    inst_token: Option<String>,

    /// Cache directory (defaults to ~/.cache/scival-lookup)
    #[arg(long, env = "SCIVAL_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Ignore the cache and fetch a fresh copy
    #[arg(long, conflicts_with = "max_age")]
    refresh: bool,

    /// Refetch when the cached copy is older than this many days
    #[arg(long, value_name = "DAYS")]
    max_age: Option<u64>,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Full record as JSON
    Json,
    /// Compact JSON (names only, absent fields omitted)
    Compact,
}

impl Cli {
    fn refresh_policy(&self) -> Refresh {
        match (self.refresh, self.max_age) {
            (true, _) => Refresh::Always,
            (false, Some(days)) => Refresh::max_age_days(days),
            (false, None) => Refresh::Cached,
        }
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable.
    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::from_env()?;
    if cli.api_key.is_some() {
        config.api_key.clone_from(&cli.api_key);
    }
    if cli.inst_token.is_some() {
        config.inst_token.clone_from(&cli.inst_token);
    }
    if let Some(dir) = &cli.cache_dir {
        config.cache_dir.clone_from(dir);
    }

    let refresh = cli.refresh_policy();
    tracing::debug!(identifier = cli.identifier, ?refresh, ?config, "Starting lookup");

    let client = ScivalClient::new(config)?;
    let publication = PublicationLookup::new(&client, cli.identifier, refresh).await?;

    let output = match cli.format {
        OutputFormat::Text => publication.summary()?,
        OutputFormat::Json => serde_json::to_string_pretty(&publication.record()?)?,
        OutputFormat::Compact => {
            serde_json::to_string(&formatters::compact_publication(&publication.record()?))?
        }
    };
    println!("{output}");

    Ok(())
}
