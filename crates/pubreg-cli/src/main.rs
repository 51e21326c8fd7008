use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pubreg_core::{EngineConfig, IncomingRecord, PublicationInstance};
use pubreg_engine::{
    DuplicateReporter, FsBlobStore, HttpRecordStore, HttpSearchIndex, MetadataEquivalence,
    PublicationMatcher, SearchResolver, UpdateTarget, merge_instance,
};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "pubreg",
    about = "Match incoming publication records against the registry",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of the default location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output in JSON format.
    /// Also enabled by setting PUBREG_JSON=1.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the existing publication an incoming record should update.
    Resolve {
        /// Incoming record: `{"source": {..}, "mapped": {..}}`.
        incoming: PathBuf,
    },

    /// Merge two publication instances of the same form.
    Merge {
        existing: PathBuf,
        incoming: PathBuf,
    },

    /// Show the config path and effective configuration.
    Config,
}

// ─── Main ────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let start = Instant::now();
    let cli = Cli::parse();
    let json_output = cli.json || std::env::var("PUBREG_JSON").as_deref() == Ok("1");

    let config_path = cli.config.unwrap_or_else(EngineConfig::config_path);
    let config = EngineConfig::load_from(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    tracing::debug!(path = %config_path.display(), "config loaded");

    match cli.command {
        Commands::Resolve { incoming } => {
            let record = read_incoming(&incoming)?;
            let matcher = build_matcher(&config)?;
            let target = matcher.resolve_existing_publication(&record).await?;
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": target,
                    "meta": { "duration_ms": dur, "record": record.source.id }
                }))?;
            } else {
                print_target(&record, target.as_ref());
            }
        }

        Commands::Merge { existing, incoming } => {
            let existing: PublicationInstance = read_json(&existing)?;
            let incoming: PublicationInstance = read_json(&incoming)?;
            let merged = merge_instance(&existing, &incoming);
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": merged,
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                println!("{}", serde_json::to_string_pretty(&merged)?);
            }
        }

        Commands::Config => {
            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "path": config_path, "config": config },
                }))?;
            } else {
                let found = if config_path.exists() { "" } else { " (not found, using defaults)" };
                println!("# {}{found}", config_path.display());
                for (key, value) in config_values(&config) {
                    println!("{key} = {value}");
                }
            }
        }
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_env("PUBREG_LOG")
        .unwrap_or_else(|_| EnvFilter::new("pubreg=info,pubreg_engine=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn build_matcher(config: &EngineConfig) -> Result<PublicationMatcher> {
    let index = HttpSearchIndex::new(&config.search).context("building search client")?;
    let store =
        HttpRecordStore::new(&config.registry, &config.search).context("building registry client")?;
    let oracle = MetadataEquivalence::new()
        .with_title_threshold(config.matching.title_similarity_threshold);
    let reporter = DuplicateReporter::new(Arc::new(FsBlobStore::new(config.duplicates_root())))
        .with_prefix(&config.duplicates.prefix);

    Ok(PublicationMatcher::new(
        SearchResolver::new(Arc::new(index), Arc::new(store)),
        Arc::new(oracle),
        reporter,
    ))
}

fn read_incoming(path: &Path) -> Result<IncomingRecord> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    IncomingRecord::from_json(&contents)
        .with_context(|| format!("parsing incoming record {}", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

fn print_target(record: &IncomingRecord, target: Option<&UpdateTarget>) {
    match target {
        Some(target) => {
            println!(
                "{} -> {} ({})",
                record.source.id, target.existing.identifier, target.evidence
            );
            if let Some(title) = target.existing.publication.main_title() {
                println!("  {title}");
            }
        }
        None => println!("{}: no existing publication", record.source.id),
    }
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}

fn config_values(config: &EngineConfig) -> Vec<(&'static str, String)> {
    vec![
        ("search.base_url", config.search.base_url.clone()),
        ("search.min_interval_ms", config.search.min_interval_ms.to_string()),
        ("search.max_retries", config.search.max_retries.to_string()),
        ("search.user_agent", config.search.user_agent.clone()),
        ("registry.base_url", config.registry.base_url.clone()),
        ("duplicates.root_dir", config.duplicates.root_dir.clone()),
        ("duplicates.prefix", config.duplicates.prefix.clone()),
        (
            "matching.title_similarity_threshold",
            config.matching.title_similarity_threshold.to_string(),
        ),
    ]
}
