use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use collections::{
    harvest, verify_pinned, CollectionStore, DiscoveryConfig, MovieIndex, PinStatus, TmdbSource,
    API_KEY_ENV,
};
use tmdb::TmdbClient;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "collections-harvest")]
#[command(about = "Harvest TMDB movie collections into a local JSON store", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(
        long,
        global = true,
        env = "COLLECTIONS_CONFIG",
        help = "TOML config file (franchises, fallback ids, cap, ...)"
    )]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Collection store to read and rewrite")]
    output: Option<PathBuf>,

    #[arg(long, global = true, help = "Maximum collections gathered per run")]
    cap: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Search franchises and merge their collections into the store (default)")]
    Discover,

    #[command(about = "Make sure pinned collections are stored under their expected names")]
    Verify,

    #[command(about = "Print a stored collection")]
    Show {
        #[arg(help = "TMDB collection id")]
        id: i64,
    },

    #[command(about = "Print the stored collection a film belongs to")]
    Movie {
        #[arg(help = "TMDB movie id")]
        movie_id: i64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = run(Cli::parse(), std::env::var(API_KEY_ENV).ok()).await;
    if let Err(err) = &result {
        tracing::error!("{:#}", err);
    }
    std::process::exit(exit_code(&result));
}

/// 0 on completion, 1 when the run was aborted.
fn exit_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// `env_api_key` is the value of `TMDB_API_KEY`, read by the caller.
async fn run(cli: Cli, env_api_key: Option<String>) -> Result<()> {
    let mut config = DiscoveryConfig::load(cli.config.as_deref())?;
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(cap) = cli.cap {
        config.cap = cap;
    }

    match cli.command.unwrap_or(Commands::Discover) {
        Commands::Discover => {
            let source = tmdb_source(&config, env_api_key)?;
            tracing::info!(
                "Discovering up to {} collections from {} franchises",
                config.cap,
                config.franchises.len()
            );
            harvest(&source, &config).await?;
        }
        Commands::Verify => {
            let source = tmdb_source(&config, env_api_key)?;
            let mut store = CollectionStore::open(&config.output).await?;
            let reports =
                verify_pinned(&source, &mut store, &config.pinned, config.request_delay())
                    .await?;
            store.save().await?;

            let failed = reports
                .iter()
                .filter(|r| r.status == PinStatus::Failed)
                .count();
            if failed == 0 {
                tracing::info!("All {} pinned collections are valid", reports.len());
            } else {
                tracing::warn!(
                    "{} of {} pinned collections failed validation",
                    failed,
                    reports.len()
                );
            }
        }
        Commands::Show { id } => {
            let store = CollectionStore::open(&config.output).await?;
            match store.get_raw(id) {
                Some(entry) => println!("{}", serde_json::to_string_pretty(entry)?),
                None => tracing::warn!(
                    "Collection {} is not in {}",
                    id,
                    store.path().display()
                ),
            }
        }
        Commands::Movie { movie_id } => {
            let store = CollectionStore::open(&config.output).await?;
            let index = MovieIndex::build(&store);
            let Some(membership) = index.collection_for_movie(movie_id) else {
                tracing::warn!("Movie {} belongs to no stored collection", movie_id);
                return Ok(());
            };

            let title = store.get(membership.collection_id).and_then(|collection| {
                collection
                    .parts
                    .iter()
                    .find(|part| part.id == Some(movie_id))
                    .and_then(|part| part.title().map(str::to_string))
            });
            tracing::info!(
                "{} is part of {} ({} films)",
                title.unwrap_or_else(|| format!("Movie {}", movie_id)),
                membership.collection_name,
                membership.movie_count
            );
            if let Some(entry) = store.get_raw(membership.collection_id) {
                println!("{}", serde_json::to_string_pretty(entry)?);
            }
        }
    }

    Ok(())
}

fn tmdb_source(config: &DiscoveryConfig, env_api_key: Option<String>) -> Result<TmdbSource> {
    let api_key = config.resolve_api_key(env_api_key)?;

    let http_client = reqwest::Client::builder()
        .user_agent(concat!("collections-harvest/", env!("CARGO_PKG_VERSION")))
        .timeout(config.timeout())
        .build()
        .context("failed to build HTTP client")?;

    let mut client = TmdbClient::with_base_url(http_client, api_key, &config.base_url);
    if let Some(language) = &config.language {
        client = client.language(language);
    }
    Ok(TmdbSource::new(client))
}
