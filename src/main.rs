use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use setscout::collector::LocationCollector;
use setscout::config::AppConfig;
use setscout::export::{self, ExportFormat};
use setscout::logging::init_logging;
use setscout::model::FilmingLocation;
use setscout::sources::{self, FetchClient};

#[derive(Parser)]
#[command(name = "setscout", version, about = "Collect filming locations from public web sources")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Where to write collected records.
    #[arg(long, short, global = true, default_value = "locations.json")]
    output: PathBuf,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: ExportFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape IMDb locations pages for the configured title ids.
    Imdb {
        /// Title ids to scrape instead of the configured list.
        ids: Vec<String>,
    },
    /// Search the configured subreddits for filming-location posts.
    Reddit,
    /// Walk a Wikipedia category and extract filming sections.
    Wikipedia {
        /// Search for articles matching a query instead of walking the
        /// configured category.
        #[arg(long)]
        search: Option<String>,
    },
    /// Fetch production metadata from TMDB (sample data without an API key).
    Tmdb,
    /// Run every location source in sequence.
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load()?,
    };
    init_logging(&config.logging)?;

    info!("starting setscout v{}", env!("CARGO_PKG_VERSION"));

    let client = FetchClient::new(&config.scraping)?;
    let collector = LocationCollector::new(config.sources.clone());

    if let Command::Tmdb = cli.command {
        let productions =
            sources::tmdb::fetch_popular_movies(&client, config.sources.tmdb_api_key.as_deref(), 1)
                .await?;
        let json = serde_json::to_string_pretty(&productions)?;
        std::fs::write(&cli.output, json)?;
        info!(count = productions.len(), path = %cli.output.display(), "wrote production metadata");
        return Ok(());
    }

    let records = match cli.command {
        Command::Imdb { ref ids } => {
            let ids = if ids.is_empty() {
                config.sources.imdb_title_ids.clone()
            } else {
                ids.clone()
            };
            run_imdb(&client, &collector, &ids).await
        }
        Command::Reddit => run_reddit(&client, &collector).await,
        Command::Wikipedia { ref search } => {
            run_wikipedia(&client, &collector, search.as_deref()).await
        }
        Command::All => {
            let mut all = run_imdb(&client, &collector, &config.sources.imdb_title_ids).await;
            all.extend(run_reddit(&client, &collector).await);
            all.extend(run_wikipedia(&client, &collector, None).await);
            all
        }
        Command::Tmdb => unreachable!("handled above"),
    };

    info!(count = records.len(), "collection finished");
    let stats = export::export(&records, &cli.output, cli.format)?;
    info!(
        records = stats.records,
        bytes = stats.file_size_bytes,
        path = %cli.output.display(),
        "export written"
    );

    Ok(())
}

/// Fetch and collect each IMDb title in turn. Transport failures cost one
/// title, never the batch.
async fn run_imdb(
    client: &FetchClient,
    collector: &LocationCollector,
    ids: &[String],
) -> Vec<FilmingLocation> {
    let mut records = Vec::new();

    for imdb_id in ids {
        match sources::imdb::fetch_locations_page(client, imdb_id).await {
            Ok(Some(html)) => records.extend(collector.collect_imdb_page(imdb_id, &html)),
            Ok(None) => warn!(%imdb_id, "no locations page content"),
            Err(e) => error!(%imdb_id, error = %e, "imdb fetch failed, skipping title"),
        }
        client.courtesy_delay().await;
    }

    records
}

async fn run_reddit(client: &FetchClient, collector: &LocationCollector) -> Vec<FilmingLocation> {
    let sources_config = collector.sources();
    let mut records = Vec::new();

    for subreddit in &sources_config.subreddits {
        match sources::reddit::search_subreddit(
            client,
            subreddit,
            &sources_config.reddit_query,
            sources_config.reddit_limit,
        )
        .await
        {
            Ok(Some(listing)) => {
                records.extend(collector.collect_reddit_listing(subreddit, &listing))
            }
            Ok(None) => warn!(%subreddit, "no listing content"),
            Err(e) => error!(%subreddit, error = %e, "reddit fetch failed, skipping subreddit"),
        }
        client.courtesy_delay().await;
    }

    records
}

async fn run_wikipedia(
    client: &FetchClient,
    collector: &LocationCollector,
    search: Option<&str>,
) -> Vec<FilmingLocation> {
    let sources_config = collector.sources();

    let titles = match search {
        Some(query) => {
            sources::wikipedia::search_film_articles(
                client,
                query,
                sources_config.wikipedia_search_limit,
            )
            .await
        }
        None => {
            sources::wikipedia::fetch_category_members(client, &sources_config.wikipedia_category)
                .await
        }
    };

    let titles = match titles {
        Ok(titles) => titles,
        Err(e) => {
            error!(error = %e, "wikipedia article listing failed");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for title in &titles {
        match sources::wikipedia::fetch_page_wikitext(client, title).await {
            Ok(Some(wikitext)) => records.extend(collector.collect_wiki_page(title, &wikitext)),
            Ok(None) => warn!(%title, "no wikitext for article"),
            Err(e) => error!(%title, error = %e, "wikipedia fetch failed, skipping article"),
        }
        client.courtesy_delay().await;
    }

    records
}
