//! # skillpath: curriculum ingestion binary
//!
//! Runs one full ingestion pass: for every level of every course in the
//! catalog, search the video source, filter and classify the candidates, and
//! persist the accepted videos. Safe to re-run; the dedup gate keeps the
//! database free of repeats.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use skillpath::catalog::Catalog;
use skillpath::classify::{
    DifficultyClassifier, LevelIndexClassifier, TitleKeywordClassifier,
};
use skillpath::constants::{DEFAULT_DB_FILE, RESULTS_PER_QUERY, VIDEOS_PER_LEVEL};
use skillpath::filter::FilterConfig;
use skillpath::pipeline::{CurriculumIngestor, PipelineConfig};
use skillpath::store::VideoStore;
use skillpath_youtube::{YoutubeSource, DEFAULT_API_BASE};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterPreset {
    /// Tight duration bounds tuned for bulk curriculum filling.
    Bulk,
    /// Wide duration bounds and the full negative-keyword set.
    Curated,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ClassifierChoice {
    /// Difficulty from curriculum level position (1-2 beginner, 3-4
    /// intermediate, 5+ advanced).
    Level,
    /// Difficulty from beginner keywords in the video title.
    Keyword,
}

#[derive(Parser, Debug)]
#[command(name = "skillpath", about = "Ingest curriculum videos from YouTube")]
struct Args {
    /// Path to the SQLite database.
    #[arg(long, default_value = DEFAULT_DB_FILE)]
    db: String,

    /// Catalog TOML file; the built-in life-skills catalog is used when
    /// omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Base URL of the Invidious-compatible API instance.
    #[arg(long, env = "SKILLPATH_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Search results requested per level query.
    #[arg(long, default_value_t = RESULTS_PER_QUERY)]
    results_per_query: usize,

    /// Accepted videos per level before moving on.
    #[arg(long, default_value_t = VIDEOS_PER_LEVEL)]
    videos_per_level: usize,

    /// Quality-filter policy.
    #[arg(long, value_enum, default_value_t = FilterPreset::Bulk)]
    filter: FilterPreset,

    /// Difficulty classification strategy.
    #[arg(long, value_enum, default_value_t = ClassifierChoice::Level)]
    classifier: ClassifierChoice,

    /// Abort the whole run on the first failed level batch instead of
    /// continuing with the next level.
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read catalog file {}", path.display()))?;
            Catalog::from_toml_str(&raw).context("invalid catalog file")?
        }
        None => Catalog::builtin(),
    };

    if let Some(dir) = std::path::Path::new(&args.db).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
    }
    let db = turso::Builder::new_local(&args.db)
        .build()
        .await
        .context("failed to open database")?;
    let store = VideoStore::new(&db)?;

    let classifier: Box<dyn DifficultyClassifier> = match args.classifier {
        ClassifierChoice::Level => Box::new(LevelIndexClassifier),
        ClassifierChoice::Keyword => Box::new(TitleKeywordClassifier::default()),
    };
    let config = PipelineConfig {
        results_per_query: args.results_per_query,
        videos_per_level: args.videos_per_level,
        filter: match args.filter {
            FilterPreset::Bulk => FilterConfig::bulk(),
            FilterPreset::Curated => FilterConfig::curated(),
        },
        strict: args.strict,
    };

    info!("Starting ingestion against {}", args.api_base);
    let ingestor = CurriculumIngestor::new(
        YoutubeSource::new(args.api_base.trim_end_matches('/')),
        store,
        catalog,
        classifier,
        config,
    );
    let stats = ingestor.run().await?;

    info!("Ingestion summary: {stats}");
    Ok(())
}
