use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use watch_aggregator::{
    registry, select_sources, Classification, Dashboard, DemocracyIndicator, FetchConfig,
    HttpFeedClient, ReportExporter, Selection, WatchAggregator, WatchError,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "great-experiment-watch", about = "Track authoritarian drift across news feeds")]
struct Args {
    /// Source to monitor (repeatable). Defaults to every registered source.
    #[arg(long = "source", value_name = "NAME")]
    sources: Vec<String>,

    /// Extra free-text term to match, case-insensitive.
    #[arg(long, default_value = "")]
    search: String,

    /// Manually set "democracy remaining" reading.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
    democracy: u8,

    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Write a PDF brief of all matched articles.
    #[arg(long)]
    export: bool,

    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Per-feed request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the source registry and exit.
    #[arg(long)]
    list_sources: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_sources {
        for source in registry::SOURCES {
            println!("{:<20} {:<14} {}", source.name, source.region.to_string(), source.url);
        }
        return Ok(());
    }

    let selection = if args.sources.is_empty() {
        Selection::all()
    } else {
        select_sources(&args.sources)
    };

    let mut fetch_config = FetchConfig::default();
    if let Some(timeout) = args.timeout {
        fetch_config.timeout_seconds = timeout;
    }

    let client = HttpFeedClient::new(fetch_config)?;
    let aggregator = WatchAggregator::new(Arc::new(client));

    let articles = aggregator.fetch(&selection, &args.search).await;
    let all_articles = articles.all();
    let classification = Classification::of(&all_articles);
    let indicator = DemocracyIndicator::new(args.democracy);

    if classification.alert_triggered() {
        warn!("{} emergency-level events detected", classification.emergencies.len());
    }

    match args.format {
        OutputFormat::Markdown => {
            println!("{}", Dashboard::render_markdown(&articles, &classification, &indicator));
        }
        OutputFormat::Json => {
            println!("{}", Dashboard::render_json(&articles, &classification, &indicator)?);
        }
    }

    if args.export {
        let exporter = ReportExporter::new(&args.output_dir);
        match exporter.export(&all_articles) {
            Ok(path) => info!("Brief ready for download: {}", path.display()),
            Err(WatchError::EmptyExportRequest) => {
                eprintln!("Warning: no articles matched, so there is nothing to export.");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
