use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use sentiboard::config::Config;
use sentiboard::dataset::fetch::DefaultFetcher;
use sentiboard::dataset::{DataSource, DatasetCache};
use sentiboard::output::html::{render_dashboard, SelectionMode};
use sentiboard::output::terminal;
use sentiboard::session::Session;
use sentiboard::viz::render::{bar_svg, histogram_svg};

/// Sentiboard: explore tweet sentiment predictions.
///
/// Loads a CSV of tweets with a ground-truth label and three model
/// predictions, then charts the corpus and compares predictions per tweet.
#[derive(Parser)]
#[command(name = "sentiboard", version, about)]
struct Cli {
    /// Data source path or URL (overrides SENTIBOARD_DATA_SOURCE)
    #[arg(long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dataset size, tweet lengths, top words and model agreement
    Summary,

    /// Show the most frequent words
    Tokens {
        /// How many words to show (default: SENTIBOARD_TOP_K or 20)
        #[arg(long)]
        top: Option<usize>,
    },

    /// List tweets with their index and a text preview
    List {
        /// Max entries to print (default: 25)
        #[arg(long, default_value = "25")]
        limit: usize,
    },

    /// Compare the ground truth with the three predictions for one tweet
    Inspect {
        /// Record index, starting at 0
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Write the HTML dashboard and chart files
    Report {
        /// Output directory (default: SENTIBOARD_OUTPUT_DIR or ./output)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Serve the interactive dashboard over HTTP
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 8080)
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sentiboard=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(source) = cli.source {
        config.data_source = source;
    }

    let fetcher = DefaultFetcher::new()?.with_progress(true);
    let cache = DatasetCache::new(Arc::new(fetcher));

    match cli.command {
        Commands::Summary => {
            let session = open_session(&cache, &config).await?;
            terminal::display_summary(&session);
            terminal::display_top_tokens(&session.top_tokens());
        }

        Commands::Tokens { top } => {
            if let Some(k) = top {
                config.top_k = k;
                config.validate()?;
            }
            let session = open_session(&cache, &config).await?;
            terminal::display_top_tokens(&session.top_tokens());
        }

        Commands::List { limit } => {
            let session = open_session(&cache, &config).await?;
            println!(
                "\n{}",
                format!("=== {} tweets ===", session.dataset().len()).bold()
            );
            terminal::display_selector(&session.selector_options(), limit);
        }

        Commands::Inspect { index } => {
            let session = open_session(&cache, &config).await?;
            let record = session.on_select(index)?;
            terminal::display_comparison(&record);
        }

        Commands::Report { output } => {
            let session = open_session(&cache, &config).await?;
            let dir = output.unwrap_or_else(|| config.output_dir.clone());
            write_report(&session, &config, &dir)?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let session = open_session(&cache, &config).await?;
            sentiboard::web::run_server(config, session, port, &bind).await?;
        }
    }

    Ok(())
}

/// Load the configured dataset, or fail with the load error verbatim.
async fn open_session(cache: &DatasetCache, config: &Config) -> Result<Session> {
    let source = DataSource::parse(&config.data_source);
    println!("Loading {source}...");
    let session = Session::open(cache, source, config.session_options()).await?;
    Ok(session)
}

/// Write dashboard.html and the three chart files into `dir`.
///
/// A chart that fails to render is reported and skipped; the page itself
/// carries the same failure as an in-panel notice.
fn write_report(session: &Session, config: &Config, dir: &std::path::Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let page = render_dashboard(session, &config.title, &SelectionMode::Embedded);
    let page_path = dir.join("dashboard.html");
    std::fs::write(&page_path, page)
        .with_context(|| format!("Failed to write {}", page_path.display()))?;
    info!(path = %page_path.display(), "Wrote dashboard");

    let charts: [(&str, Result<String>); 3] = [
        (
            "length_histogram.svg",
            session
                .histogram()
                .and_then(|h| histogram_svg(&h))
                .map_err(Into::into),
        ),
        ("top_tokens.svg", bar_svg(&session.top_tokens()).map_err(Into::into)),
        (
            "wordcloud.svg",
            session.word_cloud().map(|w| w.svg.clone()).map_err(Into::into),
        ),
    ];

    for (name, svg) in charts {
        let path = dir.join(name);
        match svg {
            Ok(svg) => {
                std::fs::write(&path, svg)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("  {} {}", "✓".green(), path.display());
            }
            Err(e) => {
                println!("  {} {name}: {e}", "✗".red());
            }
        }
    }

    println!(
        "\n{}",
        format!("Dashboard saved to: {}", page_path.display()).bold()
    );
    Ok(())
}
