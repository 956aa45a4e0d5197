// URL extraction CLI
//
// Prints extraction and crawl results as JSON on stdout; logs go to stderr
// and are filtered with RUST_LOG (default: info).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use kodegen_tools_urlextract::{CrawlOptions, ExtractorConfig, ExtractorConfigBuilder, UrlExtractor};
use kodegen_tools_urlextract::utils::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAGES};

#[derive(Parser)]
#[command(name = "kodegen-urlextract")]
#[command(about = "Adaptive multi-format URL content extraction and bounded crawling")]
#[command(version)]
struct Cli {
    /// Show the browser window instead of running headless
    #[arg(long, global = true)]
    headed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a single URL
    Extract { url: String },

    /// Breadth-first crawl from a start URL
    Crawl {
        url: String,
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
        #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
        max_pages: usize,
        /// Only extract hosts containing this substring (repeatable)
        #[arg(long = "allowed-domain")]
        allowed_domains: Vec<String>,
        /// Extractions in flight per level
        #[arg(long, default_value_t = 1)]
        concurrency: usize,
    },

    /// Show which formats can be extracted in this environment
    Capabilities,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ExtractorConfig::from_env().context("Invalid URLEXTRACT_* environment")?;
    if cli.headed {
        config = ExtractorConfigBuilder::from_config(config)
            .headless(false)
            .build()?;
    }
    let extractor = UrlExtractor::new(config).context("Failed to initialize extractor")?;

    let output = match cli.command {
        Commands::Extract { url } => serde_json::to_value(extractor.extract(&url).await)?,
        Commands::Crawl {
            url,
            max_depth,
            max_pages,
            allowed_domains,
            concurrency,
        } => {
            let mut builder = CrawlOptions::builder()
                .max_depth(max_depth)
                .max_pages(max_pages)
                .max_concurrent_pages(concurrency);
            if !allowed_domains.is_empty() {
                builder = builder.allowed_domains(allowed_domains);
            }
            let options = builder.build()?;

            let (results, summary) = extractor.crawl_with_summary(&url, &options).await;
            json!({ "summary": summary, "results": results })
        }
        Commands::Capabilities => {
            json!({ "available": extractor.capabilities().available_formats() })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
