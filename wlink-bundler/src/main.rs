//! wlink-bundler - group a product snapshot into warranty bundles
//!
//! Reads a JSON product snapshot (file or stdin), runs the linkage engine
//! and writes one report per bundle as JSON. Logs go to stderr so stdout
//! carries only the report.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use tracing::info;
use wlink_bundler::snapshot::{read_snapshot, write_reports};
use wlink_bundler::{summarize, BundleEngine, BundleReport};
use wlink_common::config::TomlConfig;

/// Group product rows that record the same purchase into warranty bundles
#[derive(Debug, Parser)]
#[command(name = "wlink-bundler", version, about)]
struct Args {
    /// Product snapshot JSON (`-` for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// TOML config file (falls back to WLINK_CONFIG, then the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write bundles here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Worker threads for the pairwise sweep
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Print a run summary to stderr
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    let level: tracing::Level = config
        .logging
        .level
        .parse()
        .map_err(|e| anyhow!("Invalid logging.level {:?}: {}", config.logging.level, e))?;
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    info!(
        "Starting wlink-bundler v{} (keywords: {}, window: {} days)",
        env!("CARGO_PKG_VERSION"),
        config.linkage.keywords.join(", "),
        config.linkage.proximity_days
    );

    let products = if args.input.as_os_str() == "-" {
        read_snapshot(io::stdin().lock()).context("Failed to read snapshot from stdin")?
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("Failed to open snapshot {}", args.input.display()))?;
        read_snapshot(BufReader::new(file))
            .with_context(|| format!("Failed to read snapshot {}", args.input.display()))?
    };
    info!(products = products.len(), "Loaded product snapshot");

    let engine = BundleEngine::new(&config.linkage).with_shards(args.threads);
    let bundles = engine.bundle(&products);
    let summary = summarize(&bundles);

    info!(
        bundles = summary.bundles,
        linked = summary.linked_bundles,
        enhanced = summary.enhanced_bundles,
        "Bundling complete"
    );
    if args.summary {
        eprintln!(
            "{} products -> {} bundles ({} linked, {} with enhanced protection)",
            summary.products, summary.bundles, summary.linked_bundles, summary.enhanced_bundles
        );
    }

    let reports: Vec<BundleReport> = bundles.into_iter().map(BundleReport::from).collect();
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?;
            write_reports(BufWriter::new(file), &reports, args.pretty)
                .with_context(|| format!("Failed to write output {}", path.display()))?;
            info!("Wrote {} bundles to {}", reports.len(), path.display());
        }
        None => {
            write_reports(io::stdout().lock(), &reports, args.pretty)
                .context("Failed to write output")?;
        }
    }

    Ok(())
}
