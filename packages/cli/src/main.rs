#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the crash map.
//!
//! Renders a crash dataset into a `GeoJSON` collection whose features carry
//! their marker style and popup HTML, and offers a few commands for checking
//! a dataset and its decoder tables by hand.
//!
//! Uses `indicatif-log-bridge` (via [`crash_map_cli_utils::init_logger`])
//! so that log lines and the progress bar never fight for the terminal.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use crash_map_cli_utils::IndicatifProgress;
use crash_map_config::{MapConfig, default_config};
use crash_map_crash_models::CrashFeature;
use crash_map_dataset::render::{RenderContext, render_collection, tag_counts};
use crash_map_decoder_models::{DecoderCategory, DecoderSnapshot};

#[derive(Parser)]
#[command(name = "crash_map", about = "Crash map rendering tool")]
struct Cli {
    /// TOML file overriding the built-in configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory to read decoder tables from
    #[arg(long, global = true)]
    decoders: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add style and popup properties to every crash in a dataset
    Render {
        /// Input `GeoJSON` feature collection
        #[arg(long)]
        input: PathBuf,
        /// Output path for the rendered collection
        #[arg(long)]
        output: PathBuf,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the popup HTML for one crash
    Popup {
        /// Input `GeoJSON` feature collection
        #[arg(long)]
        input: PathBuf,
        /// Index of the crash among the point features
        #[arg(long)]
        index: usize,
    },
    /// Count how many crashes carry each class tag
    Style {
        /// Input `GeoJSON` feature collection
        #[arg(long)]
        input: PathBuf,
    },
    /// List the decoder tables that load and their sizes
    Decoders,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = crash_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MapConfig::load(path)?,
        None => default_config(),
    };
    if let Some(dir) = cli.decoders {
        config = config.with_decoder_dir(dir);
    }

    match cli.command {
        Commands::Render {
            input,
            output,
            pretty,
        } => {
            let decoders = load_decoders(&config).await;
            let collection = crash_map_dataset::load_collection(&input).await?;
            let progress = IndicatifProgress::features_bar(&multi, "Rendering");

            let popup = config.popup_options();
            let ctx = RenderContext {
                rules: &config.style,
                decoders: &decoders,
                popup: &popup,
                normalize_roads: config.dataset.normalize_roads,
            };
            let (rendered, summary) = render_collection(collection, &ctx, &progress)?;

            let json = if pretty {
                serde_json::to_string_pretty(&rendered)?
            } else {
                serde_json::to_string(&rendered)?
            };
            tokio::fs::write(&output, json).await?;

            log::info!(
                "Wrote {} crashes to {} ({} skipped)",
                summary.rendered,
                output.display(),
                summary.skipped
            );
        }
        Commands::Popup { input, index } => {
            let decoders = load_decoders(&config).await;
            let crashes = read_crashes(&input, &config).await?;
            let Some(crash) = crashes.get(index) else {
                return Err(format!(
                    "Crash index {index} is out of range ({} point features)",
                    crashes.len()
                )
                .into());
            };

            let popup = crash_map_popup::format_popup(crash, &decoders, &config.popup_options());
            println!("{}", popup.to_html());
        }
        Commands::Style { input } => {
            let crashes = read_crashes(&input, &config).await?;
            let counts = tag_counts(&crashes, &config.style);

            println!("{} crashes", crashes.len());
            for (tag, count) in &counts {
                println!("{tag:>12}  {count}");
            }
        }
        Commands::Decoders => {
            let decoders = load_decoders(&config).await;
            for category in DecoderCategory::all() {
                match decoders.table(*category) {
                    Some(table) => println!("{category:<18} {} entries", table.len()),
                    None => println!("{category:<18} not loaded"),
                }
            }
        }
    }

    Ok(())
}

async fn load_decoders(config: &MapConfig) -> DecoderSnapshot {
    crash_map_decoder::load_all(&config.decoders.sources()).await
}

async fn read_crashes(
    input: &Path,
    config: &MapConfig,
) -> Result<Vec<CrashFeature>, Box<dyn std::error::Error>> {
    let collection = crash_map_dataset::load_collection(input).await?;
    Ok(crash_map_dataset::crash_features(
        &collection,
        config.dataset.normalize_roads,
    ))
}
