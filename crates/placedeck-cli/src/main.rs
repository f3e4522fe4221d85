//! placedeck CLI: terminal companion for a conversational sightseeing agent

use clap::{Parser, Subcommand};
use placedeck_core::Config;
use placedeck_tui::FeedSource;
use std::path::PathBuf;

/// Places panel TUI for conversational agents
#[derive(Parser)]
#[command(name = "placedeck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = "placedeck.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui {
        /// JSONL feed script to play instead of a live agent
        #[arg(long)]
        script: Option<PathBuf>,

        /// Local directory backing the static-image root
        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },

    /// Open the TUI playing the bundled demo conversation
    Demo {
        /// Local directory backing the static-image root
        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },

    /// Resolve an image path the way the panel would
    Resolve {
        /// Raw image path or URL (omit for the default asset)
        path: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    Init,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        None => placedeck_tui::run_tui(config, FeedSource::None, None).await,
        Some(Commands::Tui { script, assets_dir }) => {
            if let Some(path) = &script {
                if !path.exists() {
                    return Err(format!("script not found: {}", path.display()).into());
                }
            }
            let source = script.map_or(FeedSource::None, FeedSource::Script);
            placedeck_tui::run_tui(config, source, assets_dir).await
        }
        Some(Commands::Demo { assets_dir }) => {
            placedeck_tui::run_tui(config, FeedSource::Demo, assets_dir).await
        }
        Some(Commands::Resolve { path, json }) => {
            print_resolved(&config, path.as_deref(), json);
            Ok(())
        }
        Some(Commands::Init) => {
            config.save(&cli.config)?;
            println!("Wrote {}", cli.config.display());
            Ok(())
        }
    }
}

/// Print the resolved image source for a raw path.
fn print_resolved(config: &Config, path: Option<&str>, json: bool) {
    let resolved = config.assets.resolve(path);
    if json {
        let out = serde_json::json!({
            "input": path,
            "resolved": resolved,
            "default_asset": config.assets.default_url(),
        });
        println!("{out}");
    } else {
        println!("{resolved}");
    }
}
