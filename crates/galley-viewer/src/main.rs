//! Galley - Kitchen layout viewer entry point
//!
//! Loads a KSL layout, applies the viewer configuration, and hands both
//! to the Bevy application.

mod app;
mod config;
mod ui;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use galley_core::Kitchen;

/// Built-in showroom layout used when no file is given
const DEFAULT_LAYOUT: &str = include_str!("../layouts/default.ksl");

#[derive(Parser, Debug)]
#[command(name = "galley")]
#[command(about = "Interactive 3D kitchen layout viewer")]
#[command(version)]
struct Args {
    /// Path to a KSL layout file (overrides the configured layout)
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, default_value = "galley.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write a default configuration file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Galley v{}", env!("CARGO_PKG_VERSION"));

    if args.init_config {
        config::save_default_config(&args.config)?;
        info!(path = %args.config.display(), "Wrote default configuration");
        return Ok(());
    }

    // Load configuration
    let config = config::load_config(&args.config)?;

    // The command line wins over the configured layout path; with
    // neither present the embedded showroom layout is used
    let layout_path = args
        .layout
        .or_else(|| config.scene.layout_path.as_ref().map(PathBuf::from));

    let kitchen = match layout_path {
        Some(path) => {
            let kitchen = Kitchen::from_file(&path)?;
            info!(path = %path.display(), name = ?kitchen.name, "Loaded layout");
            kitchen
        }
        None => {
            info!("No layout given, using the built-in showroom");
            Kitchen::from_xml(DEFAULT_LAYOUT)?
        }
    };

    app::run(config, kitchen);

    Ok(())
}
