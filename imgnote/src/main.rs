//! imgnote - image annotation ledger service
//!
//! Walks a directory of captured images, offers every image not yet
//! annotated, and appends reviewer tag submissions to a JSON ledger.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use imgnote::config::{AnnotatorConfig, TagMode};
use imgnote::AppState;

/// Start the image annotation service.
#[derive(Debug, Parser)]
#[command(name = "imgnote", version)]
struct Cli {
    /// Date folder within the images root (e.g. 20240924)
    date_folder: Option<String>,

    /// Root folder containing place subdirectories
    #[arg(long, env = "IMGNOTE_IMAGES_ROOT")]
    images_root: Option<PathBuf>,

    /// Ledger file path (default: data_<today>.json)
    #[arg(long, env = "IMGNOTE_LEDGER_FILE")]
    ledger_file: Option<PathBuf>,

    /// Tag persistence mode
    #[arg(long, value_enum)]
    tag_mode: Option<TagMode>,

    /// Substring marking excluded captures (default: Dark)
    #[arg(long)]
    exclude_marker: Option<String>,

    /// HTTP listen port
    #[arg(long, default_value_t = 5780)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    info!("Starting imgnote (image annotation ledger)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Configuration errors are fatal at startup, never recovered.
    let config = AnnotatorConfig::resolve(
        cli.images_root.as_deref(),
        cli.date_folder.as_deref(),
        cli.ledger_file.as_deref(),
        cli.tag_mode,
        cli.exclude_marker.as_deref(),
        cli.port,
    )?;

    info!("Images root: {}", config.images_root.display());
    info!("Ledger file: {}", config.ledger_path.display());
    info!("Tag mode: {:?}", config.tag_mode);

    let state = AppState::new(config);

    // Seed an empty ledger so the first discovery pass has a file to read.
    state.ledger.ensure_exists()?;

    let port = state.config.port;
    let app = imgnote::build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("Listening on http://127.0.0.1:{}", port);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}
