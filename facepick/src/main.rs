//! facepick - preview and pick terminal font faces

use anyhow::{Context, Result};
use clap::Parser;
use facepick_core::backend::{FontListing, JsonLinesBackend};
use facepick_core::{wakeup, Config, PreviewCache, RenderDispatcher, WorkerErrorSink};
use facepick_tui::App;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

/// Preview the regular, bold, italic and bold-italic faces of a font family
#[derive(Parser, Debug)]
#[command(name = "facepick")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Font families to choose from
    #[arg(value_name = "FAMILY")]
    families: Vec<String>,

    /// Path to an alternative config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file (level from RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref())?;

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    // Rendered samples live here until exit
    let output_dir = tempfile::Builder::new()
        .prefix("facepick-")
        .tempdir()
        .context("Failed to create preview directory")?;

    let backend = JsonLinesBackend::spawn(&config.backend.command())
        .with_context(|| format!("Failed to start renderer `{}`", config.backend.command))?;

    // Installed families first, then extras from the config file and command line
    let mut listing = backend.list_monospaced_fonts().unwrap_or_else(|e| {
        log::warn!("could not list installed fonts: {e}");
        FontListing::default()
    });
    log::info!("renderer listed {} font families", listing.families.len());
    listing.add_families(config.families.iter().cloned());
    listing.add_families(args.families.iter().cloned());

    // Faces set in facepick.toml win over the ones the renderer resolved
    listing.resolved_faces.overlay(&config.faces);
    config.faces = listing.resolved_faces;

    let (waker, wakeups) = wakeup::channel();
    let errors = WorkerErrorSink::new();
    let dispatcher = RenderDispatcher::new(
        Arc::new(backend),
        Arc::new(PreviewCache::new()),
        waker,
        errors.clone(),
        config.text_style.clone(),
        output_dir.path().to_path_buf(),
    );

    // Create app
    let mut app = App::new(config, listing.families, dispatcher, errors);
    if let [family] = args.families.as_slice() {
        app.enter_faces(family);
    }

    // Run TUI
    let mut display = facepick_tui::display::detect();
    facepick_tui::run(&mut app, &wakeups, display.as_mut()).context("TUI application error")?;

    if let Some(settings) = &app.chosen {
        for line in settings.to_conf_lines() {
            println!("{line}");
        }
    }

    Ok(())
}

/// Route logs to a file so they never land on the alternate screen
fn init_logging(log_file: Option<&std::path::Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
