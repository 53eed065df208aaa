//! Typolens - A terminal writing surface that highlights typos.
//!
//! # Usage
//!
//! ```bash
//! typolens draft.txt
//! typolens --suggestions analysis.json --watch draft.txt
//! typolens --dictionary extra.json --no-panel draft.txt
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use typolens::app::App;
use typolens::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use typolens::perf;

/// A terminal writing surface that highlights typos and applies fixes in place
#[derive(Parser, Debug)]
#[command(name = "typolens", version, about, long_about = None)]
struct Cli {
    /// Draft to edit; created on first save if it does not exist
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Analysis response to read dynamic suggestions from
    #[arg(short, long, value_name = "PATH")]
    suggestions: Option<PathBuf>,

    /// Reload suggestions whenever the suggestions file changes
    #[arg(short, long)]
    watch: bool,

    /// JSON file of extra dictionary entries
    #[arg(short, long, value_name = "PATH")]
    dictionary: Option<PathBuf>,

    /// Start with the corrections panel hidden
    #[arg(long)]
    no_panel: bool,

    /// Enable performance logging
    #[arg(long)]
    perf: bool,

    /// Write debug and render events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Send logs to `debug_log` when set; otherwise warnings go to stderr.
fn init_tracing(debug_log: Option<&Path>) -> Result<()> {
    if let Some(path) = debug_log {
        let file = File::create(path)
            .with_context(|| format!("Failed to create debug log {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
            )
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let debug_log = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("TYPOLENS_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = init_tracing(debug_log.as_deref()) {
        eprintln!("[warn] {err:#}");
        init_tracing(None)?;
    }
    perf::set_enabled(effective.perf);

    let mut app = App::new(cli.file)
        .with_suggestions(effective.suggestions)
        .with_dictionary(effective.dictionary)
        .with_watch(effective.watch)
        .with_panel_visible(!effective.no_panel)
        .with_config_paths(Some(global_path), local_path.exists().then_some(local_path));

    app.run().context("Application error")
}
