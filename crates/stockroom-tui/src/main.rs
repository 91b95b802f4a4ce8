//! `stockroom-tui`: terminal UI for a stockroom item inventory.
//!
//! Built on [ratatui](https://ratatui.rs) over the `stockroom-core`
//! controller: the list, the create/edit form, delete confirmation and
//! toasts are all views of the controller's `AppState`.
//!
//! Logs are written to a file (default: the platform cache directory) to
//! avoid corrupting the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use stockroom_config::Overrides;
use stockroom_core::Controller;

use crate::app::App;

/// Terminal UI for browsing and editing inventory items.
#[derive(Parser, Debug)]
#[command(name = "stockroom-tui", version, about)]
struct Cli {
    /// Server profile to use
    #[arg(short = 'p', long, env = "STOCKROOM_PROFILE")]
    profile: Option<String>,

    /// Server origin, e.g. http://localhost:8000 (overrides profile)
    #[arg(short = 's', long, env = "STOCKROOM_SERVER")]
    server: Option<String>,

    /// API base: absolute URL, or a path resolved against the server
    #[arg(long, env = "STOCKROOM_API_URL")]
    api_url: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(short = 'k', long, env = "STOCKROOM_INSECURE")]
    insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "STOCKROOM_TIMEOUT")]
    timeout: Option<u64>,

    /// Log file path (defaults to stockroom-tui.log in the cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn default_log_file() -> PathBuf {
    ProjectDirs::from("dev", "stockroom", "stockroom").map_or_else(
        || std::env::temp_dir().join("stockroom-tui.log"),
        |dirs| dirs.cache_dir().join("stockroom-tui.log"),
    )
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// terminal is in raw mode. The returned guard flushes logs on drop.
fn setup_tracing(cli: &Cli) -> Result<WorkerGuard> {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "stockroom_tui={log_level},stockroom_core={log_level},stockroom_api={log_level}"
        ))
    });

    let log_file = cli.log_file.clone().unwrap_or_else(default_log_file);
    let log_dir = log_file
        .parent()
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    std::fs::create_dir_all(&log_dir)
        .wrap_err_with(|| format!("creating log directory {}", log_dir.display()))?;
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("stockroom-tui.log"));

    let file_appender = tracing_appender::rolling::never(&log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal switches to raw mode
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli)?;

    // Priority: CLI flags > environment > config file > built-in default
    let cfg = stockroom_config::load_config().wrap_err("loading configuration")?;
    let overrides = Overrides {
        server: cli.server.clone(),
        api_url: cli.api_url.clone(),
        timeout: cli.timeout,
        insecure: cli.insecure,
    };
    let client_config = cfg
        .client_config(cli.profile.as_deref(), &overrides)
        .wrap_err("resolving server profile")?;
    let client = client_config
        .build_client()
        .wrap_err("building HTTP client")?;

    let server_label = client.base_url().to_string();
    info!(api_url = %server_label, "starting stockroom-tui");

    let mut app = App::new(Controller::new(client), server_label);
    app.run().await?;

    Ok(())
}
