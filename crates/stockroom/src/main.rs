mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stockroom_config::Overrides;
use stockroom_core::ClientConfig;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands never talk to the server
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "stockroom", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let config = build_client_config(&cli.global)?;
            tracing::debug!(command = ?cmd, api_url = %config.api_url, "dispatching command");
            commands::dispatch(cmd, &config, &cli.global).await
        }
    }
}

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = stockroom_config::load_config_or_default();
    let overrides = Overrides {
        server: global.server.clone(),
        api_url: global.api_url.clone(),
        timeout: global.timeout,
        insecure: global.insecure,
    };
    Ok(cfg.client_config(global.profile.as_deref(), &overrides)?)
}
