//! Command dispatch: bridges CLI args -> item API calls -> output formatting.

pub mod config_cmd;
pub mod health;
pub mod items;
pub mod util;

use stockroom_core::config::ClientConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    config: &ClientConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Items(args) => {
            let client = config.build_client()?;
            items::handle(&client, args, global).await
        }
        Command::Health(args) => health::handle(config, &args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
