//! Health command handler.

use stockroom_core::CoreError;
use stockroom_core::config::ClientConfig;

use crate::cli::{GlobalOpts, HealthArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    config: &ClientConfig,
    args: &HealthArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = config.build_client()?;
    let status = client
        .health(args.ready)
        .await
        .map_err(CoreError::from)?;

    let color = output::should_color(&global.color);
    let probe = if args.ready { "ready" } else { "live" };
    output::print_status(
        &format!("{} is {probe}", client.base_url()),
        color,
        global.quiet,
    );
    output::print_output(&status, global.quiet);
    Ok(())
}
