//! Command executor for dispatching CLI commands

use super::handlers::{DispatchCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Execute the parsed command with merged settings
///
/// No subcommand means `serve`. The `dispatch` command prints its outcome
/// as pretty JSON on stdout.
///
/// # Errors
/// Returns errors from argument validation or the command handlers
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Dispatch {
            path,
            kind,
            before,
            after,
        }) => {
            let response = DispatchCommandHandler::new(&settings)?
                .execute(path, *kind, before.clone(), after.clone())
                .await?;

            let rendered = serde_json::to_string_pretty(&response)
                .map_err(|e| AppError::from(anyhow::Error::new(e)))?;
            println!("{}", rendered);
            Ok(())
        }
    }
}
