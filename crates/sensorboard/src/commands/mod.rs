//! Command dispatch: bridges CLI args -> dashboard intents -> output formatting.

pub mod config_cmd;
pub mod health;
pub mod readings;
pub mod sensor_types;
pub mod sites;

use sensorboard_core::Dashboard;

use crate::cli::Command;
use crate::error::CliError;
use crate::output::Render;

/// Dispatch an API-bound command to its handler.
pub async fn dispatch(cmd: Command, dashboard: &Dashboard, render: &Render) -> Result<(), CliError> {
    match cmd {
        Command::Health => health::handle(dashboard, render).await,
        Command::Sites => sites::handle(dashboard, render).await,
        Command::SensorTypes(args) => sensor_types::handle(dashboard, args, render).await,
        Command::Readings(args) => readings::handle(dashboard, args, render).await,
        // Config and Completions are handled before a dashboard exists
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
