mod chart;
mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sensorboard_core::Dashboard;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::Render;

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
    // Completions need neither config nor network
    if let Command::Completions(args) = &cli.command {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "sensorboard", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = if matches!(cli.command, Command::Config(_)) {
        config::load_config_or_default()
    } else {
        config::load_config()?
    };
    let render = Render::new(
        config::output_format(&cli.global, &cfg),
        config::color_mode(&cli.global, &cfg),
        cli.global.quiet,
    );

    match cli.command {
        Command::Config(args) => commands::config_cmd::handle(args, cfg, &render),

        cmd => {
            let dashboard_config = config::dashboard_config(&cli.global, &cfg)?;
            tracing::debug!(
                endpoints = ?dashboard_config.endpoints,
                timeout = ?dashboard_config.timeout,
                "resolved dashboard config"
            );
            let dashboard = Dashboard::new(&dashboard_config)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &dashboard, &render).await
        }
    }
}
