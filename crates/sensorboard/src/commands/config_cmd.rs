//! Config subcommand handlers.

use dialoguer::{Confirm, Input};

use crate::cli::{ConfigArgs, ConfigCommand};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output::{self, Render};

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn parse_timeout(raw: &str) -> Result<Option<u64>, CliError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(secs)),
        _ => Err(CliError::Validation {
            field: "timeout".into(),
            reason: format!("expected a positive number of seconds, got \"{raw}\""),
        }),
    }
}

/// Interactive wizard: one profile with an ordered list of endpoints.
fn init(mut cfg: Config) -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("sensorboard configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let urls: String = Input::new()
        .with_prompt("API URLs, in the order to try (comma-separated)")
        .default(sensorboard_core::config::DEFAULT_ENDPOINT.into())
        .interact_text()
        .map_err(prompt_err)?;
    let api_urls: Vec<String> = urls.split(',').map(str::to_owned).collect();
    let api_urls = sensorboard_config::validate_urls(&api_urls)?;

    let timeout: String = Input::new()
        .with_prompt("Request timeout in seconds (blank keeps per-endpoint defaults)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let timeout = parse_timeout(&timeout)?;

    let make_default = cfg.profiles.is_empty()
        || Confirm::new()
            .with_prompt(format!("Make '{profile_name}' the default profile?"))
            .default(true)
            .interact()
            .map_err(prompt_err)?;

    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            api_urls,
            timeout,
            limit: None,
        },
    );
    if make_default {
        cfg.default_profile = Some(profile_name.clone());
    }

    let path = config::save_config(&cfg)?;
    eprintln!("\n   Profile '{profile_name}' saved to {}", path.display());
    Ok(())
}

pub fn handle(args: ConfigArgs, cfg: Config, render: &Render) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(cfg),

        ConfigCommand::Show => {
            let out = output::render_single(
                render.format,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("# unrenderable: {e}")),
                |c| {
                    c.profiles
                        .keys()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )?;
            output::print_output(&out, render.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), render.quiet);
            Ok(())
        }
    }
}
