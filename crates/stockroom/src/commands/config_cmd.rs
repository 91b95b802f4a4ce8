//! Config subcommand handlers.

use std::io::IsTerminal;

use dialoguer::Input;

use stockroom_config::{
    self as config, Config, DEFAULT_API_URL, DEFAULT_PROFILE, DEFAULT_SERVER, Profile,
};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Take `flag` if given, otherwise prompt on a terminal, otherwise `default`.
fn value_or_prompt(flag: Option<&str>, prompt: &str, default: &str) -> Result<String, CliError> {
    if let Some(value) = flag {
        return Ok(value.to_owned());
    }
    if !std::io::stdin().is_terminal() {
        return Ok(default.to_owned());
    }
    Input::new()
        .with_prompt(prompt)
        .default(default.to_owned())
        .interact_text()
        .map_err(prompt_err)
}

fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE.into())
}

fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn render_toml(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("# failed to render config: {e}"))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(&global.output, &cfg, render_toml, |c| {
                active_profile_name(global, c)
            })?;
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init { name, force } => {
            let mut cfg = config::load_config_or_default();
            if cfg.profiles.contains_key(&name) && !force {
                return Err(CliError::Validation {
                    field: "profile".into(),
                    reason: format!("profile '{name}' already exists (use --force to overwrite)"),
                });
            }

            let server = value_or_prompt(global.server.as_deref(), "Server URL", DEFAULT_SERVER)?;
            let api_url = value_or_prompt(global.api_url.as_deref(), "API path", DEFAULT_API_URL)?;
            config::resolve_api_url(&server, &api_url)?;

            let first = cfg.profiles.is_empty();
            cfg.profiles.insert(
                name.clone(),
                Profile {
                    server,
                    api_url,
                    insecure: global.insecure.then_some(true),
                    timeout: global.timeout,
                },
            );
            if first {
                cfg.default_profile = Some(name.clone());
            }

            let path = config::save_config(&cfg)?;
            output::print_status(
                &format!("Profile '{name}' written to {}", path.display()),
                color,
                global.quiet,
            );
            output::print_hint("Test it: stockroom health", color, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();

            match key.as_str() {
                "server" => profile.server = value,
                "api_url" | "api-url" => profile.api_url = value,
                "insecure" => {
                    profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                        field: "insecure".into(),
                        reason: "must be 'true' or 'false'".into(),
                    })?);
                }
                "timeout" => {
                    profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                        field: "timeout".into(),
                        reason: "must be a number (seconds)".into(),
                    })?);
                }
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown config key '{other}'. Valid keys: server, api_url, insecure, timeout"
                        ),
                    });
                }
            }
            config::resolve_api_url(&profile.server, &profile.api_url)?;

            config::save_config(&cfg)?;
            output::print_status(
                &format!("Set {key} on profile '{profile_name}'"),
                color,
                global.quiet,
            );
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or(DEFAULT_PROFILE);
            if cfg.profiles.is_empty() {
                output::print_hint(
                    "No profiles configured. Run: stockroom config init",
                    color,
                    global.quiet,
                );
                return Ok(());
            }
            let lines: Vec<String> = cfg
                .profiles
                .iter()
                .map(|(name, profile)| {
                    let marker = if name == default { "*" } else { " " };
                    format!("{marker} {name}\t{}{}", profile.server, profile.api_url)
                })
                .collect();
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::print_status(
                &format!("Default profile set to '{name}'"),
                color,
                global.quiet,
            );
            Ok(())
        }
    }
}
