//! Shared configuration for the stockroom CLI and TUI.
//!
//! TOML profiles naming item servers, figment layering (defaults, file,
//! environment), and translation to `stockroom_core::ClientConfig`. Both
//! binaries depend on this crate; their flags override what it loads.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use stockroom_core::ClientConfig;

pub const DEFAULT_SERVER: &str = "http://localhost:8000";
pub const DEFAULT_API_URL: &str = "/api";
pub const DEFAULT_PROFILE: &str = "default";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    UnknownProfile { name: String, available: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named item-server profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named item server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Server origin (e.g., "http://localhost:8000").
    #[serde(default = "default_server")]
    pub server: String,

    /// API base. Absolute URLs are used as-is; paths resolve against `server`.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            server: default_server(),
            api_url: default_api_url(),
            insecure: None,
            timeout: None,
        }
    }
}

fn default_server() -> String {
    DEFAULT_SERVER.into()
}
fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

impl Config {
    /// Look up a profile by name, or the default profile.
    ///
    /// With no profiles configured at all, the default profile resolves
    /// to the built-in `http://localhost:8000` + `/api`.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let name = name
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.into());

        if let Some(profile) = self.profiles.get(&name) {
            return Ok((name, profile.clone()));
        }
        if name == DEFAULT_PROFILE && self.profiles.is_empty() {
            return Ok((name, Profile::default()));
        }

        let available = if self.profiles.is_empty() {
            "none".to_owned()
        } else {
            self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
        };
        Err(ConfigError::UnknownProfile { name, available })
    }
}

/// Command-line overrides applied on top of the selected profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub server: Option<String>,
    pub api_url: Option<String>,
    pub timeout: Option<u64>,
    /// Only ever turns certificate checks off; `false` leaves the profile alone.
    pub insecure: bool,
}

impl Config {
    /// Resolve the named (or default) profile, apply `overrides`, and build
    /// the client configuration both binaries connect with.
    pub fn client_config(
        &self,
        profile: Option<&str>,
        overrides: &Overrides,
    ) -> Result<ClientConfig, ConfigError> {
        let (_, mut profile) = self.profile(profile)?;
        if let Some(server) = &overrides.server {
            profile.server.clone_from(server);
        }
        if let Some(api_url) = &overrides.api_url {
            profile.api_url.clone_from(api_url);
        }
        if overrides.timeout.is_some() {
            profile.timeout = overrides.timeout;
        }
        if overrides.insecure {
            profile.insecure = Some(true);
        }
        profile_to_client_config(&profile, &self.defaults)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "stockroom", "stockroom").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("stockroom");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file yields the defaults.
///
/// Environment overrides use `STOCKROOM_` and `__` as the nesting
/// separator, e.g. `STOCKROOM_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("STOCKROOM_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if anything goes wrong.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Resolution ──────────────────────────────────────────────────────

/// Combine a server origin and an API base into the URL the client uses.
///
/// `api_url` wins outright when absolute. Otherwise it resolves against
/// `server` like a browser resolves a relative link: `/api` replaces the
/// server's path, `api` appends to it.
pub fn resolve_api_url(server: &str, api_url: &str) -> Result<Url, ConfigError> {
    if let Ok(absolute) = Url::parse(api_url) {
        return Ok(absolute);
    }

    let base = Url::parse(server).map_err(|e| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL '{server}': {e}"),
    })?;
    base.join(api_url).map_err(|e| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("cannot resolve '{api_url}' against '{server}': {e}"),
    })
}

/// Build a `ClientConfig` from a profile and the global defaults.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let api_url = resolve_api_url(&profile.server, &profile.api_url)?;
    Ok(ClientConfig {
        api_url,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        accept_invalid_certs: profile.insecure.unwrap_or(defaults.insecure),
    })
}
