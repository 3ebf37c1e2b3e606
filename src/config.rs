//! Client configuration: server base URL, CSRF token, endpoint templates.
//!
//! Loaded from `funnel.toml` in the working directory, falling back to
//! `<config dir>/funnel/config.toml`. Environment variables override the
//! file for the secrets (`FUNNEL_CSRF_TOKEN`, `FUNNEL_SESSION_COOKIE`) and
//! the base URL (`FUNNEL_BASE_URL`).

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder substituted with the record identifier in endpoint templates.
pub const LEAD_PLACEHOLDER: &str = "{lead}";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Origin of the CRM web application, e.g. `https://crm.example.com`.
    pub base_url: String,

    /// CSRF token sent as both header and form field.
    #[serde(default)]
    pub csrf_token: Option<String>,

    /// Session cookie value (the `sessionid` cookie of the web app).
    #[serde(default)]
    pub session_cookie: Option<String>,

    /// Default board snapshot path (leads + reasons JSON).
    #[serde(default)]
    pub snapshot: Option<PathBuf>,

    /// Endpoint URL templates keyed by operation.
    #[serde(default)]
    pub urls: Endpoints,
}

/// Endpoint URL templates. Each mutation/read template contains a `{lead}`
/// placeholder segment; `invoice_add` is a plain view URL the warning
/// dialog navigates to with `?lead=<id>` appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub update_stage: String,
    pub update_status: String,
    pub lead_products: String,
    pub invoice_add: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            update_stage: "/enquiries/update-stage/{lead}/".to_string(),
            update_status: "/enquiries/update-status/{lead}/".to_string(),
            lead_products: "/enquiries/{lead}/products/".to_string(),
            invoice_add: "/invoices/add/".to_string(),
        }
    }
}

impl Config {
    /// Apply environment overrides on top of file values.
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("FUNNEL_BASE_URL") {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(token) = std::env::var("FUNNEL_CSRF_TOKEN") {
            if !token.is_empty() {
                self.csrf_token = Some(token);
            }
        }
        if let Ok(cookie) = std::env::var("FUNNEL_SESSION_COOKIE") {
            if !cookie.is_empty() {
                self.session_cookie = Some(cookie);
            }
        }
    }
}

/// Load configuration from an explicit path, `./funnel.toml`, or the user
/// config directory, in that order.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match discover_config_path() {
            Some(p) => p,
            None => bail!(
                "No configuration found. Create funnel.toml in the working directory \
                 or {}",
                default_config_path().display()
            ),
        },
    };

    let mut config = parse_config_file(&path)?;
    config.apply_env();
    Ok(config)
}

/// Parse a config file without environment overrides.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    if config.base_url.is_empty() {
        bail!("base_url must not be empty in {}", path.display());
    }
    Ok(config)
}

fn discover_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("funnel.toml");
    if local.exists() {
        return Some(local);
    }
    let global = default_config_path();
    if global.exists() {
        return Some(global);
    }
    None
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("funnel")
        .join("config.toml")
}
