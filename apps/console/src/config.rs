use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use shared::error::InputError;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub item_limit: u32,
    pub confirm_destructive: bool,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000".into(),
            item_limit: 50,
            confirm_destructive: true,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base: Option<String>,
    item_limit: Option<u32>,
    confirm_destructive: Option<bool>,
    log_filter: Option<String>,
}

/// Defaults, then the config file, then environment variables. An explicit
/// `path` must exist; the default `console.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if required => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base {
        settings.api_base = v;
    }
    if let Some(v) = file_cfg.item_limit {
        settings.item_limit = v;
    }
    if let Some(v) = file_cfg.confirm_destructive {
        settings.confirm_destructive = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("INVENTORY_API_BASE") {
        settings.api_base = v;
    }
    if let Some(v) = var("APP__API_BASE") {
        settings.api_base = v;
    }

    if let Some(v) = var("APP__ITEM_LIMIT") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.item_limit = parsed;
        }
    }

    if let Some(v) = var("APP__CONFIRM_DESTRUCTIVE") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.confirm_destructive = parsed;
        }
    }

    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

/// The console talks to the backend directly, so the base must be an
/// absolute http(s) URL.
pub fn validate_base_url(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            Ok(trimmed.to_string())
        }
        _ => Err(InputError::InvalidBaseUrl(trimmed.to_string())),
    }
}
