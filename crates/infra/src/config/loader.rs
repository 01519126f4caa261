//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is validated before it is returned.
//!
//! ## Environment Variables
//! - `MOMENTUM_BASE_URL`: API base URL (required)
//! - `MOMENTUM_API_KEY`: value of the `apikey` header (required)
//! - `MOMENTUM_CLIENT_ID`: OAuth2 client id (required)
//! - `MOMENTUM_CLIENT_SECRET`: OAuth2 client secret (required)
//! - `MOMENTUM_RESOURCE`: OAuth2 resource (required)
//! - `MOMENTUM_TOKEN_URL`: token endpoint override
//! - `MOMENTUM_TIMEOUT_SECS`: request timeout in seconds
//! - `MOMENTUM_REFRESH_MARGIN_SECS`: token refresh margin in seconds
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./momentum.json` or `./momentum.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names one and two directories up
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use momentum_domain::{MomentumConfig, MomentumError, Result};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["momentum.json", "momentum.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `MomentumError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Validation fails
pub fn load() -> Result<MomentumConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `MomentumError::Config` if required variables are missing,
/// a numeric variable does not parse, or validation fails.
pub fn load_from_env() -> Result<MomentumConfig> {
    let mut config = MomentumConfig::new(
        env_var("MOMENTUM_BASE_URL")?,
        env_var("MOMENTUM_API_KEY")?,
        env_var("MOMENTUM_CLIENT_ID")?,
        env_var("MOMENTUM_CLIENT_SECRET")?,
        env_var("MOMENTUM_RESOURCE")?,
    );

    if let Ok(token_url) = std::env::var("MOMENTUM_TOKEN_URL") {
        config.auth.token_url = token_url;
    }
    if let Some(timeout) = env_number::<u64>("MOMENTUM_TIMEOUT_SECS")? {
        config.api.timeout_seconds = timeout;
    }
    if let Some(margin) = env_number::<u64>("MOMENTUM_REFRESH_MARGIN_SECS")? {
        config.auth.refresh_margin_seconds = margin;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `MomentumError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Validation fails
pub fn load_from_file(path: Option<PathBuf>) -> Result<MomentumConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MomentumError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => candidate_config_paths().ok_or_else(|| {
            MomentumError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MomentumError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`); a missing
/// extension is read as JSON.
fn parse_config(contents: &str, path: &Path) -> Result<MomentumConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MomentumError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MomentumError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(MomentumError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Returns the first existing candidate, or `None`.
pub fn candidate_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// Empty values count as missing.
fn env_var(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MomentumError::Config(format!("Missing required environment variable: {key}"))),
    }
}

/// Parse an optional numeric environment variable
fn env_number<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| MomentumError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}
