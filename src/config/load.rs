use std::path::{Path, PathBuf};

use serde::de::Error as SerdeDeError;

use crate::app_dirs;

use super::errors::ConfigError;
use super::types::ClientSettings;
use super::{API_BASE_ENV, CONFIG_FILE_NAME, map_app_dir_error};

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load settings from the default location, then apply the environment override.
///
/// A missing file yields defaults.
pub fn load_or_default() -> Result<ClientSettings, ConfigError> {
    let settings = load_from_path(&config_path()?)?;
    resolve(settings, std::env::var(API_BASE_ENV).ok().as_deref(), None)
}

/// Load and normalize settings from an explicit TOML file.
pub fn load_from_path(path: &Path) -> Result<ClientSettings, ConfigError> {
    if !path.exists() {
        return Ok(ClientSettings::default());
    }
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source: SerdeDeError::custom(source),
    })?;
    toml::from_str::<ClientSettings>(&text)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
        .map(ClientSettings::normalized)
}

/// Apply address overrides in precedence order (flag, then environment) and
/// validate the result.
pub fn resolve(
    mut settings: ClientSettings,
    env_api_base: Option<&str>,
    flag_api_base: Option<&str>,
) -> Result<ClientSettings, ConfigError> {
    let chosen = flag_api_base
        .or(env_api_base)
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(value) = chosen {
        settings.api_base = value.to_string();
    }
    let settings = settings.normalized();
    validate_api_base(&settings.api_base)?;
    Ok(settings)
}

fn validate_api_base(value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiBase {
        value: value.to_string(),
        reason,
    };
    let parsed = url::Url::parse(value).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}"))),
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(())
}
