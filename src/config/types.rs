use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults::{clamp_connect_timeout_secs, default_api_base, default_connect_timeout_secs};

/// Settings persisted in `config.toml`.
///
/// Config keys: `api_base`, `export_dir`, `[http]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base address of the scoring service; endpoints are joined onto it.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Where exported predictions are written; defaults to the app exports dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    #[serde(default)]
    pub http: HttpSettings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            export_dir: None,
            http: HttpSettings::default(),
        }
    }
}

impl ClientSettings {
    pub(crate) fn normalized(self) -> Self {
        let trimmed = self.api_base.trim().trim_end_matches('/');
        let api_base = if trimmed.is_empty() {
            default_api_base()
        } else {
            trimmed.to_string()
        };
        Self {
            api_base,
            export_dir: self.export_dir,
            http: self.http.normalized(),
        }
    }
}

/// Transport timeouts.
///
/// Config keys: `connect_timeout_secs`, `read_timeout_secs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Unset means a reply is awaited indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout_secs: Option<u64>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: None,
        }
    }
}

impl HttpSettings {
    fn normalized(self) -> Self {
        Self {
            connect_timeout_secs: clamp_connect_timeout_secs(self.connect_timeout_secs),
            read_timeout_secs: self.read_timeout_secs.filter(|secs| *secs > 0),
        }
    }
}
