//! Client configuration: scoring service address, HTTP timeouts and the
//! export destination.
//!
//! Settings live in `config.toml` under the application directory. The
//! service address can be overridden per process through
//! [`API_BASE_ENV`], and per invocation by the caller.

use crate::app_dirs;

mod defaults;
mod errors;
mod load;
mod save;
mod types;


/// Default filename used to store the client configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that overrides `api_base`.
pub const API_BASE_ENV: &str = "OBRA_RISK_API_BASE";

pub use defaults::DEFAULT_API_BASE;
pub use errors::ConfigError;
pub use load::{config_path, load_from_path, load_or_default, resolve};
pub use save::{save, save_to_path};
pub use types::{ClientSettings, HttpSettings};

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
