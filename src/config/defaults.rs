/// Address used when neither the config file nor the environment names one.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

pub(super) fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

pub(super) fn default_connect_timeout_secs() -> u64 {
    10
}

pub(super) fn clamp_connect_timeout_secs(value: u64) -> u64 {
    value.clamp(1, 300)
}
