use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_DATA_PATH: &str = "data/db.json";
pub const DEFAULT_STATIC_DIR: &str = "client/dist";
pub const DEFAULT_DATA_REFRESH_SECS: u64 = 30;

pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn data_path() -> PathBuf {
    non_blank_var("DATA_PATH")
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_owned())
        .into()
}

pub fn static_dir() -> PathBuf {
    non_blank_var("STATIC_DIR")
        .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_owned())
        .into()
}

pub fn data_refresh_interval() -> Duration {
    std::env::var("DATA_REFRESH_SECS")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_DATA_REFRESH_SECS))
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
