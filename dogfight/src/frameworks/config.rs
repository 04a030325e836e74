use std::{env, path::PathBuf, time::Duration};

// Runtime/client constants (not gameplay tuning).

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 51515;

fn millis(key: &str, default: u64) -> Duration {
    let millis = env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_millis(millis)
}

pub fn host() -> String {
    env::var("DOGFIGHT_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string())
}

pub fn port() -> u16 {
    env::var("DOGFIGHT_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

// Keyboard poll timeout; doubles as the frame pacing.
pub fn frame_interval() -> Duration {
    millis("DOGFIGHT_FRAME_MS", 30)
}

// Bound on every individual send/receive to the relay.
pub fn net_timeout() -> Duration {
    millis("DOGFIGHT_NET_TIMEOUT_MS", 3000)
}

pub fn bootstrap_timeout() -> Duration {
    millis("DOGFIGHT_BOOTSTRAP_TIMEOUT_MS", 120_000)
}

pub fn arena_margin() -> u16 {
    env::var("DOGFIGHT_ARENA_MARGIN")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(6)
}

pub fn logging_enabled() -> bool {
    matches!(env::var("DOGFIGHT_LOGGING").as_deref(), Ok("1") | Ok("true"))
}

pub fn log_dir() -> PathBuf {
    env::var_os("DOGFIGHT_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn settings_path() -> PathBuf {
    if let Some(path) = env::var_os("DOGFIGHT_SETTINGS") {
        return PathBuf::from(path);
    }
    let home = env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".dogfight.toml")
}
