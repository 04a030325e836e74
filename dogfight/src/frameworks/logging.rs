// File-backed tracing for the client. The terminal is in raw mode while a
// game runs, so logs never go to stdout.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn log_file_path(dir: &Path, now: SystemTime) -> PathBuf {
    let secs = now.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    dir.join(format!("dogfight-client-{secs}.log"))
}

/// Installs the global subscriber writing to a fresh log file in `dir`.
/// Returns the file path so the caller can report it.
pub fn init_file_logging(dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = log_file_path(dir, SystemTime::now());
    let file = File::create(&path)?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    let result = if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .json()
            .with_current_span(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .compact()
            .try_init()
    };
    result.map_err(|e| io::Error::other(format!("tracing init failed: {e}")))?;

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn when_log_path_is_built_then_it_is_stamped_with_unix_seconds() {
        let now = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let path = log_file_path(Path::new("/tmp/logs"), now);
        assert_eq!(path, PathBuf::from("/tmp/logs/dogfight-client-1700000000.log"));
    }
}
