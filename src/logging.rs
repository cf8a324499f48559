use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const APP_DIR: &str = "editor-presence";
const LOG_FILE_PREFIX: &str = "editor-presence.log";

#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Defaults to `<local data dir>/editor-presence/logs`
    pub log_dir: Option<PathBuf>,
    /// Used when `RUST_LOG` is unset
    pub default_filter: String,
    pub keep_days: u64,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            log_dir: None,
            default_filter: "info".to_string(),
            keep_days: 7,
        }
    }
}

/// Install console and daily-rolling file logging for the host process.
///
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn init_logging(options: LoggingOptions) -> WorkerGuard {
    let log_dir = options.log_dir.unwrap_or_else(default_log_directory);

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.default_filter));

    let console_layer = fmt::layer().with_target(true).with_thread_ids(false);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(file_writer);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: a global tracing subscriber is already installed");
    }

    tracing::info!("Logging initialized, log directory: {}", log_dir.display());
    tracing::info!("editor-presence version: {}", env!("CARGO_PKG_VERSION"));

    let removed = prune_old_logs(&log_dir, LOG_FILE_PREFIX, options.keep_days);
    if removed > 0 {
        tracing::debug!("Removed {} old log files", removed);
    }

    guard
}

fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("logs")
}

/// Delete rotated log files older than `keep_days`, returning how many went.
///
/// The un-suffixed current file is never touched.
pub fn prune_old_logs(log_dir: &Path, prefix: &str, keep_days: u64) -> usize {
    let cutoff = match keep_days
        .checked_mul(24 * 60 * 60)
        .and_then(|secs| SystemTime::now().checked_sub(Duration::from_secs(secs)))
    {
        Some(cutoff) => cutoff,
        None => {
            tracing::debug!("Log retention of {} days is out of range, skipping cleanup", keep_days);
            return 0;
        }
    };

    let entries = match std::fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Failed to read log directory for cleanup: {}", e);
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();

        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) if name.starts_with(prefix) && name != prefix => {}
            _ => continue,
        }

        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => continue,
        };

        if modified >= cutoff {
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => tracing::warn!("Failed to remove old log file {:?}: {}", path, e),
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;

    fn age_file(path: &Path, days: u64) {
        let then = SystemTime::now() - Duration::from_secs(days * 24 * 60 * 60);
        filetime::set_file_mtime(path, FileTime::from_system_time(then)).unwrap();
    }

    #[test]
    fn test_prune_removes_only_old_rotated_logs() {
        let dir = tempfile::tempdir().unwrap();
        let current = dir.path().join(LOG_FILE_PREFIX);
        let old = dir.path().join(format!("{}.2020-01-01", LOG_FILE_PREFIX));
        let recent = dir.path().join(format!("{}.2020-01-09", LOG_FILE_PREFIX));
        let unrelated = dir.path().join("notes.txt");

        for path in [&current, &old, &recent, &unrelated] {
            std::fs::write(path, "log").unwrap();
        }
        age_file(&current, 30);
        age_file(&old, 30);
        age_file(&recent, 1);
        age_file(&unrelated, 30);

        assert_eq!(prune_old_logs(dir.path(), LOG_FILE_PREFIX, 7), 1);
        assert!(current.exists());
        assert!(!old.exists());
        assert!(recent.exists());
        assert!(unrelated.exists());
    }

    #[test]
    fn test_prune_with_huge_retention_keeps_everything() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join(format!("{}.2020-01-01", LOG_FILE_PREFIX));
        std::fs::write(&old, "log").unwrap();
        age_file(&old, 30);

        assert_eq!(prune_old_logs(dir.path(), LOG_FILE_PREFIX, u64::MAX), 0);
        assert_eq!(prune_old_logs(dir.path(), LOG_FILE_PREFIX, 1 << 40), 0);
        assert!(old.exists());
    }

    #[test]
    fn test_prune_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(prune_old_logs(&dir.path().join("missing"), LOG_FILE_PREFIX, 7), 0);
    }
}
