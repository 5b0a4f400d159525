use crate::config::{Config, DebugLogRotation};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "coach-potato-debug.log";

/// Keeps the background log writer alive; logs are flushed when dropped.
pub struct LogGuard {
    _guard: WorkerGuard,
    path: PathBuf,
}

impl LogGuard {
    /// File (or, for daily rotation, base file name) receiving the logs
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Initialize debug logging.
///
/// When `debug` is enabled, logs go to `<config dir>/coach-potato/coach-potato-debug.log`
/// unless `debug_log_path` says otherwise. When disabled, this is a no-op.
/// `RUST_LOG` overrides the default filter.
pub fn init(config: &Config) -> Result<Option<LogGuard>> {
    if !config.debug {
        return Ok(None);
    }

    let rotation = config.debug_log_rotation.unwrap_or(DebugLogRotation::Session);
    let base = resolve_base_log_path(config.debug_log_path.as_deref())?;
    let (writer, path, guard) = open_writer(&base, rotation, config.debug_log_keep)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("coach_potato=debug,warn"))
        .unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok(); // Already initialized (e.g. in tests) is fine.

    tracing::info!(log_file = %path.display(), rotation = ?rotation, "debug logging enabled");

    Ok(Some(LogGuard {
        _guard: guard,
        path,
    }))
}

fn open_writer(
    base: &Path,
    rotation: DebugLogRotation,
    keep: Option<usize>,
) -> Result<(NonBlocking, PathBuf, WorkerGuard)> {
    match rotation {
        DebugLogRotation::None => {
            ensure_parent_dir(base)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(base)
                .with_context(|| format!("Failed to open log file: {}", base.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            Ok((writer, base.to_path_buf(), guard))
        }
        DebugLogRotation::Daily => {
            let (dir, base_name) = split_dir_and_name(base)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            // tracing_appender::rolling::daily names files `{base_name}.{YYYY-MM-DD}`
            cleanup_rotated_logs(&dir, &format!("{base_name}."), keep.unwrap_or(7))?;

            let appender = tracing_appender::rolling::daily(&dir, &base_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            Ok((writer, base.to_path_buf(), guard))
        }
        DebugLogRotation::Session => {
            let (dir, base_name) = split_dir_and_name(base)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            cleanup_rotated_logs(&dir, &format!("{base_name}.session-"), keep.unwrap_or(20))?;

            let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
            let session_path = dir.join(format!("{base_name}.session-{ts}"));
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&session_path)
                .with_context(|| format!("Failed to open log file: {}", session_path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            Ok((writer, session_path, guard))
        }
    }
}

fn resolve_base_log_path(config_value: Option<&str>) -> Result<PathBuf> {
    let Some(raw) = config_value else {
        let config_path = crate::config::config_path()?;
        return Ok(config_path.with_file_name(LOG_FILE_NAME));
    };

    let path = PathBuf::from(expand_tilde(raw));

    // Trailing separator or an existing directory: put the default file inside.
    if raw.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return Ok(path.join(LOG_FILE_NAME));
    }

    Ok(path)
}

fn expand_tilde(raw: &str) -> String {
    if raw == "~" || raw.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            let suffix = raw.strip_prefix('~').unwrap_or("");
            return format!("{}{}", home.display(), suffix);
        }
    }
    raw.to_string()
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    Ok(())
}

fn split_dir_and_name(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Invalid debug_log_path: not valid UTF-8")?
        .to_string();
    Ok((dir, name))
}

/// Delete all but the newest `keep` files in `dir` starting with `prefix`.
fn cleanup_rotated_logs(dir: &Path, prefix: &str, keep: usize) -> Result<()> {
    if keep == 0 {
        return Ok(());
    }

    let mut candidates: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?
    {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else { continue };
        if name.starts_with(prefix) {
            candidates.push(name.to_string());
        }
    }

    // Suffixes are timestamps, so lexicographic order is chronological.
    candidates.sort();
    candidates.reverse();

    for name in candidates.iter().skip(keep) {
        let path = dir.join(name);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(error = %e, file = %path.display(), "failed to remove old log file");
        }
    }

    Ok(())
}

/// Best-effort redaction of `api_key=...` values in URLs and upstream error text.
pub fn redact_secrets(input: &str) -> String {
    const MARKER: &str = "api_key=";

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(MARKER) {
        let value_start = pos + MARKER.len();
        out.push_str(&rest[..value_start]);

        let value_len = rest[value_start..]
            .find(|c: char| matches!(c, '&' | '"' | '\'' | ' ' | '\n' | '#'))
            .unwrap_or(rest.len() - value_start);

        if value_len > 0 {
            out.push_str("***REDACTED***");
        }
        rest = &rest[value_start + value_len..];
    }

    out.push_str(rest);
    out
}
