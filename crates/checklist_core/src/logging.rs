//! Rolling file logging for the checklist core.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend at most once per process.
//! - Capture panics (including observer panics) as sanitized log events.
//!
//! # Invariants
//! - Re-initializing with the identical level and directory is a no-op.
//! - Re-initializing with a different level or directory is rejected.
//! - Initialization never panics.
//! - Core log events carry ids and counts only, never item names.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::path::PathBuf;

const LOG_BASENAME: &str = "checklist";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 3;
const PANIC_PAYLOAD_LIMIT: usize = 120;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Normalized logging request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogRequest {
    level: &'static str,
    dir: PathBuf,
}

struct ActiveLogger {
    request: LogRequest,
    _handle: LoggerHandle,
}

/// Starts file logging at `level` under absolute directory `log_dir`.
///
/// # Errors
/// - Unsupported level, or empty/relative `log_dir`.
/// - Directory creation or backend start failure.
/// - A logger is already active with a different level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let request = LogRequest {
        level: parse_level(level)?,
        dir: parse_dir(log_dir)?,
    };

    let active = ACTIVE.get_or_try_init(|| start(request.clone()))?;
    ensure_same(&active.request, &request)
}

/// Active `(level, log_dir)`, or `None` before `init_logging` succeeds.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.request.level, active.request.dir.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(request: LogRequest) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&request.dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            request.dir.display()
        )
    })?;

    let handle = Logger::try_with_str(request.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", request.level))?
        .log_to_file(
            FileSpec::default()
                .directory(request.dir.as_path())
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();
    info!(
        "event=logging_init module=core status=ok level={} version={} log_dir={}",
        request.level,
        env!("CARGO_PKG_VERSION"),
        request.dir.display()
    );

    Ok(ActiveLogger {
        request,
        _handle: handle,
    })
}

fn ensure_same(active: &LogRequest, requested: &LogRequest) -> Result<(), String> {
    if active.dir != requested.dir {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            active.dir.display(),
            requested.dir.display()
        ));
    }
    if active.level != requested.level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            active.level, requested.level
        ));
    }
    Ok(())
}

/// Maps a `log` level name onto the spec string `flexi_logger` expects.
///
/// `off` is rejected: the core always keeps at least error logging.
fn parse_level(level: &str) -> Result<&'static str, String> {
    let requested = level.trim();
    let filter = requested.parse::<LevelFilter>().map_err(|_| {
        format!("log level `{requested}` is not one of trace, debug, info, warn, error")
    })?;
    match filter {
        LevelFilter::Off => Err("log level `off` would silence the core logger".to_string()),
        LevelFilter::Error => Ok("error"),
        LevelFilter::Warn => Ok("warn"),
        LevelFilter::Info => Ok("info"),
        LevelFilter::Debug => Ok("debug"),
        LevelFilter::Trace => Ok("trace"),
    }
}

fn parse_dir(log_dir: &str) -> Result<PathBuf, String> {
    let dir = PathBuf::from(log_dir.trim());
    if dir.as_os_str().is_empty() {
        return Err("log directory is required".to_string());
    }
    if dir.is_relative() {
        return Err(format!(
            "log directory `{}` is relative; pass an absolute path",
            dir.display()
        ));
    }
    Ok(dir)
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            panic_summary(info)
        );
        previous(info);
    }));
}

fn panic_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = info
        .payload()
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    truncate_single_line(&payload, PANIC_PAYLOAD_LIMIT)
}

fn truncate_single_line(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let mut truncated: String = flattened.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
