//! Boundary diagnostics.
//!
//! # Responsibility
//! - Turn panic payloads caught at the FFI boundary into single-line,
//!   length-capped `ffi_panic` events.
//! - Start the rolling file logger that receives those events, once per process.
//!
//! # Invariants
//! - Payload text never spans lines and never exceeds `MAX_PANIC_PAYLOAD_CHARS`.
//! - Logger start is idempotent for the same level and directory; any other
//!   combination is rejected without touching the running logger.
//! - Exported C functions never start the logger; hosts call `init_logging`
//!   through the FRB API or the CLI.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "libmodal";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

/// Renders a panic payload as a single sanitized, length-capped line.
pub(crate) fn payload_summary(payload: &(dyn Any + Send)) -> String {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    };

    let flattened = message.replace(['\n', '\r'], " ");
    match flattened.char_indices().nth(MAX_PANIC_PAYLOAD_CHARS) {
        Some((cut, _)) => format!("{}...", &flattened[..cut]),
        None => flattened,
    }
}

/// Formats the `ffi_panic` event for a panic caught around export `op`.
fn boundary_panic_event(op: &str, payload: &(dyn Any + Send)) -> String {
    format!(
        "event=ffi_panic module=guard status=error op={op} payload={}",
        payload_summary(payload)
    )
}

/// Logs a panic that the unwind barrier caught around export `op`.
pub(crate) fn log_boundary_panic(op: &str, payload: &(dyn Any + Send)) {
    error!("{}", boundary_panic_event(op, payload));
}

/// Level and directory a logger was (or is requested to be) started with.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LoggerConfig {
    level: &'static str,
    log_dir: PathBuf,
}

impl LoggerConfig {
    fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        let level = match level.trim().to_ascii_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" | "warning" => "warn",
            "error" => "error",
            other => {
                return Err(format!(
                    "unsupported log level `{other}`; expected trace|debug|info|warn|error"
                ))
            }
        };

        let trimmed = log_dir.trim();
        if trimmed.is_empty() {
            return Err("log_dir cannot be empty".to_string());
        }
        let log_dir = Path::new(trimmed);
        if !log_dir.is_absolute() {
            return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
        }

        Ok(Self {
            level,
            log_dir: log_dir.to_path_buf(),
        })
    }

    fn ensure_matches(&self, requested: &Self) -> Result<(), String> {
        if self == requested {
            return Ok(());
        }
        Err(format!(
            "logging already initialized with level `{}` at `{}`; refusing to switch to level `{}` at `{}`",
            self.level,
            self.log_dir.display(),
            requested.level,
            requested.log_dir.display()
        ))
    }
}

struct ActiveLogger {
    config: LoggerConfig,
    _handle: LoggerHandle,
}

/// Starts the rolling file logger.
///
/// Returns `Ok(())` when logging is active with exactly this `level` and
/// `log_dir`, or a human-readable error string otherwise.
///
/// # Errors
/// - `level` is not one of `trace|debug|info|warn|error`.
/// - `log_dir` is empty, relative, or cannot be created.
/// - The logger backend fails to start.
/// - A logger is already running with a different level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LoggerConfig::parse(level, log_dir)?;
    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(requested.clone()))?;
    active.config.ensure_matches(&requested)
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(config: LoggerConfig) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&config.log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            config.log_dir.display()
        )
    })?;

    let handle = Logger::try_with_str(config.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", config.level))?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();

    info!(
        "event=lib_start module=core status=ok platform={} build_mode={} version={} abi_version={} max_message_size={}",
        std::env::consts::OS,
        if cfg!(debug_assertions) { "debug" } else { "release" },
        env!("CARGO_PKG_VERSION"),
        crate::abi::ABI_VERSION,
        crate::limits::MAX_MESSAGE_SIZE
    );
    info!(
        "event=core_init module=core status=ok level={} log_dir={}",
        config.level,
        config.log_dir.display()
    );

    Ok(ActiveLogger {
        config,
        _handle: handle,
    })
}

/// Chains a hook that records every panic, including ones later caught by
/// the unwind barrier, before the previous hook runs.
///
/// Only called from `start_logger`, which `ACTIVE_LOGGER` runs at most once.
fn install_panic_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            payload_summary(info.payload())
        );
        previous_hook(info);
    }));
}
