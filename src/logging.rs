//! Logging setup: coloured stderr plus a JSON rolling log file.

use std::ffi::OsStr;
use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber.
///
/// Stderr is filtered by `RUST_LOG` (default `info`), the JSON file by
/// `RUST_LOG_JSON` (default `debug`). Keep the returned guard alive for the
/// lifetime of the process or buffered file output is lost.
pub fn init(log_file_path: &str) -> Result<WorkerGuard> {
    let log_dir = Path::new(log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("warehouse_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()?;

    Ok(guard)
}
