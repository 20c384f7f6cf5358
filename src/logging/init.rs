use std::{path::Path, sync::Mutex};

use anyhow::{Context, Result};

// Keeps the non-blocking file writer alive until the process exits
static FILE_APPENDER_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> =
    Mutex::new(None);

/// Log file name prefix inside the store; the appender adds a date suffix.
pub const LOG_FILE: &str = "gvt.log";

fn base_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing on stderr. RUST_LOG (if set) takes precedence.
/// Otherwise, -v/-vv/-vvv map to "info"/"debug"/"trace".
///
/// # Errors
/// Returns an error if the filter directive is invalid.
pub fn init_tracing(verbosity: u8) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| base_filter(verbosity).to_string());

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_new(filter).context("invalid RUST_LOG / filter")?;

    // Allow re-init to be a no-op in tests
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();

    Ok(())
}

/// Initialize tracing on stderr plus a daily log file in the store.
///
/// # Errors
/// Returns an error if the filter directive is invalid.
pub fn init_tracing_with_file(store: &Path, verbosity: u8) -> Result<()> {
    use tracing_appender::rolling;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| base_filter(verbosity).to_string());
    let filter_layer = EnvFilter::try_new(filter).context("invalid RUST_LOG / filter")?;

    let file_appender = rolling::daily(store, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    if let Ok(mut guard_holder) = FILE_APPENDER_GUARD.lock() {
        *guard_holder = Some(guard);
    }

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(non_blocking);
    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    Ok(())
}

/// Flush and close the log file appender. Call before exiting the process,
/// since `std::process::exit` skips destructors.
pub fn flush_logs() {
    if let Ok(mut guard_holder) = FILE_APPENDER_GUARD.lock()
        && let Some(guard) = guard_holder.take()
    {
        drop(guard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_default_level() {
        assert_eq!(base_filter(0), "warn");
        assert_eq!(base_filter(1), "info");
        assert_eq!(base_filter(2), "debug");
        assert_eq!(base_filter(7), "trace");
    }
}
