//! Process-wide tracing setup: stderr output plus an optional daily rolling log file.

use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Keeps the non-blocking file writer alive; drop it at process exit to flush.
pub struct TracingGuard {
    _file: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Installs the global subscriber. Filter from `RUST_LOG`, else `default_filter`.
///
/// When `log_dir` is set, events are also written to `<log_dir>/<app_name>.log.<date>`.
/// A second call is a no-op (the first subscriber stays installed).
pub fn init_tracing(app_name: &str, default_filter: &str, log_dir: Option<&Path>) -> TracingGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{}.log", app_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    TracingGuard { _file: guard }
}
