//! Logging configuration shared by binaries and tests.
use tracing::Level;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    HumanReadable,
    Json,
}

/// Build an env filter using `default_level` unless `RUST_LOG` says
/// otherwise.
fn env_filter(default_level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy()
}

/// Configure the global subscriber.
///
/// Returns false if a global subscriber was already installed, in which case
/// this is a no-op.
pub fn configure_global_logger(default_level: Level, format: LogFormat) -> bool {
    let filter = env_filter(default_level);

    let result = match format {
        LogFormat::HumanReadable => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_file(true)
                .with_line_number(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Json => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .json()
                .with_current_span(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    result.is_ok()
}

/// Configure a logger that writes through the test harness so output is only
/// shown for failing tests.
pub fn configure_test_logger() -> bool {
    let subscriber = FmtSubscriber::builder()
        .with_test_writer()
        .with_env_filter(env_filter(Level::TRACE))
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).is_ok()
}
