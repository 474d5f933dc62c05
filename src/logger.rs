use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(default_filter: &str) -> EnvFilter {
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_filter.to_string());
    EnvFilter::try_new(&rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {} '{}', falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            rust_log,
            LevelFilter::WARN,
            err,
        );
        EnvFilter::new(LevelFilter::WARN.to_string())
    })
}

// Logs go to stderr so they never interleave with the menu on stdout
pub fn init_logger(default_filter: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(default_filter))
        .try_init()
}

#[must_use]
pub fn init_test_logger() -> tracing::dispatcher::DefaultGuard {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .with(env_filter(&LevelFilter::DEBUG.to_string()))
        .set_default()
}
