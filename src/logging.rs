use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter, e.g. `MENU_PLANNER_LOG=debug`.
pub const LOG_ENV: &str = "MENU_PLANNER_LOG";

/// Level used when the environment does not set one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Initialize stderr logging. `verbose` raises the default level to `debug`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
