use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "habitarc_streaks=debug";

/// Installs a JSON `tracing` subscriber filtered by `RUST_LOG`, falling back
/// to `DEFAULT_FILTER`. Returns `false` if a global subscriber was already set.
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .json()
        .try_init()
        .is_ok()
}
