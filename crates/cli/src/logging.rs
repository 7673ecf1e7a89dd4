use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";
const SILENT_FILTER: &str = "off";

/// Installs the stderr logger. `RUST_LOG` replaces the default filter unless `silent` is set.
pub(crate) fn init(silent: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(silent, EnvFilter::try_from_default_env().ok()))
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn filter(silent: bool, from_env: Option<EnvFilter>) -> EnvFilter {
    if silent {
        return EnvFilter::new(SILENT_FILTER);
    }

    from_env.unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
