use tracing_subscriber::EnvFilter;

/// Default filter when RUST_LOG is unset
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "racecontrol=debug"
    } else {
        "racecontrol=warn"
    }
}

/// Initialise stderr logging. RUST_LOG wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // Ignore the error if a subscriber is already set (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
