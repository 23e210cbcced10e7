use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber. Honors `RUST_LOG`, defaults to `info`.
///
/// Output goes to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loads variables from `.env` when one exists.
pub fn init_env() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => debug!("Ignoring unreadable .env: {}", err),
    }
}
