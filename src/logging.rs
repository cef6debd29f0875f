// Logging init: fmt subscriber on stderr with env-based filtering.
//
// Call sites across the crate use the `log` macros; the subscriber's log
// bridge picks those records up.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,media_relay=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
