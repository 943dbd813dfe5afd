//! Log output for the script binaries.

use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Install a `tracing` subscriber writing to stderr, so stdout only carries
/// the result line. Verbosity follows `RUST_LOG`, `info` by default.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
