//! Operator-facing log output.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialize console logging on stderr.
///
/// `RUST_LOG` always wins; otherwise only warnings are shown unless
/// `verbose` is set.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}
