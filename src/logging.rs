//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber for the current process.
///
/// Honours `RUST_LOG` (e.g. `RUST_LOG=estate=debug`) and falls back to
/// `info`. Calling it again after a subscriber is installed is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
