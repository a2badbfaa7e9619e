//! Log output setup
//!
//! Library code only emits `tracing` events; the binary decides where they go.

/// Install a stderr subscriber. `RUST_LOG` wins over `filter` when set.
/// Calling this twice is harmless; the second call is ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(filter: &str) {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    if result.is_ok() {
        tracing::debug!(filter, "logging initialized");
    }
}

/// The browser build has no subscriber; events are dropped.
#[cfg(target_arch = "wasm32")]
pub fn init(_filter: &str) {}
