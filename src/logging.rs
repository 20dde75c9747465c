use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise `info`, or `debug`
/// when `verbose` is requested. Calling this twice is harmless; the second
/// call is ignored.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
