//! Tracing subscriber setup for the binary

use tracing_subscriber::EnvFilter;

/// Initialise diagnostics on stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` for this
/// crate and `warn` everywhere else.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "warn,reelclean=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
