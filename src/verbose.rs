use std::time::Instant;

use tracing_subscriber::EnvFilter;

/// Install the stderr diagnostics subscriber. Without `verbose` nothing is
/// installed and library events are dropped.
///
/// `RUST_LOG` overrides the default `rowset=debug` filter.
pub fn init(verbose: bool) {
    if !verbose {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rowset=debug"));
    // An already-installed subscriber wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// A timer for measuring durations in verbose mode.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}
