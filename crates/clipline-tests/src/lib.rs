//! Integration test crate for Clipline.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the clipline crates to verify they work together.

#[cfg(test)]
mod editing;

#[cfg(test)]
mod scrubbing;

/// Route `tracing` output from the libraries into the test harness.
#[cfg(test)]
pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
