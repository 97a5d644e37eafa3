//! Test utilities shared by the unit tests.
//!
//! This module provides:
//! - Test data factories for creating valid fixtures
//! - Failure-injecting store implementations for error-path tests

mod factories;
mod store_mocks;

pub use factories::*;
pub use store_mocks::*;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Route tracing output to the test harness. Safe to call from every test;
/// only the first call installs the subscriber.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}
