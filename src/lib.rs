pub mod adapters;
pub mod application;
pub mod domain;

// Test utilities (available to unit tests across the crate)
#[cfg(test)]
pub mod test_utils;

// Re-exports for shorter use statements.
pub use application::*;
pub use domain::*;
