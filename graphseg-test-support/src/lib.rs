//! Shared test utilities used across graphseg crates.

pub mod proptest_profile;
pub mod tracing;
