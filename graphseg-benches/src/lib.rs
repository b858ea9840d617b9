//! Benchmark support crate for graphseg.
//!
//! Provides seeded synthetic terrains and edge lists plus the parameter
//! types used to label Criterion benchmark runs.

pub mod error;
pub mod params;
pub mod terrain;
