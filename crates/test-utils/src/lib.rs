//! Test utilities for the order address crates.
//!
//! Fixtures pin a deterministic secret key base and seed so that tests across crates can compare
//! against the same golden values. Generators produce random and adversarial order ids.

pub mod fixtures;
pub mod generators;
pub mod prelude;
