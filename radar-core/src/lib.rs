//! Pure analytical core for marketplace pricing decisions.
//!
//! Everything in this crate is deterministic local arithmetic over
//! immutable inputs: no I/O, no logging, no shared mutable state. The
//! surrounding crates (`radar-pipeline`, `radar-cli`) are responsible for
//! loading data and presenting results.

pub mod advice;
pub mod elasticity;
pub mod error;
pub mod forecast;
pub mod simulator;
pub mod stats;
pub mod thresholds;
