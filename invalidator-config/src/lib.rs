//! Configuration management for the invalidator.
//!
//! Provides environment detection, layered configuration loading from YAML files and
//! environment variables, and the shared configuration types used by the Lambda binary.

mod environment;
mod load;
pub mod shared;

pub use environment::*;
pub use load::*;
