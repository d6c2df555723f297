//! `fieldops-observability` — tracing/logging setup.

pub mod tracing;

pub use tracing::{LogFormat, init};
