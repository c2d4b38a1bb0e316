//! Shared utilities for stubforge crates

pub mod logging;

pub use logging::{init_logging, LogLevel, LogOptions};
