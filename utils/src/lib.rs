//! Shared utilities for the token pool accounting core.

pub mod logging;

pub use logging::{init_logging, LogFormat};
