//! Nullable infrastructure for deterministic testing.
//!
//! The keeper reaches storage only through the `tokenpool-store` traits. This
//! crate provides an implementation that keeps everything in memory, never
//! touches the filesystem, and iterates in a fixed order.
//!
//! Usage: build a [`NullStore`], seed it, and hand it to a state context.

pub mod store;

pub use store::NullStore;
