//! Common utilities for the trellis layout engine.
//!
//! This crate provides shared infrastructure used by the style and layout crates:
//! - **Warning System** - deduplicated diagnostics for ignored or unsupported input

pub mod warning;
