//! CLI library components for the semantic bridge.

pub mod config;
pub mod logging;
pub mod pipeline;
