//! CLI library components for the user feed validator.

pub mod logging;
pub mod pipeline;
