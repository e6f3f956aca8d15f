//! CLI library components for the csvjson converter.

pub mod cli;
pub mod logging;
