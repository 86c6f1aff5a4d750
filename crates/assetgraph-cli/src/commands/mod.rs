//! CLI command implementations

pub mod completions;
pub mod config;
pub mod connection;
pub mod node;
pub mod relationship;
