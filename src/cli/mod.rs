//! CLI module for Bargain Wala

pub mod app;
pub mod commands;

pub use app::{describe_event, BargainApp};
pub use commands::{Cli, Commands};
