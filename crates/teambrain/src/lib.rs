//! Team Brain command-line tools.

pub mod cli;
pub mod commands;
