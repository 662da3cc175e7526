//! CLI command handlers for `uniportal`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod dashboard;
pub mod shell;
pub mod views;
