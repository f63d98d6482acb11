//! Library half of the `treelingo` command-line tool.
//!
//! The binary only parses arguments and maps the outcome of
//! [`commands::run`] to an exit code; everything else lives here so it can
//! be exercised without spawning a process.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`commands`] - Settings assembly and subcommand execution
//! - [`error`] - Errors surfaced to the user
//! - [`output`] - Formatting for key and locale listings

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
