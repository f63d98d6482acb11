//! Errors reported by the `treelingo` command.

use std::io;

use thiserror::Error;
use treelingo::{ConfigError, I18nError};

/// Errors that end a `treelingo` invocation with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// `treelingo.toml` could not be loaded or applied.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A lookup failed after the translator was built.
    #[error(transparent)]
    Engine(#[from] I18nError),

    /// A `--set` argument was not of the form `NAME=VALUE`.
    #[error("invalid substitution `{raw}`; expected NAME=VALUE")]
    InvalidSubstitution {
        /// The argument as given.
        raw: String,
    },

    /// The working directory could not be determined.
    #[error("cannot use the working directory: {reason}")]
    WorkingDirectory {
        /// Description of the failure.
        reason: String,
    },

    /// Writing the command's output failed.
    #[error("failed to write output")]
    Output(#[from] io::Error),
}

/// Convenience alias for CLI results.
pub type Result<T> = std::result::Result<T, CliError>;
