//! Error types for the translation engine.
//!
//! Configuration problems (unknown locales, a default locale without loaded
//! translations, unreadable sources) surface as typed errors so the caller
//! decides whether to abort. Lookup misses are not errors: a missing key or
//! placeholder resolves to an empty string.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while configuring the engine or resolving a translation.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The locale identifier is not known to the locale catalog.
    #[error("unknown locale `{locale}`")]
    InvalidLocale {
        /// The rejected identifier.
        locale: String,
    },

    /// Every fallback failed and the default locale has no translations.
    #[error("no translations loaded for the default locale `{locale}`")]
    NoDefaultTranslations {
        /// The configured default locale.
        locale: String,
    },

    /// Placeholder expansion nested deeper than the configured limit.
    #[error("placeholder `{{{placeholder}}}` exceeded the expansion depth of {depth}")]
    CyclicPlaceholder {
        /// Name of the placeholder whose expansion crossed the limit.
        placeholder: String,
        /// The depth limit in force.
        depth: usize,
    },

    /// Translation documents could not be read.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Errors raised while reading translation documents.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A file or directory could not be read.
    #[error("failed to read {path}")]
    Io {
        /// Path that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A document was malformed.
    #[error("{path}:{line}: {reason}")]
    Parse {
        /// Document being parsed.
        path: Utf8PathBuf,
        /// One-based line number of the offending line.
        line: usize,
        /// Description of the syntax problem.
        reason: String,
    },

    /// A value cannot be represented as a translation attribute.
    #[error("{path}: unsupported value for `{key}`")]
    UnsupportedValue {
        /// Document being parsed.
        path: Utf8PathBuf,
        /// Dotted key of the offending value.
        key: String,
    },
}

/// Convenience alias for engine results.
pub type Result<T> = std::result::Result<T, I18nError>;
