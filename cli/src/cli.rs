//! CLI argument definitions for `treelingo`.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Translate keys from hierarchical, per-locale translation files.
#[derive(Parser, Debug, Clone)]
#[command(name = "treelingo")]
#[command(version, about)]
#[command(after_help = concat!(
    "LOCALE SELECTION:\n",
    "  The current locale is taken from --locale, then TREELINGO_LOCALE, then the\n",
    "  `locale` entry of treelingo.toml, then the default locale. An unknown\n",
    "  --locale or configured locale is an error; an unknown TREELINGO_LOCALE is\n",
    "  ignored.\n\n",
    "EXAMPLES:\n",
    "  Translate a nested key with a substitution:\n",
    "    $ treelingo --dir i18n translate nav.greeting --set name=Ada\n\n",
    "  List the keys available in Welsh:\n",
    "    $ treelingo --locale cy keys\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file [default: treelingo.toml in the working directory, when present].
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Directory of translation documents, overriding the configuration.
    #[arg(long, value_name = "DIR", global = true)]
    pub dir: Option<Utf8PathBuf>,

    /// Current locale, overriding TREELINGO_LOCALE and the configuration.
    #[arg(long, value_name = "ID", global = true)]
    pub locale: Option<String>,

    /// Default locale, overriding the configuration.
    #[arg(long, value_name = "ID", global = true)]
    pub default_locale: Option<String>,

    /// Locale tried before language-subtag fallback.
    #[arg(long, value_name = "ID", global = true)]
    pub fallback_locale: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the translation of a key.
    Translate(TranslateArgs),

    /// List every key of the resolved locale.
    Keys,

    /// List loaded locales, marking the one lookups resolve to.
    Locales,
}

/// Arguments for the translate command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TranslateArgs {
    /// Dotted key to translate.
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Substitute a placeholder (can be repeated).
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub substitutions: Vec<String>,
}
