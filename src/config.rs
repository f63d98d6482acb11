//! `treelingo.toml` loading and translator construction.
//!
//! Every field is optional. A missing file behaves like an empty one, so a
//! bare [`Settings::default`] yields a builtin-catalog translator on the
//! `de` default locale with no translations loaded.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;
use treelingo_engine::{
    DEFAULT_LOCALE, DEFAULT_MAX_DEPTH, I18nError, StaticCatalog, Translator, WellFormedCatalog,
};

use crate::selection::{LocaleCandidates, LocaleSelection, normalise_locale, select_locale};

/// File name looked up by [`Settings::discover`].
pub const CONFIG_FILE_NAME: &str = "treelingo.toml";

/// Environment variable consulted for the initial current locale.
pub const LOCALE_ENV_VAR: &str = "TREELINGO_LOCALE";

/// Errors raised while loading configuration or building the translator.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path}")]
    Io {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid `treelingo.toml`.
    #[error("invalid configuration {path}")]
    Parse {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Deserialisation failure.
        #[source]
        source: toml::de::Error,
    },

    /// The configured locales or translations were rejected by the engine.
    #[error(transparent)]
    Engine(#[from] I18nError),
}

/// How locale identifiers are validated.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogKind {
    /// The bundled list of ICU-style locale identifiers.
    #[default]
    Builtin,
    /// Any well-formed Unicode language identifier.
    WellFormed,
}

/// Settings read from `treelingo.toml`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Locale used when nothing better matches.
    pub default_locale: String,
    /// Preferred current locale when neither the caller nor the environment
    /// names one. Blank values are ignored.
    pub locale: Option<String>,
    /// Locale tried after the current locale and before language-subtag
    /// fallback. Blank values are ignored.
    pub forced_fallback_locale: Option<String>,
    /// Directory of translation documents. Relative paths are resolved
    /// against the configuration file's directory by [`Settings::load`].
    pub translations: Option<Utf8PathBuf>,
    /// Limit on nested placeholder lookups.
    pub max_placeholder_depth: usize,
    /// Locale catalog used for validation.
    pub catalog: CatalogKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_owned(),
            locale: None,
            forced_fallback_locale: None,
            translations: None,
            max_placeholder_depth: DEFAULT_MAX_DEPTH,
            catalog: CatalogKind::default(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text without touching the file system.
    ///
    /// # Errors
    ///
    /// Returns the deserialiser's error for malformed TOML, unknown fields or
    /// values of the wrong type.
    ///
    /// ```
    /// use treelingo::Settings;
    ///
    /// let settings = Settings::from_toml_str("locale = \"en_GB\"\n").expect("valid settings");
    /// assert_eq!(settings.locale(), Some("en_GB"));
    /// assert_eq!(settings.default_locale(), "de");
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it does not deserialise.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let mut settings = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        if let Some(base) = path.parent() {
            settings.translations = settings
                .translations
                .take()
                .map(|translations| relative_to(base, translations));
        }
        Ok(settings)
    }

    /// Load `treelingo.toml` from `directory` when it exists.
    ///
    /// # Errors
    ///
    /// As for [`Settings::load`].
    pub fn discover(directory: &Utf8Path) -> Result<Option<Self>, ConfigError> {
        let path = directory.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// The default locale, or `de` when the setting is blank.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        normalise_locale(Some(&self.default_locale)).unwrap_or(DEFAULT_LOCALE)
    }

    /// The configured current locale, if any.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        normalise_locale(self.locale.as_deref())
    }

    /// The configured forced fallback locale, if any.
    #[must_use]
    pub fn forced_fallback_locale(&self) -> Option<&str> {
        normalise_locale(self.forced_fallback_locale.as_deref())
    }

    /// Build a translator from these settings.
    ///
    /// The current locale is chosen from `explicit`, then `environment`,
    /// then [`Settings::locale`], then the default locale; see
    /// [`select_locale`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Engine`] when the default, explicit or
    /// configured locale is unknown to the catalog, or when the translations
    /// directory cannot be loaded. An unknown `environment` value is skipped.
    pub fn build(
        &self,
        explicit: Option<&str>,
        environment: Option<String>,
    ) -> Result<Configured, ConfigError> {
        let mut translator = match self.catalog {
            CatalogKind::Builtin => {
                Translator::with_default_locale(StaticCatalog::builtin(), self.default_locale())?
            }
            CatalogKind::WellFormed => {
                Translator::with_default_locale(WellFormedCatalog, self.default_locale())?
            }
        };
        translator.set_max_placeholder_depth(self.max_placeholder_depth);
        if let Some(directory) = &self.translations {
            translator.load_translations(directory)?;
        }
        if let Some(fallback) = self.forced_fallback_locale() {
            translator.set_forced_fallback_locale(fallback);
        }

        let candidates = LocaleCandidates {
            explicit,
            environment: environment.as_deref(),
            configuration: self.locale(),
        };
        let selection =
            select_locale(candidates, translator.default_locale(), translator.catalog())?;
        translator.set_current_locale(selection.locale().as_str())?;

        Ok(Configured {
            translator,
            selection,
        })
    }
}

fn relative_to(base: &Utf8Path, path: Utf8PathBuf) -> Utf8PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// A translator built from [`Settings`] and the locale selection that set
/// its current locale.
#[derive(Debug)]
pub struct Configured {
    translator: Translator,
    selection: LocaleSelection,
}

impl Configured {
    /// The configured translator.
    #[must_use]
    pub const fn translator(&self) -> &Translator {
        &self.translator
    }

    /// How the current locale was chosen.
    #[must_use]
    pub const fn selection(&self) -> &LocaleSelection {
        &self.selection
    }

    /// Consumes the outcome, yielding the translator.
    #[must_use]
    pub fn into_translator(self) -> Translator {
        self.translator
    }
}
