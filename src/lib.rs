//! Treelingo resolves translation keys against per-locale trees loaded from
//! SML or TOML documents.
//!
//! This crate adds `treelingo.toml` configuration and initial locale
//! selection on top of [`treelingo_engine`], whose public API it re-exports.
//!
//! ```
//! use treelingo::{Settings, Substitutions, TranslationTree};
//!
//! let configured = Settings::default().build(Some("en_GB"), None)?;
//! let mut translator = configured.into_translator();
//! translator.insert_translations("de", TranslationTree::new().with_attribute("hi", "Hallo {who}"));
//! translator.insert_translations("en", TranslationTree::new().with_attribute("hi", "Hello {who}"));
//!
//! let greeting = translator.translate("hi", &Substitutions::new().with("who", "Ada"))?;
//! assert_eq!(greeting, "Hello Ada");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod selection;

pub use config::{CONFIG_FILE_NAME, CatalogKind, ConfigError, Configured, LOCALE_ENV_VAR, Settings};
pub use selection::{
    LocaleCandidates, LocaleSelection, LocaleSource, locale_from_environment, normalise_locale, select_locale,
};
pub use treelingo_engine::{
    AttributeValues, DEFAULT_LOCALE, DEFAULT_MAX_DEPTH, I18nError, LocaleCatalog, LocaleId,
    ResolutionSource, ResolvedLocale, SharedTranslator, SmlSource, SourceError, SourceRegistry,
    StaticCatalog, Substitutions, TomlSource, TranslationDocument, TranslationSource,
    TranslationStore, TranslationTree, Translator, WellFormedCatalog,
};
