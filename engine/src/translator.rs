//! The translation entry point.

use std::fmt;

use camino::Utf8Path;

use crate::catalog::{LocaleCatalog, StaticCatalog};
use crate::error::Result;
use crate::interpolate::{DEFAULT_MAX_DEPTH, Interpolator, Substitutions};
use crate::locale::LocaleId;
use crate::resolver::{ResolvedLocale, resolve_locale};
use crate::source::SourceRegistry;
use crate::state::LocaleState;
use crate::store::TranslationStore;
use crate::tree::TranslationTree;

/// Default locale used until [`Translator::set_default_locale`] says
/// otherwise.
pub const DEFAULT_LOCALE: &str = "de";

/// Resolves translation keys for the configured locales.
///
/// ```
/// use treelingo_engine::{StaticCatalog, Substitutions, TranslationTree, Translator};
///
/// let catalog = StaticCatalog::from_locales(["de", "en", "en_US"]);
/// let mut translator = Translator::with_catalog(catalog)?;
/// translator.insert_translations("de", TranslationTree::new().with_attribute("hello", "Hallo {name}"));
/// translator.insert_translations("en", TranslationTree::new().with_attribute("hello", "Hello {name}"));
/// translator.set_current_locale("en_US")?;
///
/// let greeting = translator.translate("hello", &Substitutions::new().with("name", "Ada"))?;
/// assert_eq!(greeting, "Hello Ada");
/// # Ok::<(), treelingo_engine::I18nError>(())
/// ```
pub struct Translator {
    catalog: Box<dyn LocaleCatalog + Send + Sync>,
    sources: SourceRegistry,
    state: LocaleState,
    store: TranslationStore,
    max_placeholder_depth: usize,
}

impl Translator {
    /// A translator backed by [`StaticCatalog::builtin`] with
    /// [`DEFAULT_LOCALE`] as both default and current locale.
    ///
    /// # Errors
    ///
    /// Returns [`crate::I18nError::InvalidLocale`] if the bundled catalog
    /// does not list [`DEFAULT_LOCALE`].
    pub fn new() -> Result<Self> {
        Self::with_catalog(StaticCatalog::builtin())
    }

    /// A translator validating locales against `catalog`, starting on
    /// [`DEFAULT_LOCALE`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::I18nError::InvalidLocale`] when `catalog` does not
    /// know [`DEFAULT_LOCALE`].
    pub fn with_catalog(catalog: impl LocaleCatalog + Send + Sync + 'static) -> Result<Self> {
        Self::with_default_locale(catalog, DEFAULT_LOCALE)
    }

    /// A translator whose default and current locale is `default`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::I18nError::InvalidLocale`] when `catalog` does not
    /// know `default`.
    pub fn with_default_locale(
        catalog: impl LocaleCatalog + Send + Sync + 'static,
        default: &str,
    ) -> Result<Self> {
        let default = LocaleId::parse(default, &catalog)?;
        Ok(Self {
            catalog: Box::new(catalog),
            sources: SourceRegistry::default(),
            state: LocaleState::new(default),
            store: TranslationStore::new(),
            max_placeholder_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// A builtin-catalog translator that loads `path` when given and then
    /// switches to `current` when given.
    ///
    /// # Errors
    ///
    /// Propagates load failures and [`crate::I18nError::InvalidLocale`] for
    /// an unknown `current` locale.
    pub fn with_options(path: Option<&Utf8Path>, current: Option<&str>) -> Result<Self> {
        let mut translator = Self::new()?;
        if let Some(path) = path {
            translator.load_translations(path)?;
        }
        if let Some(current) = current {
            translator.set_current_locale(current)?;
        }
        Ok(translator)
    }

    /// Replace the sources consulted by [`Self::load_translations`].
    #[must_use]
    pub fn with_sources(mut self, sources: SourceRegistry) -> Self {
        self.sources = sources;
        self
    }

    /// The catalog locales are validated against.
    #[must_use]
    pub fn catalog(&self) -> &(dyn LocaleCatalog + Send + Sync) {
        &*self.catalog
    }

    /// Whether the catalog knows `locale`.
    #[must_use]
    pub fn is_valid_locale(&self, locale: &str) -> bool {
        self.catalog.is_known_locale(locale)
    }

    /// Whether the catalog knows the time zone `zone`.
    #[must_use]
    pub fn is_valid_time_zone(&self, zone: &str) -> bool {
        self.catalog.is_known_time_zone(zone)
    }

    /// Replace the default locale.
    ///
    /// # Errors
    ///
    /// Returns [`crate::I18nError::InvalidLocale`] for unknown locales and
    /// leaves the default unchanged.
    pub fn set_default_locale(&mut self, locale: &str) -> Result<()> {
        self.state.set_default(locale, &*self.catalog)
    }

    /// Replace the current locale.
    ///
    /// # Errors
    ///
    /// Returns [`crate::I18nError::InvalidLocale`] for unknown locales, after
    /// resetting the current locale to the default.
    pub fn set_current_locale(&mut self, locale: &str) -> Result<()> {
        self.state.set_current(locale, &*self.catalog)
    }

    /// Set the locale tried before language-subtag and default fallback.
    /// Unknown locales are replaced with the default locale.
    pub fn set_forced_fallback_locale(&mut self, locale: &str) {
        self.state.set_forced_fallback(locale, &*self.catalog);
    }

    /// Remove the forced fallback locale.
    pub fn clear_forced_fallback_locale(&mut self) {
        self.state.clear_forced_fallback();
    }

    /// The default locale.
    #[must_use]
    pub const fn default_locale(&self) -> &LocaleId {
        self.state.default_locale()
    }

    /// The current locale.
    #[must_use]
    pub const fn current_locale(&self) -> &LocaleId {
        self.state.current_locale()
    }

    /// The forced fallback locale, when one is set.
    #[must_use]
    pub const fn forced_fallback_locale(&self) -> Option<&LocaleId> {
        self.state.forced_fallback_locale()
    }

    /// Load every recognised document in `directory` into the store.
    /// Returns the number of top-level nodes stored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::I18nError::Source`] when the directory or one of its
    /// documents cannot be read. Documents parsed before the failure stay
    /// loaded.
    pub fn load_translations(&mut self, directory: &Utf8Path) -> Result<usize> {
        Ok(self.store.load_directory(directory, &self.sources)?)
    }

    /// Store `tree` under `name`, replacing any earlier tree.
    pub fn insert_translations(
        &mut self,
        name: impl Into<String>,
        tree: TranslationTree,
    ) -> Option<TranslationTree> {
        self.store.insert(name, tree)
    }

    /// Names of the loaded translation trees, sorted.
    pub fn available_translations(&self) -> impl Iterator<Item = &str> {
        self.store.names()
    }

    /// The loaded translations.
    #[must_use]
    pub const fn translations(&self) -> &TranslationStore {
        &self.store
    }

    /// The limit on nested placeholder lookups.
    #[must_use]
    pub const fn max_placeholder_depth(&self) -> usize {
        self.max_placeholder_depth
    }

    /// Replace the limit on nested placeholder lookups.
    pub const fn set_max_placeholder_depth(&mut self, depth: usize) {
        self.max_placeholder_depth = depth;
    }

    /// The tree a lookup would search right now, and why.
    ///
    /// # Errors
    ///
    /// Returns [`crate::I18nError::NoDefaultTranslations`] when no fallback
    /// applies and the default locale has no translations.
    pub fn resolved_locale(&self) -> Result<ResolvedLocale<'_>> {
        resolve_locale(&self.state.context(), &self.store)
    }

    /// Translate `key`, expanding placeholders from `substitutions` or, for
    /// names not supplied, from other keys of the same locale.
    ///
    /// Missing keys and unresolvable placeholders yield empty strings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::I18nError::NoDefaultTranslations`] when no locale
    /// tree can be chosen and [`crate::I18nError::CyclicPlaceholder`] when
    /// placeholder lookups nest beyond [`Self::max_placeholder_depth`].
    pub fn translate(&self, key: &str, substitutions: &Substitutions) -> Result<String> {
        let resolved = self.resolved_locale()?;
        Interpolator::new(resolved.tree(), substitutions)
            .with_max_depth(self.max_placeholder_depth)
            .lookup(key)
    }

    /// [`Self::translate`] without substitutions.
    ///
    /// # Errors
    ///
    /// As for [`Self::translate`].
    pub fn translate_key(&self, key: &str) -> Result<String> {
        self.translate(key, &Substitutions::new())
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Translator")
            .field("sources", &self.sources)
            .field("state", &self.state)
            .field("store", &self.store)
            .field("max_placeholder_depth", &self.max_placeholder_depth)
            .finish_non_exhaustive()
    }
}
