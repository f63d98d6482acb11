//! A [`Translator`] that can be shared between threads.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use camino::Utf8Path;

use crate::error::Result;
use crate::interpolate::Substitutions;
use crate::locale::LocaleId;
use crate::translator::Translator;

/// Guards a [`Translator`] with a read-write lock.
///
/// Lookups take the read lock, so they never observe a locale change or a
/// load half way through. Locale setters and loads take the write lock.
/// A poisoned lock is recovered rather than propagated.
#[derive(Debug)]
pub struct SharedTranslator {
    inner: RwLock<Translator>,
}

impl SharedTranslator {
    /// Wrap `translator`.
    #[must_use]
    pub const fn new(translator: Translator) -> Self {
        Self {
            inner: RwLock::new(translator),
        }
    }

    /// Translate `key` under the read lock.
    ///
    /// # Errors
    ///
    /// As for [`Translator::translate`].
    pub fn translate(&self, key: &str, substitutions: &Substitutions) -> Result<String> {
        self.read().translate(key, substitutions)
    }

    /// Replace the current locale under the write lock.
    ///
    /// # Errors
    ///
    /// As for [`Translator::set_current_locale`].
    pub fn set_current_locale(&self, locale: &str) -> Result<()> {
        self.write().set_current_locale(locale)
    }

    /// Replace the default locale under the write lock.
    ///
    /// # Errors
    ///
    /// As for [`Translator::set_default_locale`].
    pub fn set_default_locale(&self, locale: &str) -> Result<()> {
        self.write().set_default_locale(locale)
    }

    /// Set the forced fallback locale under the write lock.
    pub fn set_forced_fallback_locale(&self, locale: &str) {
        self.write().set_forced_fallback_locale(locale);
    }

    /// Load translations under the write lock.
    ///
    /// # Errors
    ///
    /// As for [`Translator::load_translations`].
    pub fn load_translations(&self, directory: &Utf8Path) -> Result<usize> {
        self.write().load_translations(directory)
    }

    /// A copy of the current locale.
    #[must_use]
    pub fn current_locale(&self) -> LocaleId {
        self.read().current_locale().clone()
    }

    /// Run `inspect` with shared access to the translator.
    pub fn with_translator<R>(&self, inspect: impl FnOnce(&Translator) -> R) -> R {
        inspect(&self.read())
    }

    /// Run `update` with exclusive access to the translator.
    pub fn with_translator_mut<R>(&self, update: impl FnOnce(&mut Translator) -> R) -> R {
        update(&mut self.write())
    }

    /// Unwrap the translator.
    #[must_use]
    pub fn into_inner(self) -> Translator {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, Translator> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Translator> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Translator> for SharedTranslator {
    fn from(translator: Translator) -> Self {
        Self::new(translator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::tree::TranslationTree;
    use rstest::{fixture, rstest};
    use std::thread;

    #[fixture]
    fn shared() -> SharedTranslator {
        let catalog = StaticCatalog::from_locales(["de", "en", "en_GB"]);
        let mut translator = Translator::with_catalog(catalog)
            .unwrap_or_else(|error| panic!("translator should build: {error}"));
        translator.insert_translations("de", TranslationTree::new().with_attribute("yes", "Ja"));
        translator.insert_translations("en", TranslationTree::new().with_attribute("yes", "Yes"));
        SharedTranslator::from(translator)
    }

    #[rstest]
    fn concurrent_lookups_see_whole_locale_switches(shared: SharedTranslator) {
        thread::scope(|scope| {
            scope.spawn(|| {
                for round in 0..100 {
                    let locale = if round % 2 == 0 { "en_GB" } else { "de" };
                    shared
                        .set_current_locale(locale)
                        .unwrap_or_else(|error| panic!("`{locale}` should be valid: {error}"));
                }
            });
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        let value = shared
                            .translate("yes", &Substitutions::new())
                            .unwrap_or_else(|error| panic!("lookup should succeed: {error}"));
                        assert!(value == "Ja" || value == "Yes", "unexpected value {value}");
                    }
                });
            }
        });

        assert_eq!(shared.current_locale().as_str(), "de");
    }

    #[rstest]
    fn mutations_are_visible_to_later_reads(shared: SharedTranslator) {
        shared.set_forced_fallback_locale("en");
        shared
            .set_default_locale("en")
            .unwrap_or_else(|error| panic!("en should be valid: {error}"));

        shared.with_translator(|translator| {
            assert_eq!(translator.default_locale().as_str(), "en");
            assert_eq!(
                translator.forced_fallback_locale().map(LocaleId::as_str),
                Some("en")
            );
        });
        shared.with_translator_mut(|translator| translator.set_max_placeholder_depth(7));

        assert_eq!(shared.into_inner().max_placeholder_depth(), 7);
    }

    #[rstest]
    fn translator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedTranslator>();
    }
}
