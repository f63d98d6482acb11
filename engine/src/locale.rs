//! Validated locale identifiers.

use std::fmt;

use crate::catalog::LocaleCatalog;
use crate::error::{I18nError, Result};

/// A locale identifier that has passed [`LocaleCatalog`] validation.
///
/// The only constructor is [`LocaleId::parse`], so every `LocaleId` held by
/// the engine is known to its catalog.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LocaleId(String);

impl LocaleId {
    /// Validate `raw` against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::InvalidLocale`] when the catalog does not know
    /// the identifier.
    ///
    /// ```
    /// use treelingo_engine::{LocaleId, StaticCatalog};
    ///
    /// let catalog = StaticCatalog::from_locales(["en_US"]);
    /// let locale = LocaleId::parse("en_US", &catalog).expect("known locale");
    /// assert_eq!(locale.language_subtag(), Some("en"));
    /// assert!(LocaleId::parse("fr", &catalog).is_err());
    /// ```
    pub fn parse(raw: &str, catalog: &dyn LocaleCatalog) -> Result<Self> {
        if catalog.is_known_locale(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(I18nError::InvalidLocale {
                locale: raw.to_owned(),
            })
        }
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The text before the first underscore, when the identifier has one.
    ///
    /// Only a single level of stripping is offered: `zh_Hant_TW` yields
    /// `zh`, never `zh_Hant`.
    #[must_use]
    pub fn language_subtag(&self) -> Option<&str> {
        self.0.split_once('_').map(|(language, _)| language)
    }
}

impl AsRef<str> for LocaleId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
