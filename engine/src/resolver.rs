//! Choosing the locale tree a lookup searches.

use std::fmt;

use log::debug;

use crate::error::{I18nError, Result};
use crate::state::ResolutionContext;
use crate::store::TranslationStore;
use crate::tree::TranslationTree;

/// Why a locale was chosen for a lookup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionSource {
    /// The current locale has translations.
    Current,
    /// The forced fallback locale has translations.
    ForcedFallback,
    /// The current locale's language subtag (`en` for `en_US`) has
    /// translations.
    LanguageSubtag,
    /// Nothing else matched; the default locale's translations are used.
    Default,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => formatter.write_str("current locale"),
            Self::ForcedFallback => formatter.write_str("forced fallback locale"),
            Self::LanguageSubtag => formatter.write_str("language subtag"),
            Self::Default => formatter.write_str("default locale"),
        }
    }
}

/// The locale tree chosen for a lookup and its provenance.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedLocale<'s> {
    locale: &'s str,
    source: ResolutionSource,
    tree: &'s TranslationTree,
}

impl<'s> ResolvedLocale<'s> {
    /// Name of the chosen tree.
    #[must_use]
    pub const fn locale(&self) -> &'s str {
        self.locale
    }

    /// Which rule picked the tree.
    #[must_use]
    pub const fn source(&self) -> ResolutionSource {
        self.source
    }

    /// The chosen tree.
    #[must_use]
    pub const fn tree(&self) -> &'s TranslationTree {
        self.tree
    }
}

/// Pick the tree to search, trying in order: the current locale, the
/// forced fallback, the current locale's language subtag, then the default
/// locale.
///
/// # Errors
///
/// Returns [`I18nError::NoDefaultTranslations`] when none of the candidates,
/// including the default locale, has translations in `store`.
pub fn resolve_locale<'s>(
    context: &ResolutionContext<'_>,
    store: &'s TranslationStore,
) -> Result<ResolvedLocale<'s>> {
    let candidates = [
        Some((context.current.as_str(), ResolutionSource::Current)),
        context
            .forced_fallback
            .map(|locale| (locale.as_str(), ResolutionSource::ForcedFallback)),
        context
            .current
            .language_subtag()
            .map(|language| (language, ResolutionSource::LanguageSubtag)),
        Some((context.default.as_str(), ResolutionSource::Default)),
    ];

    let resolved = candidates
        .into_iter()
        .flatten()
        .find_map(|(name, source)| {
            store
                .entry(name)
                .map(|(locale, tree)| ResolvedLocale { locale, source, tree })
        })
        .ok_or_else(|| I18nError::NoDefaultTranslations {
            locale: context.default.to_string(),
        })?;

    debug!(
        target: "treelingo::resolver",
        "resolved `{}` to `{}` via {}",
        context.current,
        resolved.locale,
        resolved.source,
    );
    Ok(resolved)
}
