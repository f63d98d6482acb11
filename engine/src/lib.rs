//! Translation resolution: locale fallback, nested key lookup and
//! placeholder expansion over per-locale translation trees.
//!
//! A [`Translator`] owns the locale state and the loaded
//! [`TranslationStore`]. Each lookup picks one locale tree (current locale,
//! forced fallback, language subtag, then default), walks the dotted key
//! through it and expands `{name}` placeholders from the caller's
//! [`Substitutions`] or, failing that, from other keys of the same tree.

pub mod catalog;
pub mod error;
pub mod interpolate;
pub mod locale;
pub mod lookup;
pub mod resolver;
pub mod shared;
pub mod source;
pub mod state;
pub mod store;
pub mod translator;
pub mod tree;

pub use catalog::{LocaleCatalog, StaticCatalog, WellFormedCatalog};
pub use error::{I18nError, Result, SourceError};
pub use interpolate::{DEFAULT_MAX_DEPTH, Interpolator, Substitutions};
pub use locale::LocaleId;
pub use lookup::find_value;
pub use resolver::{ResolutionSource, ResolvedLocale, resolve_locale};
pub use shared::SharedTranslator;
pub use source::{SmlSource, SourceRegistry, TomlSource, TranslationDocument, TranslationSource};
pub use state::{LocaleState, ResolutionContext};
pub use store::TranslationStore;
pub use translator::{DEFAULT_LOCALE, Translator};
pub use tree::{AttributeValues, TranslationTree, TreeEntry};
