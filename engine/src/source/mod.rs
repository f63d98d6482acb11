//! Translation document readers.
//!
//! A [`TranslationSource`] turns one file into a [`TranslationDocument`]: an
//! ordered list of top-level named trees. The store only ever sees documents,
//! so new formats plug in by registering another source with a
//! [`SourceRegistry`].

use camino::Utf8Path;

use crate::error::SourceError;
use crate::tree::TranslationTree;

mod sml;
mod toml_tables;

pub use sml::SmlSource;
pub use toml_tables::TomlSource;

/// Parses translation documents of one file format.
#[cfg_attr(test, mockall::automock)]
pub trait TranslationSource {
    /// File extension (without the dot) this source reads.
    fn extension(&self) -> &'static str;

    /// Parse the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the file cannot be read or is
    /// malformed.
    fn parse(&self, path: &Utf8Path) -> Result<TranslationDocument, SourceError>;
}

/// The top-level named nodes of one parsed document, in document order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TranslationDocument {
    nodes: Vec<(String, TranslationTree)>,
}

impl TranslationDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level node.
    pub fn push(&mut self, name: impl Into<String>, tree: TranslationTree) {
        self.nodes.push((name.into(), tree));
    }

    /// Builder-style variant of [`Self::push`].
    #[must_use]
    pub fn with_node(mut self, name: impl Into<String>, tree: TranslationTree) -> Self {
        self.push(name, tree);
        self
    }

    /// Iterate over the top-level nodes.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &TranslationTree)> {
        self.nodes.iter().map(|(name, tree)| (name.as_str(), tree))
    }

    /// Number of top-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no top-level nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl IntoIterator for TranslationDocument {
    type Item = (String, TranslationTree);
    type IntoIter = std::vec::IntoIter<(String, TranslationTree)>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

/// The set of sources consulted when loading a directory.
pub struct SourceRegistry {
    sources: Vec<Box<dyn TranslationSource + Send + Sync>>,
}

impl SourceRegistry {
    /// A registry with no sources.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a source. A later source for an already registered extension
    /// takes precedence.
    pub fn register(&mut self, source: impl TranslationSource + Send + Sync + 'static) {
        self.sources.push(Box::new(source));
    }

    /// Builder-style variant of [`Self::register`].
    #[must_use]
    pub fn with(mut self, source: impl TranslationSource + Send + Sync + 'static) -> Self {
        self.register(source);
        self
    }

    /// The source that reads `path`, chosen by exact extension match.
    #[must_use]
    pub fn for_path(&self, path: &Utf8Path) -> Option<&(dyn TranslationSource + Send + Sync)> {
        let extension = path.extension()?;
        self.sources
            .iter()
            .rev()
            .find(|source| source.extension() == extension)
            .map(|source| &**source)
    }

    /// Registered extensions, in registration order.
    pub fn extensions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sources.iter().map(|source| source.extension())
    }
}

impl Default for SourceRegistry {
    /// Reads `.sml` and `.toml` documents.
    fn default() -> Self {
        Self::empty().with(SmlSource).with(TomlSource)
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SourceRegistry")
            .field("extensions", &self.extensions().collect::<Vec<_>>())
            .finish()
    }
}
