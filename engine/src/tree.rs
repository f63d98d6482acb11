//! In-memory translation trees.
//!
//! A [`TranslationTree`] mirrors one element of a translation document: it
//! carries named attributes (each with one or more string values) and named
//! child trees. Attributes and children live in separate namespaces, so a
//! node may hold an attribute `title` next to a child namespace `title`.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// The ordered, non-empty values stored under an attribute name.
///
/// Lookups only ever read [`AttributeValues::first`]; the remaining values
/// are retained so documents round-trip into the tree without loss.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeValues {
    first: String,
    rest: Vec<String>,
}

impl AttributeValues {
    /// Create a single-valued attribute.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            first: value.into(),
            rest: Vec::new(),
        }
    }

    /// Collect values into an attribute, returning `None` when `values` is
    /// empty.
    ///
    /// ```
    /// use treelingo_engine::AttributeValues;
    ///
    /// let values = AttributeValues::from_values(["Hallo", "Servus"]).expect("non-empty");
    /// assert_eq!(values.first(), "Hallo");
    /// assert_eq!(values.len(), 2);
    /// assert!(AttributeValues::from_values(Vec::<String>::new()).is_none());
    /// ```
    pub fn from_values<I, S>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = values.into_iter().map(Into::into);
        let first = iter.next()?;
        Some(Self {
            first,
            rest: iter.collect(),
        })
    }

    /// The value used by lookups.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Iterate over every stored value in document order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.first.as_str()).chain(self.rest.iter().map(String::as_str))
    }

    /// Number of stored values; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always `false`; provided for API symmetry with collections.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// A borrowed view of one named entry in a [`TranslationTree`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TreeEntry<'a> {
    /// A leaf attribute holding string values.
    Attribute(&'a AttributeValues),
    /// A nested namespace.
    Namespace(&'a TranslationTree),
}

/// A node of named attributes and named child namespaces.
///
/// Each node exclusively owns its children; the tree is read-only once a
/// store has been loaded.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TranslationTree {
    attributes: BTreeMap<String, AttributeValues>,
    children: BTreeMap<String, TranslationTree>,
}

impl TranslationTree {
    /// Create an empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper adding a single-valued attribute.
    ///
    /// ```
    /// use treelingo_engine::TranslationTree;
    ///
    /// let tree = TranslationTree::new()
    ///     .with_attribute("greeting", "Hallo {name}")
    ///     .with_child("nav", TranslationTree::new().with_attribute("home", "Start"));
    ///
    /// assert_eq!(tree.attribute("greeting").map(|v| v.first()), Some("Hallo {name}"));
    /// assert!(tree.child("nav").is_some());
    /// ```
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_attribute(name, AttributeValues::new(value));
        self
    }

    /// Builder-style helper adding a child namespace.
    #[must_use]
    pub fn with_child(mut self, name: impl Into<String>, child: Self) -> Self {
        self.insert_child(name, child);
        self
    }

    /// Insert or replace an attribute, returning the previous values.
    pub fn insert_attribute(
        &mut self,
        name: impl Into<String>,
        values: AttributeValues,
    ) -> Option<AttributeValues> {
        self.attributes.insert(name.into(), values)
    }

    /// Insert an attribute unless one with the same name exists.
    ///
    /// Returns `true` when the attribute was stored.
    pub fn insert_attribute_if_absent(&mut self, name: String, values: AttributeValues) -> bool {
        insert_vacant(self.attributes.entry(name), values)
    }

    /// Insert or replace a child namespace, returning the previous child.
    pub fn insert_child(&mut self, name: impl Into<String>, child: Self) -> Option<Self> {
        self.children.insert(name.into(), child)
    }

    /// Insert a child namespace unless one with the same name exists.
    ///
    /// Returns `true` when the child was stored.
    pub fn insert_child_if_absent(&mut self, name: String, child: Self) -> bool {
        insert_vacant(self.children.entry(name), child)
    }

    /// Fetch an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValues> {
        self.attributes.get(name)
    }

    /// Fetch a child namespace by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.get(name)
    }

    /// Whether an attribute named `name` exists.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Whether a child namespace named `name` exists.
    #[must_use]
    pub fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Whether the node has neither attributes nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }

    /// Iterate over attributes, then children, each sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, TreeEntry<'_>)> {
        let attributes = self
            .attributes
            .iter()
            .map(|(name, values)| (name.as_str(), TreeEntry::Attribute(values)));
        let children = self
            .children
            .iter()
            .map(|(name, child)| (name.as_str(), TreeEntry::Namespace(child)));
        attributes.chain(children)
    }

    /// Every attribute's dotted key path, sorted.
    ///
    /// ```
    /// use treelingo_engine::TranslationTree;
    ///
    /// let tree = TranslationTree::new()
    ///     .with_attribute("title", "Start")
    ///     .with_child("nav", TranslationTree::new().with_attribute("home", "Home"));
    ///
    /// assert_eq!(tree.key_paths(), vec!["nav.home", "title"]);
    /// ```
    #[must_use]
    pub fn key_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_paths("", &mut paths);
        paths.sort_unstable();
        paths
    }

    fn collect_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        for (name, entry) in self.entries() {
            let path = if prefix.is_empty() {
                name.to_owned()
            } else {
                format!("{prefix}.{name}")
            };
            match entry {
                TreeEntry::Attribute(_) => paths.push(path),
                TreeEntry::Namespace(child) => child.collect_paths(&path, paths),
            }
        }
    }
}

fn insert_vacant<V>(entry: Entry<'_, String, V>, value: V) -> bool {
    match entry {
        Entry::Vacant(slot) => {
            slot.insert(value);
            true
        }
        Entry::Occupied(_) => false,
    }
}
