//! Placeholder expansion.
//!
//! A translation value may contain `{name}` placeholders. Each one is taken
//! from the caller's [`Substitutions`] when present; otherwise `name` is
//! looked up as a key in the same locale tree and the result, itself
//! expanded with the same substitutions, takes its place. Unresolvable
//! placeholders become empty strings.

use std::borrow::Cow;
use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{I18nError, Result};
use crate::lookup::find_value;
use crate::tree::TranslationTree;

/// Default limit on nested placeholder lookups.
pub const DEFAULT_MAX_DEPTH: usize = 50;

#[expect(clippy::expect_used, reason = "the placeholder pattern is a valid literal")]
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(.*?)\}").expect("placeholder pattern should compile"));

/// Literal placeholder values supplied with a lookup.
///
/// ```
/// use treelingo_engine::Substitutions;
///
/// let substitutions = Substitutions::new().with("name", "Ada");
/// assert_eq!(substitutions.get("name"), Some("Ada"));
///
/// let collected: Substitutions = [("count", "3")].into_iter().collect();
/// assert_eq!(collected.len(), 1);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Substitutions {
    values: HashMap<String, String>,
}

impl Substitutions {
    /// An empty substitution map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `name`, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    /// Builder-style variant of [`Self::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// The value supplied for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of supplied values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Substitutions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for Substitutions
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.values.extend(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into())),
        );
    }
}

/// Resolves keys in one locale tree and expands their placeholders.
///
/// Every nested lookup triggered by a placeholder counts one level of
/// depth. Exceeding `max_depth` fails with
/// [`I18nError::CyclicPlaceholder`], so a value that refers to itself,
/// directly or through a chain, errors instead of recursing forever.
#[derive(Clone, Copy, Debug)]
pub struct Interpolator<'t, 's> {
    tree: &'t TranslationTree,
    substitutions: &'s Substitutions,
    max_depth: usize,
}

impl<'t, 's> Interpolator<'t, 's> {
    /// Create an interpolator over `tree` using [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub const fn new(tree: &'t TranslationTree, substitutions: &'s Substitutions) -> Self {
        Self {
            tree,
            substitutions,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the nesting limit. Zero disables lookups from placeholders
    /// altogether; only supplied substitutions are applied.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Look up `key` and expand its placeholders. A missing key yields an
    /// empty string.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::CyclicPlaceholder`] when placeholder lookups
    /// nest deeper than the configured limit.
    ///
    /// ```
    /// use treelingo_engine::{Interpolator, Substitutions, TranslationTree};
    ///
    /// let tree = TranslationTree::new()
    ///     .with_attribute("greeting", "Hi {name}")
    ///     .with_attribute("name", "World");
    /// let none = Substitutions::new();
    ///
    /// let interpolator = Interpolator::new(&tree, &none);
    /// assert_eq!(interpolator.lookup("greeting").expect("no cycle"), "Hi World");
    /// assert_eq!(interpolator.lookup("missing").expect("no cycle"), "");
    /// ```
    pub fn lookup(&self, key: &str) -> Result<String> {
        self.lookup_at(key, 0)
    }

    /// Expand the placeholders in `value`.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::CyclicPlaceholder`] when placeholder lookups
    /// nest deeper than the configured limit.
    pub fn expand(&self, value: &str) -> Result<String> {
        self.expand_at(value, 0)
    }

    fn lookup_at(&self, key: &str, depth: usize) -> Result<String> {
        find_value(self.tree, key)
            .map_or_else(|| Ok(String::new()), |raw| self.expand_at(raw, depth))
    }

    // Placeholders are collected from `value` as written, but each
    // replacement applies to every occurrence in the partially expanded
    // string, including text introduced by earlier replacements.
    fn expand_at(&self, value: &str, depth: usize) -> Result<String> {
        let mut resolved = value.to_owned();
        for captures in PLACEHOLDER.captures_iter(value) {
            let (token, [name]) = captures.extract();
            let replacement = match self.substitutions.get(name) {
                Some(supplied) => Cow::Borrowed(supplied),
                None => Cow::Owned(self.nested_lookup(name, depth + 1)?),
            };
            resolved = resolved.replace(token, &replacement);
        }
        Ok(resolved)
    }

    fn nested_lookup(&self, name: &str, depth: usize) -> Result<String> {
        if depth > self.max_depth {
            return Err(I18nError::CyclicPlaceholder {
                placeholder: name.to_owned(),
                depth: self.max_depth,
            });
        }
        let value = self.lookup_at(name, depth)?;
        if value.is_empty() {
            debug!(
                target: "treelingo::interpolate",
                "placeholder `{{{name}}}` resolved to an empty string",
            );
        }
        Ok(value)
    }
}
