//! Dotted key path traversal.

use crate::tree::TranslationTree;

/// Find the raw (uninterpolated) value stored under `key`.
///
/// The key is split on its first dot: the head names a child namespace and
/// the rest is looked up inside it. A key without dots names an attribute,
/// whose first value is returned. An empty attribute name never matches,
/// so `"nav."` and the placeholder `{}` always miss.
///
/// ```
/// use treelingo_engine::{TranslationTree, find_value};
///
/// let tree = TranslationTree::new().with_child(
///     "nav",
///     TranslationTree::new().with_child(
///         "home",
///         TranslationTree::new().with_attribute("title", "Welcome"),
///     ),
/// );
///
/// assert_eq!(find_value(&tree, "nav.home.title"), Some("Welcome"));
/// assert_eq!(find_value(&tree, "nav.missing.title"), None);
/// ```
#[must_use]
pub fn find_value<'t>(tree: &'t TranslationTree, key: &str) -> Option<&'t str> {
    match key.split_once('.') {
        None if key.is_empty() => None,
        None => tree.attribute(key).map(|values| values.first()),
        Some((head, rest)) => tree.child(head).and_then(|child| find_value(child, rest)),
    }
}
