//! Per-locale translation trees.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

use crate::error::SourceError;
use crate::source::{SourceRegistry, TranslationDocument};
use crate::tree::TranslationTree;

/// Maps top-level document names (by convention, locale identifiers) to
/// their translation trees.
///
/// Names are stored as found; whether they are valid locales is only
/// relevant once a lookup asks for them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TranslationStore {
    trees: BTreeMap<String, TranslationTree>,
}

impl TranslationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `tree` under `name`, returning any tree it replaced.
    pub fn insert(&mut self, name: impl Into<String>, tree: TranslationTree) -> Option<TranslationTree> {
        self.trees.insert(name.into(), tree)
    }

    /// The tree stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TranslationTree> {
        self.trees.get(name)
    }

    /// The stored name and tree for `name`.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<(&str, &TranslationTree)> {
        self.trees
            .get_key_value(name)
            .map(|(stored, tree)| (stored.as_str(), tree))
    }

    /// Whether a tree is stored under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.trees.contains_key(name)
    }

    /// Stored names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    /// Number of stored trees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Store every top-level node of `document`; later nodes replace
    /// earlier ones with the same name. Returns the number of nodes stored.
    pub fn merge_document(&mut self, document: TranslationDocument) -> usize {
        let mut stored = 0;
        for (name, tree) in document {
            if self.trees.insert(name.clone(), tree).is_some() {
                debug!(target: "treelingo::store", "replaced translations for `{name}`");
            }
            stored += 1;
        }
        stored
    }

    /// Load every recognised document in `directory`.
    ///
    /// Files are parsed in file-name order, so when two documents define the
    /// same top-level name the one whose file name sorts last wins. Entries
    /// whose extension no registered source reads are skipped, as are
    /// directories. Returns the number of top-level nodes stored.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] when the directory cannot be listed and
    /// propagates any error from the sources.
    pub fn load_directory(
        &mut self,
        directory: &Utf8Path,
        sources: &SourceRegistry,
    ) -> Result<usize, SourceError> {
        let mut files = recognised_files(directory, sources)?;
        files.sort();

        let mut stored = 0;
        for file in files {
            let Some(source) = sources.for_path(&file) else {
                continue;
            };
            let document = source.parse(&file)?;
            debug!(
                target: "treelingo::store",
                "loaded {} translation node(s) from {file}",
                document.len(),
            );
            stored += self.merge_document(document);
        }
        Ok(stored)
    }
}

fn recognised_files(
    directory: &Utf8Path,
    sources: &SourceRegistry,
) -> Result<Vec<Utf8PathBuf>, SourceError> {
    let io_error = |source| SourceError::Io {
        path: directory.to_owned(),
        source,
    };

    let mut files = Vec::new();
    for entry in directory.read_dir_utf8().map_err(io_error)? {
        let path = entry.map_err(io_error)?.into_path();
        if path.is_file() && sources.for_path(&path).is_some() {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MockTranslationSource, TranslationSource};
    use crate::tree::AttributeValues;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    struct Workspace {
        _temp: TempDir,
        root: Utf8PathBuf,
    }

    impl Workspace {
        fn write(&self, name: &str, contents: &str) {
            fs::write(self.root.join(name), contents)
                .unwrap_or_else(|error| panic!("failed to write {name}: {error}"));
        }
    }

    #[fixture]
    fn workspace() -> Workspace {
        let temp = tempfile::tempdir().unwrap_or_else(|error| panic!("temp dir: {error}"));
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .unwrap_or_else(|path| panic!("non UTF-8 temp path: {}", path.display()));
        Workspace { _temp: temp, root }
    }

    fn greeting(store: &TranslationStore, locale: &str) -> Option<String> {
        store
            .get(locale)
            .and_then(|tree| tree.attribute("greeting"))
            .map(|values| values.first().to_owned())
    }

    #[rstest]
    fn later_file_names_override_earlier_ones(workspace: Workspace) {
        workspace.write("b.sml", "Root\n  de\n    greeting Zweite\n  End\nEnd\n");
        workspace.write("a.sml", "Root\n  de\n    greeting Erste\n  End\n  en\n    greeting Hello\n  End\nEnd\n");
        let mut store = TranslationStore::new();

        let stored = store
            .load_directory(&workspace.root, &SourceRegistry::default())
            .unwrap_or_else(|error| panic!("load should succeed: {error}"));

        assert_eq!(stored, 3);
        assert_eq!(store.names().collect::<Vec<_>>(), ["de", "en"]);
        assert_eq!(greeting(&store, "de").as_deref(), Some("Zweite"));
        assert_eq!(greeting(&store, "en").as_deref(), Some("Hello"));
    }

    #[rstest]
    fn mixes_formats_and_skips_unrecognised_entries(workspace: Workspace) {
        workspace.write("de.toml", "[de]\ngreeting = \"Hallo\"\n");
        workspace.write("notes.txt", "not a translation document");
        fs::create_dir(workspace.root.join("nested.sml"))
            .unwrap_or_else(|error| panic!("mkdir: {error}"));
        let mut store = TranslationStore::new();

        store
            .load_directory(&workspace.root, &SourceRegistry::default())
            .unwrap_or_else(|error| panic!("load should succeed: {error}"));

        assert_eq!(store.len(), 1);
        assert_eq!(greeting(&store, "de").as_deref(), Some("Hallo"));
    }

    #[rstest]
    fn missing_directory_is_an_io_error(workspace: Workspace) {
        let mut store = TranslationStore::new();

        let outcome = store.load_directory(&workspace.root.join("absent"), &SourceRegistry::default());

        assert!(matches!(outcome, Err(SourceError::Io { .. })));
        assert!(store.is_empty());
    }

    #[rstest]
    fn parse_failures_propagate(workspace: Workspace) {
        workspace.write("de.sml", "Root\n  de\n    greeting \"open\nEnd\n");
        let mut store = TranslationStore::new();

        let outcome = store.load_directory(&workspace.root, &SourceRegistry::default());

        assert!(matches!(outcome, Err(SourceError::Parse { line: 3, .. })));
    }

    #[rstest]
    fn custom_sources_are_consulted_in_file_name_order(workspace: Workspace) {
        workspace.write("2.custom", "");
        workspace.write("1.custom", "");
        let mut source = MockTranslationSource::new();
        source.expect_extension().return_const("custom");
        let mut sequence = mockall::Sequence::new();
        for (file, value) in [("1.custom", "eins"), ("2.custom", "zwei")] {
            source
                .expect_parse()
                .withf(move |path| path.file_name() == Some(file))
                .times(1)
                .in_sequence(&mut sequence)
                .returning(move |_| {
                    Ok(TranslationDocument::new().with_node(
                        "de",
                        TranslationTree::new().with_attribute("greeting", value),
                    ))
                });
        }
        let sources = SourceRegistry::empty().with(source);
        let mut store = TranslationStore::new();

        store
            .load_directory(&workspace.root, &sources)
            .unwrap_or_else(|error| panic!("load should succeed: {error}"));

        assert_eq!(greeting(&store, "de").as_deref(), Some("zwei"));
    }

    #[rstest]
    fn merge_document_replaces_same_named_nodes() {
        let mut store = TranslationStore::new();
        let document = TranslationDocument::new()
            .with_node("de", TranslationTree::new().with_attribute("greeting", "Erste"))
            .with_node("de", TranslationTree::new().with_attribute("greeting", "Zweite"));

        assert_eq!(store.merge_document(document), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.entry("de").and_then(|(_, tree)| tree.attribute("greeting")),
            Some(&AttributeValues::new("Zweite"))
        );
    }

    #[rstest]
    fn mock_sources_report_their_extension() {
        let mut source = MockTranslationSource::new();
        source.expect_extension().return_const("custom");

        assert_eq!(source.extension(), "custom");
    }
}
