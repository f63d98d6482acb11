//! Reader for TOML translation documents.
//!
//! Each top-level table is a locale; nested tables are namespaces and
//! string (or string array) values are attributes:
//!
//! ```toml
//! [de]
//! greeting = "Hallo {name}"
//!
//! [de.nav.home]
//! title = "Willkommen"
//! ```

use std::fs;

use camino::Utf8Path;
use toml::{Table, Value};

use super::{TranslationDocument, TranslationSource};
use crate::error::SourceError;
use crate::tree::{AttributeValues, TranslationTree};

/// Reads `.toml` documents.
///
/// Integers, floats, booleans and datetimes are stored as their TOML text.
/// Non-table entries at the top level are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct TomlSource;

impl TranslationSource for TomlSource {
    fn extension(&self) -> &'static str {
        "toml"
    }

    fn parse(&self, path: &Utf8Path) -> Result<TranslationDocument, SourceError> {
        let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_owned(),
            source,
        })?;
        parse_document(path, &text)
    }
}

pub(crate) fn parse_document(
    path: &Utf8Path,
    text: &str,
) -> Result<TranslationDocument, SourceError> {
    let table = toml::from_str::<Table>(text).map_err(|error| SourceError::Parse {
        path: path.to_owned(),
        line: error
            .span()
            .map_or(1, |span| line_of(text, span.start)),
        reason: error.message().to_owned(),
    })?;

    let mut document = TranslationDocument::new();
    for (name, value) in table {
        if let Value::Table(inner) = value {
            let tree = tree_from_table(path, &name, inner)?;
            document.push(name, tree);
        }
    }
    Ok(document)
}

fn tree_from_table(
    path: &Utf8Path,
    prefix: &str,
    table: Table,
) -> Result<TranslationTree, SourceError> {
    let mut tree = TranslationTree::new();
    for (key, value) in table {
        let full_key = format!("{prefix}.{key}");
        if key.is_empty() {
            return Err(SourceError::UnsupportedValue {
                path: path.to_owned(),
                key: full_key,
            });
        }
        match value {
            Value::Table(inner) => {
                let child = tree_from_table(path, &full_key, inner)?;
                tree.insert_child(key, child);
            }
            Value::Array(items) => {
                let values = items
                    .into_iter()
                    .map(scalar_text)
                    .collect::<Option<Vec<_>>>()
                    .and_then(AttributeValues::from_values)
                    .ok_or_else(|| SourceError::UnsupportedValue {
                        path: path.to_owned(),
                        key: full_key,
                    })?;
                tree.insert_attribute(key, values);
            }
            scalar => {
                let text = scalar_text(scalar).ok_or_else(|| SourceError::UnsupportedValue {
                    path: path.to_owned(),
                    key: full_key,
                })?;
                tree.insert_attribute(key, AttributeValues::new(text));
            }
        }
    }
    Ok(tree)
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Integer(number) => Some(number.to_string()),
        Value::Float(number) => Some(number.to_string()),
        Value::Boolean(flag) => Some(flag.to_string()),
        Value::Datetime(datetime) => Some(datetime.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}

fn line_of(text: &str, offset: usize) -> usize {
    text.char_indices()
        .take_while(|(index, _)| *index < offset)
        .filter(|(_, character)| *character == '\n')
        .count()
        + 1
}
