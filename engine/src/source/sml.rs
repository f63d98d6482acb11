//! Reader for Simple Markup Language (SML) translation documents.
//!
//! ```text
//! Translations
//!   de
//!     greeting "Hallo {name}"
//!     nav
//!       home Startseite
//!     End
//!   End
//! End
//! ```
//!
//! Every line is a list of whitespace separated values. `#` starts a comment,
//! `"..."` quotes a value (`""` escapes a quote, `"/"` encodes a line feed),
//! and a lone `-` is a null value. One value opens an element unless it
//! matches the end keyword, which is whatever the last non-empty line says
//! (compared case-insensitively). Two or more values form an attribute.

use std::fs;
use std::iter::Peekable;
use std::str::Chars;

use camino::Utf8Path;

use super::{TranslationDocument, TranslationSource};
use crate::error::SourceError;
use crate::tree::{AttributeValues, TranslationTree};

/// Reads `.sml` documents.
///
/// The root element's child elements become the document's top-level
/// nodes; attributes directly on the root are ignored. Within an element the
/// first attribute or child with a given name wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmlSource;

impl TranslationSource for SmlSource {
    fn extension(&self) -> &'static str {
        "sml"
    }

    fn parse(&self, path: &Utf8Path) -> Result<TranslationDocument, SourceError> {
        let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_owned(),
            source,
        })?;
        parse_document(&text).map_err(|error| SourceError::Parse {
            path: path.to_owned(),
            line: error.line,
            reason: error.reason.to_owned(),
        })
    }
}

#[derive(Debug, Eq, PartialEq)]
pub(crate) struct SyntaxError {
    line: usize,
    reason: &'static str,
}

impl SyntaxError {
    const fn new(line: usize, reason: &'static str) -> Self {
        Self { line, reason }
    }
}

type Value = Option<String>;

struct Line {
    number: usize,
    values: Vec<Value>,
}

enum LineKind {
    End,
    Element(String),
    Attribute(String, AttributeValues),
}

pub(crate) fn parse_document(text: &str) -> Result<TranslationDocument, SyntaxError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let values = split_values(raw, number)?;
        if !values.is_empty() {
            lines.push(Line { number, values });
        }
    }

    let end_keyword = end_keyword(&lines)?;
    let mut lines = lines.into_iter();
    let root = lines
        .next()
        .ok_or_else(|| SyntaxError::new(1, "document has no root element"))?;
    let root_line = root.number;
    match classify(root, end_keyword.as_deref())? {
        LineKind::Element(_) => {}
        LineKind::End | LineKind::Attribute(..) => {
            return Err(SyntaxError::new(root_line, "invalid root element start"));
        }
    }

    let mut document = TranslationDocument::new();
    loop {
        let line = lines
            .next()
            .ok_or_else(|| SyntaxError::new(root_line, "root element is not closed"))?;
        let number = line.number;
        match classify(line, end_keyword.as_deref())? {
            LineKind::End => break,
            LineKind::Element(name) => {
                let tree = read_element(&mut lines, end_keyword.as_deref(), number)?;
                document.push(name, tree);
            }
            LineKind::Attribute(..) => {}
        }
    }

    match lines.next() {
        Some(extra) => Err(SyntaxError::new(
            extra.number,
            "only comments and whitespace may follow the root element",
        )),
        None => Ok(document),
    }
}

fn read_element(
    lines: &mut impl Iterator<Item = Line>,
    end_keyword: Option<&str>,
    opened_at: usize,
) -> Result<TranslationTree, SyntaxError> {
    let mut tree = TranslationTree::new();
    loop {
        let line = lines
            .next()
            .ok_or_else(|| SyntaxError::new(opened_at, "element is not closed"))?;
        let number = line.number;
        match classify(line, end_keyword)? {
            LineKind::End => return Ok(tree),
            LineKind::Element(name) => {
                let child = read_element(lines, end_keyword, number)?;
                tree.insert_child_if_absent(name, child);
            }
            LineKind::Attribute(name, values) => {
                tree.insert_attribute_if_absent(name, values);
            }
        }
    }
}

fn end_keyword(lines: &[Line]) -> Result<Value, SyntaxError> {
    let last = lines
        .last()
        .ok_or_else(|| SyntaxError::new(1, "document has no root element"))?;
    match last.values.as_slice() {
        [keyword] => Ok(keyword.clone()),
        _ => Err(SyntaxError::new(last.number, "invalid end line")),
    }
}

fn classify(line: Line, end_keyword: Option<&str>) -> Result<LineKind, SyntaxError> {
    let mut values = line.values.into_iter();
    let name = values.next().flatten();
    let rest: Vec<Value> = values.collect();

    if rest.is_empty() {
        return match (name, end_keyword) {
            (None, None) => Ok(LineKind::End),
            (None, Some(_)) => Err(SyntaxError::new(line.number, "null value as element name")),
            (Some(name), Some(keyword)) if same_name(&name, keyword) => Ok(LineKind::End),
            (Some(name), _) if name.is_empty() => {
                Err(SyntaxError::new(line.number, "empty element name"))
            }
            (Some(name), _) => Ok(LineKind::Element(name)),
        };
    }

    let name = name.ok_or_else(|| SyntaxError::new(line.number, "null value as attribute name"))?;
    if name.is_empty() {
        return Err(SyntaxError::new(line.number, "empty attribute name"));
    }
    let values = AttributeValues::from_values(rest.into_iter().map(Option::unwrap_or_default))
        .ok_or_else(|| SyntaxError::new(line.number, "attribute has no values"))?;
    Ok(LineKind::Attribute(name, values))
}

fn same_name(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

fn split_values(line: &str, number: usize) -> Result<Vec<Value>, SyntaxError> {
    let mut values = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        while chars.next_if(|character| character.is_whitespace()).is_some() {}
        match chars.peek() {
            None | Some('#') => return Ok(values),
            Some('"') => {
                chars.next();
                values.push(Some(read_string(&mut chars, number)?));
                if chars
                    .peek()
                    .is_some_and(|next| !next.is_whitespace() && *next != '#')
                {
                    return Err(SyntaxError::new(number, "invalid character after string"));
                }
            }
            Some(_) => {
                let mut raw = String::new();
                while let Some(character) = chars
                    .next_if(|next| !next.is_whitespace() && !matches!(*next, '#' | '"'))
                {
                    raw.push(character);
                }
                if chars.peek() == Some(&'"') {
                    return Err(SyntaxError::new(number, "invalid double quote in value"));
                }
                values.push(if raw == "-" { None } else { Some(raw) });
            }
        }
    }
}

fn read_string(chars: &mut Peekable<Chars<'_>>, number: usize) -> Result<String, SyntaxError> {
    let mut value = String::new();
    loop {
        match chars.next() {
            None => return Err(SyntaxError::new(number, "string is not closed")),
            Some('"') => match chars.peek() {
                Some('"') => {
                    chars.next();
                    value.push('"');
                }
                Some('/') => {
                    chars.next();
                    if chars.next() != Some('"') {
                        return Err(SyntaxError::new(number, "invalid string line break"));
                    }
                    value.push('\n');
                }
                _ => return Ok(value),
            },
            Some(character) => value.push(character),
        }
    }
}
