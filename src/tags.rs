//! Tag table and delimiter classification
//!
//! A delimiter occurrence becomes a [`Tag`] once its surroundings are known:
//! - Opening: followed by a non-space character and not preceded by one
//! - Closing: preceded by a non-space character, or with nothing useful after it
//! - Fake: glued on both sides (`c_12_3`), always written back literally
//!
//! Only the space character `' '` counts as a boundary. A delimiter right after a tab or a
//! line break is glued to it.
//!
//! The table also carries nesting rules, e.g. `strong` may not open inside `em`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::Config;
use crate::error::EngineError;

/// Delimiters recognised out of the box
pub const DEFAULT_TAGS: &[(&str, &str)] = &[("_", "em"), ("__", "strong"), ("~~", "strike")];

/// Forbids tag `tag` from taking part in markup while `forbidden_inside` is open.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NestingRule {
    pub tag: String,
    pub forbidden_inside: String,
}

impl NestingRule {
    pub fn new(tag: impl Into<String>, forbidden_inside: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            forbidden_inside: forbidden_inside.into(),
        }
    }
}

/// Markup characters allowed in delimiters. Backslash is reserved for escaping.
fn is_markup_char(ch: char) -> bool {
    ch.is_ascii_punctuation() && ch != '\\'
}

/// Mapping from delimiter string to tag name, plus nesting rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTable {
    tags: BTreeMap<String, String>,
    nesting: Vec<NestingRule>,
}

impl Default for TagTable {
    fn default() -> Self {
        let Config { tags, nesting } = Config::default();
        Self { tags, nesting }
    }
}

impl TagTable {
    /// Build a table without nesting rules.
    ///
    /// Fails if a delimiter is empty or contains non-markup characters, if a tag name is
    /// empty, or if two delimiters share a tag name.
    pub fn new<I, D, N>(tags: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (D, N)>,
        D: Into<String>,
        N: Into<String>,
    {
        let mut table = BTreeMap::new();

        for (delimiter, name) in tags {
            let delimiter = delimiter.into();
            let name = name.into();

            if delimiter.is_empty() {
                return Err(EngineError::InvalidArgument(
                    "delimiter must not be empty".to_string(),
                ));
            }
            if let Some(ch) = delimiter.chars().find(|&ch| !is_markup_char(ch)) {
                return Err(EngineError::InvalidArgument(format!(
                    "delimiter {:?} contains non-markup character {:?}",
                    delimiter, ch
                )));
            }
            if name.trim().is_empty() {
                return Err(EngineError::InvalidArgument(format!(
                    "delimiter {:?} has an empty tag name",
                    delimiter
                )));
            }
            if let Some((other, _)) = table
                .iter()
                .find(|(other, existing)| **existing == name && **other != delimiter)
            {
                return Err(EngineError::InvalidArgument(format!(
                    "tag {:?} is mapped from both {:?} and {:?}",
                    name, other, delimiter
                )));
            }

            table.insert(delimiter, name);
        }

        Ok(Self {
            tags: table,
            nesting: Vec::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let table = Self::new(config.tags.iter().map(|(d, n)| (d.as_str(), n.as_str())))?;
        Ok(config
            .nesting
            .iter()
            .cloned()
            .fold(table, |table, rule| table.with_nesting_rule(rule)))
    }

    pub fn with_nesting_rule(mut self, rule: NestingRule) -> Self {
        if !self.tags.values().any(|name| *name == rule.tag) {
            log::warn!("Nesting rule refers to unknown tag {:?}", rule.tag);
        }
        self.nesting.push(rule);
        self
    }

    /// Tag name for `delimiter`
    pub fn name_for(&self, delimiter: &str) -> Option<&str> {
        self.tags.get(delimiter).map(String::as_str)
    }

    /// `(delimiter, name)` pairs in delimiter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().map(|(d, n)| (d.as_str(), n.as_str()))
    }

    pub fn nesting_rules(&self) -> &[NestingRule] {
        &self.nesting
    }

    /// Whether `tag` may act as markup while the tags in `open` are unresolved.
    pub fn permits<'t, 'n: 't>(
        &self,
        tag: &Tag<'_>,
        open: impl IntoIterator<Item = &'t Tag<'n>>,
    ) -> bool {
        let forbidden: Vec<&str> = self
            .nesting
            .iter()
            .filter(|rule| rule.tag == tag.name)
            .map(|rule| rule.forbidden_inside.as_str())
            .collect();

        if forbidden.is_empty() {
            return true;
        }

        !open.into_iter().any(|t| forbidden.contains(&t.name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Opening,
    Closing,
    Fake,
}

impl TagKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TagKind::Opening => "opening",
            TagKind::Closing => "closing",
            TagKind::Fake => "fake",
        }
    }
}

/// A delimiter occurrence classified by its surroundings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub definition: &'a str,
    pub name: &'a str,
    pub position: usize,
    pub kind: TagKind,
}

impl<'a> Tag<'a> {
    /// Classify the occurrence of `definition` at byte `position` of `text`.
    pub fn classify(text: &str, definition: &'a str, name: &'a str, position: usize) -> Self {
        Self {
            definition,
            name,
            position,
            kind: tag_kind(text, position, definition.len()),
        }
    }

    /// Same delimiter, opposite role
    pub fn is_pair_to(&self, other: &Tag<'_>) -> bool {
        self.definition == other.definition
            && matches!(
                (self.kind, other.kind),
                (TagKind::Opening, TagKind::Closing) | (TagKind::Closing, TagKind::Opening)
            )
    }

    /// Preceded by a backslash
    pub fn is_escaped(&self, text: &str) -> bool {
        text[..self.position].ends_with('\\')
    }
}

fn tag_kind(text: &str, position: usize, len: usize) -> TagKind {
    let not_opening = text[..position]
        .chars()
        .next_back()
        .is_some_and(|ch| ch != ' ');

    // A delimiter followed by a single final character (`_.`) can still close
    let mut following = text[position + len..].chars();
    let next = following.next();
    let not_closing = following.next().is_some() && next.is_some_and(|ch| ch != ' ');

    match (not_opening, not_closing) {
        (true, true) => TagKind::Fake,
        (false, true) => TagKind::Opening,
        _ => TagKind::Closing,
    }
}
