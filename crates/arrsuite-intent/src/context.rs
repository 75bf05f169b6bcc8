use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A parameter slot that can be filled from a request.
///
/// Declaration order is the order in which keys are extracted, iterated and
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContextKey {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "season")]
    Season,
    #[serde(rename = "episode")]
    Episode,
    #[serde(rename = "quality")]
    Quality,
    #[serde(rename = "language")]
    Language,
    #[serde(rename = "monitored")]
    Monitored,
    #[serde(rename = "search_on_add")]
    SearchOnAdd,
    #[serde(rename = "is_4k")]
    Is4k,
}

impl ContextKey {
    /// Keys filled by regex patterns, in extraction order.
    pub const EXTRACTED: [ContextKey; 6] = [
        ContextKey::Title,
        ContextKey::Year,
        ContextKey::Season,
        ContextKey::Episode,
        ContextKey::Quality,
        ContextKey::Language,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContextKey::Title => "title",
            ContextKey::Year => "year",
            ContextKey::Season => "season",
            ContextKey::Episode => "episode",
            ContextKey::Quality => "quality",
            ContextKey::Language => "language",
            ContextKey::Monitored => "monitored",
            ContextKey::SearchOnAdd => "search_on_add",
            ContextKey::Is4k => "is_4k",
        }
    }

    /// Whether values for this key come from patterns rather than flags.
    pub fn is_extracted(self) -> bool {
        Self::EXTRACTED.contains(&self)
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted value: raw captured text or a boolean flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Text(String),
    Flag(bool),
}

impl ContextValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContextValue::Text(s) => Some(s),
            ContextValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ContextValue::Flag(b) => Some(*b),
            ContextValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Text(s) => f.write_str(s),
            ContextValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Parameters extracted from a request.
///
/// Only detected keys are present; a missing key means "not mentioned",
/// never an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(BTreeMap<ContextKey, ContextValue>);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: ContextKey) -> Option<&ContextValue> {
        self.0.get(&key)
    }

    /// Text value for `key`, if present and textual.
    pub fn text(&self, key: ContextKey) -> Option<&str> {
        self.get(key).and_then(ContextValue::as_text)
    }

    /// Flag value for `key`, if present and boolean.
    pub fn flag(&self, key: ContextKey) -> Option<bool> {
        self.get(key).and_then(ContextValue::as_flag)
    }

    pub fn contains(&self, key: ContextKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn title(&self) -> Option<&str> {
        self.text(ContextKey::Title)
    }

    /// True only when 4K was explicitly asked for.
    pub fn is_4k(&self) -> bool {
        self.flag(ContextKey::Is4k).unwrap_or(false)
    }

    pub fn insert_text(&mut self, key: ContextKey, value: impl Into<String>) {
        self.0.insert(key, ContextValue::Text(value.into()));
    }

    pub fn insert_flag(&mut self, key: ContextKey, value: bool) {
        self.0.insert(key, ContextValue::Flag(value));
    }

    /// Entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, ContextKey, ContextValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a ContextKey, &'a ContextValue);
    type IntoIter = btree_map::Iter<'a, ContextKey, ContextValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
