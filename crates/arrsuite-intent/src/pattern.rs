use bitflags::bitflags;
use regex::{Regex, RegexBuilder};

use crate::context::ContextKey;
use crate::error::IntentError;

bitflags! {
    /// Flags controlling how a context pattern is compiled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PatternFlags: u8 {
        /// Match the whole pattern case-insensitively.
        /// Patterns that need case-sensitive parts (capitalized titles) leave
        /// this off and use inline `(?i:...)` groups instead.
        const CASE_INSENSITIVE = 0b0000_0001;
    }
}

/// An uncompiled pattern: source text plus flags.
#[derive(Debug, Clone, Copy)]
pub struct PatternSpec<'a> {
    pub source: &'a str,
    pub flags: PatternFlags,
}

impl<'a> PatternSpec<'a> {
    pub const fn new(source: &'a str) -> Self {
        Self {
            source,
            flags: PatternFlags::empty(),
        }
    }

    pub const fn insensitive(source: &'a str) -> Self {
        Self {
            source,
            flags: PatternFlags::CASE_INSENSITIVE,
        }
    }
}

/// A capitalized title: capitalized words, optionally joined by short
/// lowercase connectors ("The Lord of the Rings", "Law & Order").
///
/// A word's second character must not be a digit, so episode codes such as
/// "S01E05" never start or extend a title.
macro_rules! title_words {
    () => {
        concat!(
            r"(",
            title_word!(),
            r"(?:\s+(?:(?:of|the|and|a|an|on|at|&)\s+)*",
            title_word!(),
            r")*)(?:\W|$)"
        )
    };
}

macro_rules! title_word {
    () => {
        r"\p{Lu}(?:[\p{L}'!:-][\w'!:-]*)?"
    };
}

/// An episode code ahead of the title ("grab S01E05 of Severance").
macro_rules! episode_code {
    () => {
        r"(?i:s\d+(?:e\d+)?\s+(?:of\s+)?)?"
    };
}

// ── Built-in patterns ───────────────────────────────────────────

const TITLE: &[PatternSpec<'static>] = &[
    PatternSpec::insensitive(r#"(?:titled?|named?|called)\s+['"]([^'"]+)['"]"#),
    PatternSpec::new(r#"['"]([^'"]+)['"]"#),
    PatternSpec::new(r"(?i:\b(?:movie|show|series))\s+(\p{Lu}[^.,;]+)"),
    PatternSpec::new(concat!(r"(?i:\bfor)\s+", episode_code!(), title_words!())),
    PatternSpec::new(concat!(
        r"(?i:\b(?:add|request|get|find|search|lookup|locate|download|grab|delete|remove|monitor|unmonitor|watch|play|want|need))\s+",
        episode_code!(),
        title_words!()
    )),
];

const YEAR: &[PatternSpec<'static>] = &[PatternSpec::new(r"\b(19\d{2}|20\d{2})\b")];

const SEASON: &[PatternSpec<'static>] = &[
    PatternSpec::insensitive(r"season\s+(\d+)"),
    PatternSpec::insensitive(r"\bs(\d+)"),
];

const EPISODE: &[PatternSpec<'static>] = &[
    PatternSpec::insensitive(r"episode\s+(\d+)"),
    // Short form, also inside "S01E05".
    PatternSpec::insensitive(r"(?:\b|\d)e(\d+)"),
];

const QUALITY: &[PatternSpec<'static>] = &[PatternSpec::insensitive(
    r"(?:\bin\s+)?\b(\d+[kp]|4k|1080p|720p|sd|hd|uhd)\b",
)];

const LANGUAGE: &[PatternSpec<'static>] = &[PatternSpec::insensitive(
    r"(?:\bin\s+)?\b(\w+)\s+(?:language|subtitle|subs?)",
)];

const BUILTIN: &[(ContextKey, &[PatternSpec<'static>])] = &[
    (ContextKey::Title, TITLE),
    (ContextKey::Year, YEAR),
    (ContextKey::Season, SEASON),
    (ContextKey::Episode, EPISODE),
    (ContextKey::Quality, QUALITY),
    (ContextKey::Language, LANGUAGE),
];

/// Compiled context patterns, grouped per key in extraction order.
#[derive(Debug, Clone)]
pub struct ContextPatternTable {
    entries: Vec<(ContextKey, Vec<Regex>)>,
}

impl ContextPatternTable {
    /// Compile the built-in patterns.
    pub fn builtin() -> Result<Self, IntentError> {
        Self::compile(BUILTIN)
    }

    /// Compile pattern lists. Keys are reordered into extraction order;
    /// patterns keep their declared order within a key.
    ///
    /// Fails on the first pattern that does not compile, does not have
    /// exactly one capture group, or targets a flag key.
    pub fn compile(specs: &[(ContextKey, &[PatternSpec<'_>])]) -> Result<Self, IntentError> {
        let mut entries: Vec<(ContextKey, Vec<Regex>)> = Vec::new();

        for (key, patterns) in specs {
            let key = *key;
            if !key.is_extracted() {
                return Err(IntentError::NotExtractable(key));
            }

            let compiled = patterns
                .iter()
                .map(|spec| compile_one(key, spec))
                .collect::<Result<Vec<_>, _>>()?;

            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => existing.extend(compiled),
                None => entries.push((key, compiled)),
            }
        }

        entries.sort_by_key(|(key, _)| *key);
        Ok(Self { entries })
    }

    /// Patterns for each key, in extraction order.
    pub fn iter(&self) -> impl Iterator<Item = (ContextKey, &[Regex])> {
        self.entries.iter().map(|(key, patterns)| (*key, patterns.as_slice()))
    }

    pub fn patterns(&self, key: ContextKey) -> &[Regex] {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, p)| p.as_slice())
            .unwrap_or(&[])
    }
}

fn compile_one(key: ContextKey, spec: &PatternSpec<'_>) -> Result<Regex, IntentError> {
    let regex = RegexBuilder::new(spec.source)
        .case_insensitive(spec.flags.contains(PatternFlags::CASE_INSENSITIVE))
        .build()
        .map_err(|source| IntentError::InvalidPattern {
            key,
            pattern: spec.source.to_string(),
            source,
        })?;

    // captures_len() counts the implicit whole-match group.
    let found = regex.captures_len() - 1;
    if found != 1 {
        return Err(IntentError::CaptureGroups {
            key,
            pattern: spec.source.to_string(),
            found,
        });
    }

    Ok(regex)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_capture<'a>(table: &ContextPatternTable, key: ContextKey, text: &'a str) -> Option<&'a str> {
        table
            .patterns(key)
            .iter()
            .find_map(|re| re.captures(text))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    #[test]
    fn test_builtin_compiles() {
        let table = ContextPatternTable::builtin().unwrap();
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ContextKey::EXTRACTED.to_vec());
        assert_eq!(table.patterns(ContextKey::Title).len(), 5);
    }

    fn compile_single(key: ContextKey, source: &str) -> Result<ContextPatternTable, IntentError> {
        let specs: &[PatternSpec<'_>] = &[PatternSpec::new(source)];
        ContextPatternTable::compile(&[(key, specs)])
    }

    #[test]
    fn test_rejects_invalid_regex() {
        let err = compile_single(ContextKey::Year, r"(19\d{2}").unwrap_err();
        assert!(matches!(err, IntentError::InvalidPattern { key: ContextKey::Year, .. }));
    }

    #[test]
    fn test_rejects_wrong_capture_count() {
        let err = compile_single(ContextKey::Season, r"season \d+").unwrap_err();
        assert!(matches!(err, IntentError::CaptureGroups { found: 0, .. }));

        let err = compile_single(ContextKey::Season, r"(s)(\d+)").unwrap_err();
        assert!(matches!(err, IntentError::CaptureGroups { found: 2, .. }));
    }

    #[test]
    fn test_rejects_flag_keys() {
        let err = compile_single(ContextKey::Is4k, r"(4k)").unwrap_err();
        assert!(matches!(err, IntentError::NotExtractable(ContextKey::Is4k)));
        assert_eq!(
            err.to_string(),
            "is_4k is a derived flag and cannot be matched by a pattern"
        );
    }

    #[test]
    fn test_keys_are_sorted_and_merged() {
        let long_episode: &[PatternSpec<'_>] = &[PatternSpec::new(r"ep(\d+)")];
        let quoted: &[PatternSpec<'_>] = &[PatternSpec::new(r#""([^"]+)""#)];
        let short_episode: &[PatternSpec<'_>] = &[PatternSpec::new(r"e(\d+)")];
        let table = ContextPatternTable::compile(&[
            (ContextKey::Episode, long_episode),
            (ContextKey::Title, quoted),
            (ContextKey::Episode, short_episode),
        ])
        .unwrap();
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![ContextKey::Title, ContextKey::Episode]);
        assert_eq!(table.patterns(ContextKey::Episode).len(), 2);
        assert!(table.patterns(ContextKey::Year).is_empty());
    }

    #[test]
    fn test_title_requires_capitals_after_keyword() {
        let table = ContextPatternTable::builtin().unwrap();
        assert_eq!(first_capture(&table, ContextKey::Title, "Show all indexers"), None);
        assert_eq!(
            first_capture(&table, ContextKey::Title, "add the show Breaking Bad, please"),
            Some("Breaking Bad")
        );
    }

    #[test]
    fn test_title_connectors() {
        let table = ContextPatternTable::builtin().unwrap();
        assert_eq!(
            first_capture(&table, ContextKey::Title, "Add The Lord of the Rings from 2001"),
            Some("The Lord of the Rings")
        );
        assert_eq!(
            first_capture(&table, ContextKey::Title, "search for Law & Order"),
            Some("Law & Order")
        );
    }

    #[test]
    fn test_episode_code_is_not_a_title() {
        let table = ContextPatternTable::builtin().unwrap();
        assert_eq!(
            first_capture(&table, ContextKey::Title, "Grab S01E05 of Severance"),
            Some("Severance")
        );
        assert_eq!(
            first_capture(&table, ContextKey::Title, "Get Severance S01E05"),
            Some("Severance")
        );
        assert_eq!(first_capture(&table, ContextKey::Title, "Grab S01E05"), None);
        assert_eq!(
            first_capture(&table, ContextKey::Title, "Add WALL-E in 4K"),
            Some("WALL-E")
        );
        assert_eq!(first_capture(&table, ContextKey::Title, "Request X"), Some("X"));
    }

    #[test]
    fn test_short_season_and_episode() {
        let table = ContextPatternTable::builtin().unwrap();
        assert_eq!(first_capture(&table, ContextKey::Season, "Grab S01E05"), Some("01"));
        assert_eq!(first_capture(&table, ContextKey::Episode, "Grab S01E05"), Some("05"));
    }

    #[test]
    fn test_quality_is_word_bounded() {
        let table = ContextPatternTable::builtin().unwrap();
        assert_eq!(first_capture(&table, ContextKey::Quality, "Add Wednesday"), None);
        assert_eq!(first_capture(&table, ContextKey::Quality, "Get Dune in 1080p"), Some("1080p"));
    }
}
