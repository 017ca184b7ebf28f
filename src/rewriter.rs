//! Placeholder rewriting
//!
//! Template source (or any bound string value) may contain `##key##` markers.
//! A single rewriting pass replaces every non-overlapping marker with the
//! active translation table's value for `key`, or the empty string when the
//! table has no entry. Replacement text is never re-scanned, so a translation
//! value that itself contains `##...##` comes through verbatim.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Marker pattern: two hashes, a non-greedy inner token, two hashes.
/// `.` deliberately does not cross newlines, so an unterminated marker on one
/// line cannot swallow a marker on the next.
const PLACEHOLDER_PATTERN: &str = "##(.+?)##";

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is a valid regex")
    })
}

/// A key → phrase mapping scoped to exactly one language.
///
/// Lookup of an absent key yields the empty string, never an error: a broken
/// template must not fail a render over a missing phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable(pub HashMap<String, String>);

impl TranslationTable {
    pub fn new() -> Self {
        TranslationTable(HashMap::new())
    }

    pub fn with_translation(&mut self, key: &str, phrase: &str) -> &mut Self {
        self.0.insert(key.to_owned(), phrase.to_owned());
        self
    }

    /// Look up a phrase; absent keys resolve to `""`.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Replace every `##key##` marker in `source` with the table's phrase for
/// `key`, or the empty string when no entry exists.
///
/// Single pass over the input: replacement text is not re-expanded, and text
/// without markers is returned unchanged, making the function idempotent on
/// its own output once no markers remain.
///
/// # Example
///
/// ```
/// use tpl_i18n::{TranslationTable, rewrite};
///
/// let mut table = TranslationTable::new();
/// table.with_translation("greeting", "Hello");
/// assert_eq!(rewrite("##greeting##, ##missing##!", &table), "Hello, !");
/// ```
pub fn rewrite(source: &str, table: &TranslationTable) -> String {
    placeholder_regex()
        .replace_all(source, |captures: &regex::Captures| {
            table.get(&captures[1]).to_owned()
        })
        .into_owned()
}
