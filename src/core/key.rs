use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Everything that cannot appear in a key, including `_` itself so that
// existing underscores merge with neighbouring punctuation.
static NON_KEY_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

static KEY_GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(_[a-z0-9]+)*$").unwrap());

/// Convert literal text into a resource key.
///
/// Lowercases, replaces every run of characters outside `[a-z0-9]` with a
/// single `_`, and trims `_` from both ends. Returns an empty string when
/// the text has no ASCII alphanumeric content.
///
/// # Examples
///
/// ```
/// use arbify::core::derive_key;
///
/// assert_eq!(derive_key("Hello My Friend"), "hello_my_friend");
/// assert_eq!(derive_key("Don't panic!"), "don_t_panic");
/// assert_eq!(derive_key("  ...??  "), "");
/// ```
pub fn derive_key(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    NON_KEY_RUN
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// A normalized resource key: `[a-z0-9]+` segments joined by single `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct L10nKey(String);

impl L10nKey {
    /// Derive a key from literal text. `None` if nothing usable remains.
    pub fn derive(raw: &str) -> Option<Self> {
        let key = derive_key(raw);
        if key.is_empty() { None } else { Some(Self(key)) }
    }

    /// Accept `key` as-is if it already satisfies the key grammar.
    pub fn parse(key: &str) -> Option<Self> {
        KEY_GRAMMAR.is_match(key).then(|| Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for L10nKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for L10nKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
