//! Identifier forms derived from a free-form project name.

use std::{fmt, str::FromStr};

use miette::Diagnostic;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use thiserror::Error;

use crate::utils::{capitalize, transliterate};

/// The raw name normalized to an empty word sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("invalid project name '{raw}'")]
#[diagnostic(
    code(sprig::invalid_name),
    help("the name needs at least one word containing a letter or digit, e.g. 'My Amazing Plugin'")
)]
pub struct InvalidName {
    /// The input as it was supplied.
    pub raw: String,
}

/// The family of identifier forms for one project name.
///
/// All forms are built from the same normalized word sequence, so splitting
/// any of them on its separator yields the same words.
///
/// | form     | example              |
/// |----------|----------------------|
/// | `title`  | `My Amazing Plugin`  |
/// | `file`   | `my-amazing-plugin`  |
/// | `symbol` | `My_Amazing_Plugin`  |
/// | `snake`  | `my_amazing_plugin`  |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentifierForms {
    words: Vec<String>,
    title: String,
    file: String,
    symbol: String,
    snake: String,
}

impl IdentifierForms {
    fn from_words(spelled: Vec<(String, String)>) -> Self {
        let title: Vec<String> = spelled.iter().map(|(display, _)| capitalize(display)).collect();
        let words: Vec<String> = spelled.into_iter().map(|(_, word)| word).collect();
        let symbol: Vec<String> = words.iter().map(|w| capitalize(w)).collect();
        Self {
            title: title.join(" "),
            symbol: symbol.join("_"),
            file: words.join("-"),
            snake: words.join("_"),
            words,
        }
    }

    /// Normalized lowercase words the forms are built from.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Human-readable form, e.g. "My Amazing Plugin".
    pub fn title(&self) -> &str {
        &self.title
    }

    /// File-system-safe form, e.g. "my-amazing-plugin".
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Source identifier form, e.g. "My_Amazing_Plugin".
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Lowercase underscore form, e.g. "my_amazing_plugin".
    pub fn snake(&self) -> &str {
        &self.snake
    }
}

/// Derive the identifier forms for a raw project name.
///
/// The name is trimmed, transliterated to ASCII, lowercased and split on
/// whitespace. The title form keeps each word's spelling; the file, snake and
/// symbol forms keep only its `[a-z0-9]` characters. Words with no such
/// character are dropped from every form. Fails if no word survives.
pub fn derive(raw: &str) -> Result<IdentifierForms, InvalidName> {
    let spelled = spelled_words(raw);
    if spelled.is_empty() {
        return Err(InvalidName {
            raw: raw.to_string(),
        });
    }
    Ok(IdentifierForms::from_words(spelled))
}

/// Split a raw name into its normalized word sequence.
///
/// Returns an empty vector when the name has no usable words.
pub fn normalize_words(raw: &str) -> Vec<String> {
    spelled_words(raw).into_iter().map(|(_, word)| word).collect()
}

/// Pairs of (lowercased word as written, word reduced to `[a-z0-9]`).
fn spelled_words(raw: &str) -> Vec<(String, String)> {
    transliterate(raw.trim())
        .to_lowercase()
        .split_whitespace()
        .filter_map(|written| {
            let word: String = written
                .chars()
                .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                .collect();
            (!word.is_empty()).then(|| (written.to_string(), word))
        })
        .collect()
}

/// Title-case a free-form name such as an author's (e.g., "  george   BURDELL" -> "George Burdell").
///
/// Unlike [`derive`], punctuation inside words is kept and an empty input is
/// returned as-is.
pub fn pretty_name(raw: &str) -> String {
    transliterate(raw.trim())
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for IdentifierForms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl FromStr for IdentifierForms {
    type Err = InvalidName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        derive(s)
    }
}

impl Serialize for IdentifierForms {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("IdentifierForms", 4)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("file", &self.file)?;
        state.serialize_field("symbol", &self.symbol)?;
        state.serialize_field("snake", &self.snake)?;
        state.end()
    }
}
