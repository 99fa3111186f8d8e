//! Shared string utilities for name normalization.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Replace accented characters with their closest unaccented ASCII equivalents
/// (e.g., "São Paulo" -> "Sao Paulo").
///
/// Characters are decomposed (NFD) and their combining marks dropped. Latin
/// letters that have no decomposition are mapped through a small table.
/// Everything else passes through unchanged.
pub fn transliterate(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        match ligature(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}

fn ligature(c: char) -> Option<&'static str> {
    let replacement = match c {
        'ß' => "ss",
        'ẞ' => "SS",
        'æ' => "ae",
        'Æ' => "Ae",
        'ø' => "o",
        'Ø' => "O",
        'œ' => "oe",
        'Œ' => "Oe",
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'ł' => "l",
        'Ł' => "L",
        'þ' => "th",
        'Þ' => "Th",
        'ı' => "i",
        'ĸ' => "k",
        'ŉ' => "n",
        'ſ' => "s",
        _ => return None,
    };
    Some(replacement)
}

/// Uppercase the first character and lowercase the rest (e.g., "pLUGIN" -> "Plugin")
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliterate_diacritics() {
        assert_eq!(transliterate("São Paulo"), "Sao Paulo");
        assert_eq!(transliterate("Crème brûlée"), "Creme brulee");
        assert_eq!(transliterate("Ångström"), "Angstrom");
        assert_eq!(transliterate("naïve café"), "naive cafe");
    }

    #[test]
    fn test_transliterate_ligatures() {
        assert_eq!(transliterate("Straße"), "Strasse");
        assert_eq!(transliterate("STRAẞE"), "STRASSE");
        assert_eq!(transliterate("Æsir"), "Aesir");
        assert_eq!(transliterate("Øresund"), "Oresund");
        assert_eq!(transliterate("Łódź"), "Lodz");
    }

    #[test]
    fn test_transliterate_passthrough() {
        assert_eq!(transliterate("plain ascii 123"), "plain ascii 123");
        assert_eq!(transliterate(""), "");
        assert_eq!(transliterate("插件"), "插件");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("plugin"), "Plugin");
        assert_eq!(capitalize("pLUGIN"), "Plugin");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize("42nd"), "42nd");
        assert_eq!(capitalize(""), "");
    }
}
