//! Catalog slugs for brand names.
//!
//! Text is folded to ASCII, lowercased, trimmed, and every run of characters
//! outside `[A-Za-z0-9_]` becomes a single hyphen.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Character used for anything that has no latin approximation.
const REPLACEMENT: char = '?';

static NON_WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *[^A-Za-z0-9_]+ *").expect("slug pattern is valid"));

/// Build the catalog slug for `text`.
///
/// ```
/// use off_brand_corrector::utils::slug::slug;
///
/// assert_eq!(slug("Ben & Jerry's"), "ben-jerry-s");
/// assert_eq!(slug("Blédina"), "bledina");
/// ```
pub fn slug(text: &str) -> String {
    let folded = transliterate(text).to_lowercase();
    NON_WORD_RUN
        .replace_all(folded.trim(), "-")
        .into_owned()
}

/// Fold `text` to its closest ASCII representation.
///
/// Accents are dropped through NFKD decomposition; a few letters that do not
/// decompose get a fixed approximation and everything else becomes `?`.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfkd() {
        if c.is_ascii() {
            out.push(c);
        } else if is_combining_mark(c) {
            continue;
        } else if let Some(approx) = approximate(c) {
            out.push_str(approx);
        } else {
            out.push(REPLACEMENT);
        }
    }
    out
}

fn approximate(c: char) -> Option<&'static str> {
    let approx = match c {
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'ł' => "l",
        'Ł' => "L",
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'þ' => "th",
        'Þ' => "TH",
        'ı' => "i",
        _ => return None,
    };
    Some(approx)
}
