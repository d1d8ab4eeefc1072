//! Text normalisation applied before resolution.
//!
//! [`clean`] lower-cases and trims the input, removes uncertainty markers,
//! unwraps one layer of enclosing brackets, and rewrites punctuated era
//! tokens to a canonical spelling so later grammars only need to recognise
//! `bc`, `bce`, `ad` and `ce`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static UNCERTAINTY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\?\)").expect("uncertainty marker pattern should compile"));

static TRAILING_QUESTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\?+$").expect("trailing question pattern should compile"));

/// "n.d. [ca. 1770]": no date given, a cataloguer's estimate in brackets.
static NO_DATE_ESTIMATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^n\.\s?d\.,?\s*\[([^\[\]]+)\]$").expect("no-date estimate pattern should compile")
});

static ERA_BCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bb\.\s?c\.\s?e(?:\.|\b)").expect("bce pattern should compile")
});

static ERA_BC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bb\.\s?c(?:\.|\b)").expect("bc pattern should compile"));

static ERA_AD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\ba\.\s?d(?:\.|\b)").expect("ad pattern should compile"));

static ERA_CE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bc\.\s?e(?:\.|\b)").expect("ce pattern should compile"));

static MID_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bmid[-–—]").expect("mid dash pattern should compile"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern should compile"));

static ORDINAL_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:(twenty)[-\s])?(first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|eleventh|twelfth|thirteenth|fourteenth|fifteenth|sixteenth|seventeenth|eighteenth|nineteenth|twentieth)\b",
    )
    .expect("ordinal word pattern should compile")
});

const ORDINAL_WORDS: [&str; 20] = [
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "ninth",
    "tenth",
    "eleventh",
    "twelfth",
    "thirteenth",
    "fourteenth",
    "fifteenth",
    "sixteenth",
    "seventeenth",
    "eighteenth",
    "nineteenth",
    "twentieth",
];

/// Normalise raw input text. Returns `None` when nothing remains.
///
/// # Examples
///
/// ```
/// use epoch_engine::clean::clean;
///
/// assert_eq!(clean("  (Ca. 1650?) ").as_deref(), Some("ca. 1650"));
/// assert_eq!(clean("1184 B. C.").as_deref(), Some("1184 bc"));
/// assert_eq!(clean("   "), None);
/// ```
pub fn clean(raw: &str) -> Option<String> {
    let text = raw.trim().to_lowercase();
    let text = UNCERTAINTY_MARKER.replace_all(&text, " ");
    let text = TRAILING_QUESTION.replace(text.trim(), "");
    let text = unwrap_brackets(text.trim());
    let text = TRAILING_QUESTION.replace(text, "");
    let text = NO_DATE_ESTIMATE.replace(&text, "$1");
    let text = ERA_BCE.replace_all(&text, "bce");
    let text = ERA_BC.replace_all(&text, "bc");
    let text = ERA_AD.replace_all(&text, "ad");
    let text = ERA_CE.replace_all(&text, "ce");
    let text = MID_DASH.replace_all(&text, "mid ");
    let text = collapse_whitespace(&text);
    (!text.is_empty()).then_some(text)
}

/// Replace every run of whitespace with one space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Rewrite ordinal words as numbered ordinals: "second month" → "2nd month",
/// "twenty-first century" → "21st century".
pub fn ordinal_words_to_numbers(text: &str) -> Cow<'_, str> {
    ORDINAL_WORD.replace_all(text, |caps: &Captures| {
        let unit = ORDINAL_WORDS
            .iter()
            .position(|w| *w == &caps[2])
            .map_or(0, |i| i + 1);
        match (caps.get(1), unit) {
            (Some(_), 1..=9) => numbered_ordinal(20 + unit),
            (Some(_), _) => caps[0].to_string(),
            (None, n) => numbered_ordinal(n),
        }
    })
}

/// `21` → `"21st"`, `12` → `"12th"`.
pub fn numbered_ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Strip one enclosing pair of `()`, `[]` or `{}` if it wraps the whole text.
fn unwrap_brackets(text: &str) -> &str {
    for (open, close) in [('(', ')'), ('[', ']'), ('{', '}')] {
        if let Some(inner) = text
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            if !inner.contains([open, close]) {
                return inner.trim();
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(raw: &str) -> String {
        clean(raw).unwrap()
    }

    #[test]
    fn test_lowercase_and_collapse() {
        assert_eq!(cleaned("  Early   20th  Century "), "early 20th century");
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(clean(""), None);
        assert_eq!(clean(" ? "), None);
    }

    #[test]
    fn test_uncertainty_markers_removed() {
        assert_eq!(cleaned("1787 (?)"), "1787");
        assert_eq!(cleaned("1787?"), "1787");
        assert_eq!(cleaned("ca. 1800 (?)–1850"), "ca. 1800 –1850");
    }

    #[test]
    fn test_brackets_unwrapped_once() {
        assert_eq!(cleaned("[about 1770s]"), "about 1770s");
        assert_eq!(cleaned("(1850)"), "1850");
        assert_eq!(cleaned("{1850}"), "1850");
        assert_eq!(cleaned("(1850) or (1860)"), "(1850) or (1860)");
    }

    #[test]
    fn test_no_date_estimate_extracted() {
        assert_eq!(cleaned("n.d. [ca. 1770]"), "ca. 1770");
    }

    #[test]
    fn test_era_tokens_canonical() {
        assert_eq!(cleaned("1184 B.C."), "1184 bc");
        assert_eq!(cleaned("500 b.c.e."), "500 bce");
        assert_eq!(cleaned("A.D. 2nd–7th century"), "ad 2nd–7th century");
        assert_eq!(cleaned("979 C.E."), "979 ce");
        assert_eq!(cleaned("1919–1800 b. c."), "1919–1800 bc");
    }

    #[test]
    fn test_circa_not_mistaken_for_era() {
        assert_eq!(cleaned("c. 1850"), "c. 1850");
        assert_eq!(cleaned("c. early 19th century"), "c. early 19th century");
    }

    #[test]
    fn test_mid_dash_becomes_space() {
        assert_eq!(cleaned("mid-19th century"), "mid 19th century");
        assert_eq!(cleaned("mid–1800s"), "mid 1800s");
    }

    #[test]
    fn test_ordinal_words() {
        assert_eq!(ordinal_words_to_numbers("second month"), "2nd month");
        assert_eq!(ordinal_words_to_numbers("twelfth century"), "12th century");
        assert_eq!(
            ordinal_words_to_numbers("twenty-first century"),
            "21st century"
        );
        assert_eq!(ordinal_words_to_numbers("1850"), "1850");
    }

    #[test]
    fn test_numbered_ordinal_suffixes() {
        assert_eq!(numbered_ordinal(1), "1st");
        assert_eq!(numbered_ordinal(2), "2nd");
        assert_eq!(numbered_ordinal(3), "3rd");
        assert_eq!(numbered_ordinal(11), "11th");
        assert_eq!(numbered_ordinal(13), "13th");
        assert_eq!(numbered_ordinal(22), "22nd");
    }
}
