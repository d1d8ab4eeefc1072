//! Compound expressions: "X to Y", "X–Y", "X/Y", year lists and shorthand.
//!
//! [`resolve`] splits the text into two sub-expressions using the first
//! [`Split`] strategy whose halves both resolve, re-entering the pipeline on
//! each half, and spans from the left start to the right end.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::attempt::{both, first_success};
use crate::clean::ordinal_words_to_numbers;
use crate::modifier::{is_season_year_span, strip_annotations, Modifier};
use crate::options::ParseOptions;
use crate::outcome::{DateRange, HandlerId, ParseOutcome};
use crate::resolver::resolve_subexpression;

const ERA: &str = r"(?:bce|bc|ad|ce)";

const MONTH: &str = r"(?:january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\.?";

const ORDINAL_UNIT: &str = r"(?:centur(?:y|ies)|cent?\.?|millenn?i(?:um|a)|mill\.?)";

/// Per-side qualifiers inside an ordinal join ("late 16th–mid 17th century").
const QUALIFIER: &str = r"(?:(?:early|mid|late)\s+|(?:1st|2nd|last|latter)\s+half\s+(?:of\s+)?(?:the\s+)?|end\s+of\s+(?:the\s+)?|(?:1st|2nd|3rd|4th|last)\s+quarter\s+(?:of\s+)?(?:the\s+)?)";

/// A join between the two sides of a compound expression.
const JOIN: &str = r"\s*(?:[-–—,/]|\s(?:and|to|or)\s)\s*";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("range pattern should compile")
}

static YEAR_SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(\d{1,4})\s*[-–—]\s*(\d{1,3})$"));

static WORD_JOIN: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+(?:to|or)\s+"));

static DASH: LazyLock<Regex> = LazyLock::new(|| compile(r"\s*[-–—‒]\s*"));

static ORDINAL_JOIN: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^(?:(?P<front>{ERA})\s+)?(?P<q1>{QUALIFIER})?(?P<n1>\d+(?:st|nd|rd|th)?)(?:\s*(?P<u1>{ORDINAL_UNIT}))?(?:\s+(?P<e1>{ERA}))?{JOIN}(?P<q2>{QUALIFIER})?(?P<n2>\d+(?:st|nd|rd|th)?)\s*(?P<u2>{ORDINAL_UNIT})(?:\s+(?P<e2>{ERA}))?$"
    ))
});

static MONTH_JOIN: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^(?P<m1>{MONTH}){JOIN}(?P<m2>{MONTH}),?\s+(?P<rest>\d.*)$"
    ))
});

static DAY_JOINS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        compile(&format!(
            r"^(?P<m1>{MONTH})\s+(?P<d1>\d{{1,2}})(?:st|nd|rd|th)?\s*[-–—]\s*(?:(?P<m2>{MONTH})\s+)?(?P<d2>\d{{1,2}})(?:st|nd|rd|th)?,?\s+(?P<year>\d+(?:\s*{ERA})?)$"
        )),
        compile(&format!(
            r"^(?P<d1>\d{{1,2}})(?:st|nd|rd|th)?\s*[-–—]\s*(?P<d2>\d{{1,2}})(?:st|nd|rd|th)?\s+(?P<m1>{MONTH}),?\s+(?P<year>\d+(?:\s*{ERA})?)$"
        )),
    ]
});

static LIST_YEAR: LazyLock<Regex> = LazyLock::new(|| compile(r"^\d{3,4}$"));

static BARE_MONTH_NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"^\d{1,2}$"));

static TRAILING_DIGITS: LazyLock<Regex> = LazyLock::new(|| compile(r"(\d+)$"));

static SHORTHAND_RIGHT: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"^(?P<digits>\d{{1,3}})(?P<tail>\s*{ERA})?$")));

static TRAILING_ERA: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"\s(?P<era>{ERA})$")));

static ANY_ERA: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"\b{ERA}\b")));

// ── Year-range shorthand ────────────────────────────────────────────────────

/// Resolve a bare shorthand year range ("1835-8", "1920-25").
///
/// Tagged [`HandlerId::Year`]: both ends are plain years.
///
/// # Examples
///
/// ```
/// use epoch_engine::range::resolve_year_shorthand;
/// use epoch_engine::ParseOptions;
///
/// let outcome = resolve_year_shorthand("1835-8", &ParseOptions::default()).unwrap();
/// assert_eq!(outcome.range.to_iso_pair().1, "1838-12-31T23:59:59.999Z");
/// ```
pub fn resolve_year_shorthand(text: &str, options: &ParseOptions) -> Option<ParseOutcome> {
    let caps = YEAR_SHORTHAND.captures(text)?;
    let start: i32 = caps[1].parse().ok()?;
    let end = expand_shorthand(&caps[1], &caps[2], false)?;
    let range = DateRange::from_years(start, end)?;
    Some(ParseOutcome::leaf(HandlerId::Year, text, *options, range))
}

/// Infer the full end year of a shorthand range.
///
/// The suffix replaces the same number of low-order digits of `start`. A
/// result equal to `start` is rejected. A result on the wrong side of
/// `start` rolls over into the next block of `10^k` years ("1999-02" →
/// 2002), downwards when `descending` (BCE ranges count down).
pub fn expand_shorthand(start: &str, suffix: &str, descending: bool) -> Option<i32> {
    if suffix.is_empty() || suffix.len() >= start.len() {
        return None;
    }
    let start_value: i32 = start.parse().ok()?;
    let suffix_value: i32 = suffix.parse().ok()?;
    let block = 10_i32.checked_pow(u32::try_from(suffix.len()).ok()?)?;
    let candidate = start_value
        .checked_sub(start_value % block)?
        .checked_add(suffix_value)?;
    match (candidate.cmp(&start_value), descending) {
        (Ordering::Equal, _) => None,
        (Ordering::Greater, false) | (Ordering::Less, true) => Some(candidate),
        (Ordering::Less, false) => candidate.checked_add(block),
        (Ordering::Greater, true) => Some(candidate - block).filter(|year| *year > 0),
    }
}

// ── Splitting ───────────────────────────────────────────────────────────────

/// Ways of cutting a compound expression in two, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// "1800 to 1850", "1806 or 1811"
    Words,
    /// "18th–19th century", "late 16th–mid 17th century", "7th–6th millennium bce"
    OrdinalUnits,
    /// "june–july 1834"
    MonthNames,
    /// "april 22–24, 1865", "april 22–may 3, 1865"
    Days,
    /// "1704, 1708, 1712"
    YearList,
    /// "ca. 1833–46", "1184–53 bc"
    Shorthand,
    /// "1850–1900"
    Dash,
    /// "1969/1981"
    Slash,
    /// "1575; 1577"
    Semicolon,
}

pub const STRATEGIES: [Split; 9] = [
    Split::Words,
    Split::OrdinalUnits,
    Split::MonthNames,
    Split::Days,
    Split::YearList,
    Split::Shorthand,
    Split::Dash,
    Split::Slash,
    Split::Semicolon,
];

impl Split {
    /// Cut `text` into left and right sub-expressions.
    pub fn split(self, text: &str) -> Option<(String, String)> {
        match self {
            Split::Words => split_once_on(&WORD_JOIN, text).map(share_era),
            Split::OrdinalUnits => split_ordinal_units(text),
            Split::MonthNames => {
                let caps = MONTH_JOIN.captures(text)?;
                let rest = &caps["rest"];
                Some((
                    format!("{} {rest}", &caps["m1"]),
                    format!("{} {rest}", &caps["m2"]),
                ))
            }
            Split::Days => {
                let caps = DAY_JOINS.iter().find_map(|re| re.captures(text))?;
                let start_month = &caps["m1"];
                let end_month = caps.name("m2").map_or(start_month, |m| m.as_str());
                let year = &caps["year"];
                Some((
                    format!("{start_month} {}, {year}", &caps["d1"]),
                    format!("{end_month} {}, {year}", &caps["d2"]),
                ))
            }
            Split::YearList => split_year_list(text),
            Split::Dash => split_once_on(&DASH, text).map(share_era),
            Split::Slash => {
                let (left, right) = split_once_literal(text, '/')?;
                if BARE_MONTH_NUMBER.is_match(&right) {
                    return None;
                }
                Some(share_era((left, right)))
            }
            Split::Semicolon => split_once_literal(text, ';').map(share_era),
            Split::Shorthand => split_shorthand(text),
        }
    }
}

/// Split at the only match of `separator`; absent when there are none or several.
fn split_once_on(separator: &Regex, text: &str) -> Option<(String, String)> {
    let mut matches = separator.find_iter(text);
    let cut = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    let left = text[..cut.start()].trim();
    let right = text[cut.end()..].trim();
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left.to_string(), right.to_string()))
}

fn split_once_literal(text: &str, separator: char) -> Option<(String, String)> {
    let (left, right) = text.split_once(separator)?;
    if right.contains(separator) {
        return None;
    }
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left.to_string(), right.to_string()))
}

/// Give a bare left year the era written only after the right one ("1184–1153 bc").
fn share_era((left, right): (String, String)) -> (String, String) {
    let era = TRAILING_ERA
        .captures(&right)
        .map(|caps| caps["era"].to_string());
    match era {
        Some(era)
            if !ANY_ERA.is_match(&left) && left.ends_with(|c: char| c.is_ascii_digit()) =>
        {
            (format!("{left} {era}"), right)
        }
        _ => (left, right),
    }
}

fn split_ordinal_units(text: &str) -> Option<(String, String)> {
    let text = ordinal_words_to_numbers(text);
    let caps = ORDINAL_JOIN.captures(&text)?;
    let part = |name: &str| caps.name(name).map_or("", |m| m.as_str());

    let front = caps
        .name("front")
        .map_or(String::new(), |m| format!("{} ", m.as_str()));
    let right_unit = part("u2");
    let left_unit = caps.name("u1").map_or(right_unit, |m| m.as_str());
    let right_era = caps
        .name("e2")
        .map_or(String::new(), |m| format!(" {}", m.as_str()));
    let left_era = caps
        .name("e1")
        .map_or(right_era.clone(), |m| format!(" {}", m.as_str()));

    Some((
        format!("{front}{}{} {left_unit}{left_era}", part("q1"), part("n1")),
        format!("{front}{}{} {right_unit}{right_era}", part("q2"), part("n2")),
    ))
}

/// The earliest and latest year of a comma-separated list of years.
fn split_year_list(text: &str) -> Option<(String, String)> {
    let years: Vec<i32> = text
        .split(',')
        .map(str::trim)
        .map(|item| {
            LIST_YEAR
                .is_match(item)
                .then(|| item.parse::<i32>().ok())
                .flatten()
        })
        .collect::<Option<_>>()?;
    if years.len() < 2 {
        return None;
    }
    let first = years.iter().min()?;
    let last = years.iter().max()?;
    Some((first.to_string(), last.to_string()))
}

/// "ca. 1833–46" → ("ca. 1833", "1846"); "1184–53 bc" → ("1184 bc", "1153 bc").
fn split_shorthand(text: &str) -> Option<(String, String)> {
    let (left, right) = split_once_on(&DASH, text)?;
    let (start_digits, caps) = both(
        TRAILING_DIGITS
            .captures(&left)
            .map(|caps| caps[1].to_string()),
        |_| SHORTHAND_RIGHT.captures(&right),
    )?;
    let tail = caps.name("tail").map_or("", |m| m.as_str());
    let descending = tail.trim().starts_with('b');
    let end = expand_shorthand(&start_digits, &caps["digits"], descending)?;
    let right = format!("{end}{tail}");
    Some(share_era((left, right)))
}

// ── Range resolver ──────────────────────────────────────────────────────────

/// Resolve a compound expression, or `None` if no split resolves on both sides.
pub fn resolve(text: &str, options: &ParseOptions) -> Option<ParseOutcome> {
    let stripped = strip_annotations(text);
    // "fall/winter 2027-28" spans years inside one season phrase.
    if is_season_year_span(&stripped) {
        return None;
    }
    first_success(STRATEGIES, |strategy| {
        let (left, right) = strategy.split(&stripped)?;
        trace!(?strategy, %left, %right, "trying range split");
        join(text, &left, &right, options)
    })
}

/// Resolve both sides and span from the left start to the right end.
fn join(text: &str, left: &str, right: &str, options: &ParseOptions) -> Option<ParseOutcome> {
    let left_outcome = resolve_subexpression(text, left, options)?;
    // Circa on the right widens outward: swap which end gets the larger offset.
    let right_options = if Modifier::Circa.applies(right) {
        options.with_swapped_circa()
    } else {
        *options
    };
    let right_outcome = resolve_subexpression(text, right, &right_options)?;
    let range = DateRange::new(left_outcome.range.start(), right_outcome.range.end())?;
    Some(ParseOutcome::composed(
        HandlerId::Range,
        text,
        *options,
        range,
        &[&left_outcome, &right_outcome],
    ))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn split(strategy: Split, text: &str) -> Option<(String, String)> {
        strategy.split(text)
    }

    fn halves(left: &str, right: &str) -> Option<(String, String)> {
        Some((left.to_string(), right.to_string()))
    }

    // ── Shorthand ───────────────────────────────────────────────────────

    #[test]
    fn test_expand_shorthand_ascending() {
        assert_eq!(expand_shorthand("1835", "8", false), Some(1838));
        assert_eq!(expand_shorthand("1920", "25", false), Some(1925));
        assert_eq!(expand_shorthand("1833", "46", false), Some(1846));
        assert_eq!(expand_shorthand("1999", "02", false), Some(2002));
        assert_eq!(expand_shorthand("1925", "20", false), Some(2020));
    }

    #[test]
    fn test_expand_shorthand_rejects() {
        assert_eq!(expand_shorthand("1920", "20", false), None);
        assert_eq!(expand_shorthand("1920", "1925", false), None);
        assert_eq!(expand_shorthand("1920", "", false), None);
    }

    #[test]
    fn test_expand_shorthand_overflow_is_absent() {
        assert_eq!(expand_shorthand("2147483647", "999", false), None);
        assert_eq!(expand_shorthand("2147483647", "9", false), None);
        assert!(resolve("2147483647-999", &ParseOptions::default()).is_none());
    }

    #[test]
    fn test_season_ranges_split() {
        let outcome = resolve("spring 1850 – summer 1851", &ParseOptions::default()).unwrap();
        assert_eq!(
            outcome.range.to_iso_pair(),
            (
                "1850-03-01T00:00:00.000Z".to_string(),
                "1851-08-31T23:59:59.999Z".to_string()
            )
        );
        assert!(resolve("fall/winter 2027-28", &ParseOptions::default()).is_none());
    }

    #[test]
    fn test_expand_shorthand_descending() {
        assert_eq!(expand_shorthand("1184", "53", true), Some(1153));
        assert_eq!(expand_shorthand("1205", "95", true), Some(1195));
    }

    #[test]
    fn test_year_shorthand_handler() {
        let outcome = resolve_year_shorthand("1835-8", &ParseOptions::default()).unwrap();
        assert_eq!(outcome.handler_chain(), &[HandlerId::Year]);
        assert_eq!(
            outcome.range.to_iso_pair(),
            (
                "1835-01-01T00:00:00.000Z".to_string(),
                "1838-12-31T23:59:59.999Z".to_string()
            )
        );
        assert!(resolve_year_shorthand("1920-20", &ParseOptions::default()).is_none());
        assert!(resolve_year_shorthand("1850-1900", &ParseOptions::default()).is_none());
    }

    // ── Splits ──────────────────────────────────────────────────────────

    #[test]
    fn test_split_words() {
        assert_eq!(split(Split::Words, "1800 to 1850"), halves("1800", "1850"));
        assert_eq!(split(Split::Words, "ca. 1806 or 1811"), halves("ca. 1806", "1811"));
        assert_eq!(split(Split::Words, "1800 to 1850 or 1900"), None);
        assert_eq!(split(Split::Words, "1184 to 1153 bc"), halves("1184 bc", "1153 bc"));
    }

    #[test]
    fn test_split_ordinal_units() {
        assert_eq!(
            split(Split::OrdinalUnits, "18th–19th century"),
            halves("18th century", "19th century")
        );
        assert_eq!(
            split(Split::OrdinalUnits, "18th and 19th century"),
            halves("18th century", "19th century")
        );
        assert_eq!(
            split(Split::OrdinalUnits, "late 16th–mid 17th century"),
            halves("late 16th century", "mid 17th century")
        );
        assert_eq!(
            split(Split::OrdinalUnits, "mid 7th–end of the 6th century bce"),
            halves("mid 7th century bce", "end of the 6th century bce")
        );
        assert_eq!(
            split(Split::OrdinalUnits, "ad 2nd–7th century"),
            halves("ad 2nd century", "ad 7th century")
        );
        assert_eq!(
            split(Split::OrdinalUnits, "3rd century–2nd century bc"),
            halves("3rd century bc", "2nd century bc")
        );
        assert_eq!(
            split(Split::OrdinalUnits, "twelfth to thirteenth century"),
            halves("12th century", "13th century")
        );
    }

    #[test]
    fn test_split_month_names() {
        assert_eq!(
            split(Split::MonthNames, "june–july 1834"),
            halves("june 1834", "july 1834")
        );
    }

    #[test]
    fn test_split_days() {
        assert_eq!(
            split(Split::Days, "april 22–24, 1865"),
            halves("april 22, 1865", "april 24, 1865")
        );
        assert_eq!(
            split(Split::Days, "april 22–may 3, 1865"),
            halves("april 22, 1865", "may 3, 1865")
        );
        assert_eq!(
            split(Split::Days, "22–24 april 1865"),
            halves("april 22, 1865", "april 24, 1865")
        );
    }

    #[test]
    fn test_split_year_list() {
        assert_eq!(split(Split::YearList, "1704, 1708"), halves("1704", "1708"));
        assert_eq!(
            split(Split::YearList, "1712, 1704, 1708"),
            halves("1704", "1712")
        );
        assert_eq!(split(Split::YearList, "september, 1918"), None);
        assert_eq!(split(Split::YearList, "1704"), None);
    }

    #[test]
    fn test_split_slash_guards_month_number() {
        assert_eq!(split(Split::Slash, "1969/1981"), halves("1969", "1981"));
        assert_eq!(split(Split::Slash, "1918/9"), None);
        assert_eq!(split(Split::Slash, "2000/1/1"), None);
    }

    #[test]
    fn test_split_dash_shares_era() {
        assert_eq!(
            split(Split::Dash, "ca. 1184–1153 bc"),
            halves("ca. 1184 bc", "1153 bc")
        );
        assert_eq!(split(Split::Dash, "1850–1900–1950"), None);
    }

    #[test]
    fn test_split_shorthand() {
        assert_eq!(split(Split::Shorthand, "ca. 1833–46"), halves("ca. 1833", "1846"));
        assert_eq!(
            split(Split::Shorthand, "1184–53 bc"),
            halves("1184 bc", "1153 bc")
        );
        assert_eq!(split(Split::Shorthand, "758–68 ce"), halves("758 ce", "768 ce"));
    }

    #[test]
    fn test_split_semicolon() {
        assert_eq!(split(Split::Semicolon, "1575; 1577"), halves("1575", "1577"));
    }
}
