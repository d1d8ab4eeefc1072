//! Single-granularity grammars: day, month, year, decade, century, millennium.
//!
//! Each grammar runs on the core text left by the [`ModifierStack`]
//! extraction pass; the resolved range then goes through the stack's
//! transformation pass.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::calendar::{self, Era, Span};
use crate::clean::ordinal_words_to_numbers;
use crate::modifier::{ModifierContext, ModifierStack};
use crate::options::ParseOptions;
use crate::outcome::{DateRange, HandlerId, ParseOutcome};

/// Era tokens, bare or punctuated.
const ERA: &str = r"(?:b\.?\s?c\.?(?:\s?e\.?)?|a\.?\s?d\.?|c\.?\s?e\.?)";

const MONTH: &str = r"(?:january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\.?";

const ORDINAL_SUFFIX: &str = r"(?:st|nd|rd|th)";

fn compile(pattern: String) -> Regex {
    Regex::new(&pattern).expect("granularity pattern should compile")
}

// ── Grammars ────────────────────────────────────────────────────────────────

static YEAR_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        compile(format!(r"^(?P<year>\d+)\s*(?P<era>{ERA})?$")),
        compile(format!(r"^(?P<era>{ERA})\s*(?P<year>\d+)$")),
    ]
});

static MONTH_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        compile(format!(
            r"^(?P<month>{MONTH}),?\s*(?P<year>\d+)\s*(?P<era>{ERA})?$"
        )),
        compile(format!(r"^(?P<year>\d+)/(?P<month>\d{{1,2}})\s*(?P<era>{ERA})?$")),
        compile(format!(
            r"^(?P<month>\d{{1,2}}){ORDINAL_SUFFIX}\s+month,?\s*(?P<year>\d+)\s*(?P<era>{ERA})?$"
        )),
        compile(format!(
            r"^(?P<year>\d+),?\s+(?P<month>\d{{1,2}}){ORDINAL_SUFFIX}\s+month$"
        )),
    ]
});

static DAY_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        compile(format!(
            r"^(?P<month>{MONTH}),?\s*(?P<day>\d{{1,2}}){ORDINAL_SUFFIX}?(?:,\s*|\s+)(?P<year>\d+)\s*(?P<era>{ERA})?$"
        )),
        compile(format!(
            r"^(?P<day>\d{{1,2}}){ORDINAL_SUFFIX}?\s+(?P<month>{MONTH}),?\s+(?P<year>\d+)\s*(?P<era>{ERA})?$"
        )),
        compile(format!(
            r"^(?P<year>\d+)/(?P<month>\d{{1,2}})/(?P<day>\d{{1,2}})\s*(?P<era>{ERA})?$"
        )),
    ]
});

static DECADE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(format!(r"^(?P<number>\d+)['’]?s\s*(?P<era>{ERA})?$")));

static CENTURY_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    let unit = r"(?:centur(?:y|ies)|cent?\.?)";
    [
        compile(format!(
            r"^(?P<number>\d+){ORDINAL_SUFFIX}?\s*{unit}\s*(?P<era>{ERA})?$"
        )),
        compile(format!(
            r"^(?P<era>{ERA})\s+(?P<number>\d+){ORDINAL_SUFFIX}?\s*{unit}$"
        )),
    ]
});

static MILLENNIUM_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    let unit = r"(?:millenn?i(?:um|a)|mill\.?)";
    [
        compile(format!(
            r"^(?P<number>\d+){ORDINAL_SUFFIX}?\s*{unit}\s*(?P<era>{ERA})?$"
        )),
        compile(format!(
            r"^(?P<era>{ERA})\s+(?P<number>\d+){ORDINAL_SUFFIX}?\s*{unit}$"
        )),
    ]
});

// ── Granularity ─────────────────────────────────────────────────────────────

/// One family of literal date patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Month,
    Day,
    Year,
    Decade,
    Century,
    Millennium,
}

impl Granularity {
    pub fn handler_id(self) -> HandlerId {
        match self {
            Granularity::Month => HandlerId::Month,
            Granularity::Day => HandlerId::Day,
            Granularity::Year => HandlerId::Year,
            Granularity::Decade => HandlerId::Decade,
            Granularity::Century => HandlerId::Century,
            Granularity::Millennium => HandlerId::Millennium,
        }
    }

    /// Multiplier for circa offsets at this granularity.
    pub fn circa_scale(self) -> i32 {
        match self {
            Granularity::Day | Granularity::Month | Granularity::Year => 1,
            Granularity::Decade | Granularity::Century => 10,
            Granularity::Millennium => 100,
        }
    }

    /// Match `text` against this grammar, with qualifiers handled by the
    /// [`ModifierStack`].
    ///
    /// # Examples
    ///
    /// ```
    /// use epoch_engine::granularity::Granularity;
    /// use epoch_engine::{HandlerId, ParseOptions};
    ///
    /// let outcome = Granularity::Year.resolve("ca. 1650", &ParseOptions::default()).unwrap();
    /// assert_eq!(outcome.handler_chain(), &[HandlerId::Year]);
    /// assert_eq!(outcome.range.to_iso_pair().0, "1647-01-01T00:00:00.000Z");
    /// ```
    pub fn resolve(self, text: &str, options: &ParseOptions) -> Option<ParseOutcome> {
        let stack = ModifierStack::extract(text);
        let base = self.parse_core(stack.core(), options)?;
        let context = ModifierContext {
            options: *options,
            circa_scale: self.circa_scale(),
        };
        let range = stack.transform(base, &context)?;
        Some(ParseOutcome::leaf(self.handler_id(), text, *options, range))
    }

    /// Match unqualified text against this grammar.
    pub fn parse_core(self, core: &str, options: &ParseOptions) -> Option<DateRange> {
        match self {
            Granularity::Month => parse_month(&ordinal_words_to_numbers(core), options),
            Granularity::Day => parse_day(core, options),
            Granularity::Year => parse_year(core, options),
            Granularity::Decade => parse_decade(core, options),
            Granularity::Century => parse_ordinal_span(
                CENTURY_PATTERNS.as_slice(),
                Span::Century,
                &ordinal_words_to_numbers(core),
                options,
            ),
            Granularity::Millennium => parse_ordinal_span(
                MILLENNIUM_PATTERNS.as_slice(),
                Span::Millennium,
                &ordinal_words_to_numbers(core),
                options,
            ),
        }
    }
}

// ── Parsers ─────────────────────────────────────────────────────────────────

fn parse_year(text: &str, options: &ParseOptions) -> Option<DateRange> {
    let caps = first_captures(YEAR_PATTERNS.iter(), text)?;
    let year = year_from(&caps, options)?;
    DateRange::from_years(year, year)
}

fn parse_month(text: &str, options: &ParseOptions) -> Option<DateRange> {
    let caps = first_captures(MONTH_PATTERNS.iter(), text)?;
    let year = year_from(&caps, options)?;
    let month = month_from(&caps["month"])?;
    DateRange::new(
        calendar::start_of_month(year, month)?,
        calendar::end_of_month(year, month)?,
    )
}

fn parse_day(text: &str, options: &ParseOptions) -> Option<DateRange> {
    let caps = first_captures(DAY_PATTERNS.iter(), text)?;
    let year = year_from(&caps, options)?;
    let month = month_from(&caps["month"])?;
    let day: u32 = caps["day"].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    DateRange::new(calendar::start_of_day(date)?, calendar::end_of_day(date)?)
}

fn parse_decade(text: &str, options: &ParseOptions) -> Option<DateRange> {
    let caps = DECADE_PATTERN.captures(text)?;
    let number: i32 = caps["number"].parse().ok()?;
    if number % 10 != 0 {
        return None;
    }
    let ordinal = calendar::signed_ordinal(number / 10 + 1, era_from(&caps)?);
    let (first, last) = calendar::span_years(Span::Decade, ordinal, options.convention)?;
    DateRange::from_years(first, last)
}

fn parse_ordinal_span(
    patterns: &[Regex],
    span: Span,
    text: &str,
    options: &ParseOptions,
) -> Option<DateRange> {
    let caps = first_captures(patterns.iter(), text)?;
    let number: i32 = caps["number"].parse().ok()?;
    let ordinal = calendar::signed_ordinal(number, era_from(&caps)?);
    let (first, last) = calendar::span_years(span, ordinal, options.convention)?;
    DateRange::from_years(first, last)
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn first_captures<'r, 't, I>(patterns: I, text: &'t str) -> Option<Captures<'t>>
where
    I: IntoIterator<Item = &'r Regex>,
{
    patterns.into_iter().find_map(|re| re.captures(text))
}

/// The era captured by a grammar: `Some(None)` when there is no era token,
/// `None` when the token is not a recognised era.
fn era_from(caps: &Captures) -> Option<Option<Era>> {
    match caps.name("era") {
        Some(token) => Era::parse(token.as_str()).map(Some),
        None => Some(None),
    }
}

/// Astronomical year from the `year` and `era` captures.
///
/// A bare two-digit year is read relative to the century breakpoint when
/// century shorthand is enabled.
fn year_from(caps: &Captures, options: &ParseOptions) -> Option<i32> {
    let digits = caps.name("year")?.as_str();
    let magnitude: i32 = digits.parse().ok()?;
    let era = era_from(caps)?;
    if era.is_none() && options.century_shorthand && digits.len() == 2 {
        let century = if magnitude.unsigned_abs() <= options.century_breakpoint {
            2000
        } else {
            1900
        };
        return Some(century + magnitude);
    }
    if era == Some(Era::Bce) && magnitude == 0 {
        return None;
    }
    Some(calendar::astronomical_year(magnitude, era))
}

/// Month number from a name, abbreviation or 1–12 numeral.
pub(crate) fn month_from(token: &str) -> Option<u32> {
    if let Ok(number) = token.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }
    let name = token.trim_end_matches('.');
    let number = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}

// ── Tests ───────────────────────────────────────────────────────────────────
