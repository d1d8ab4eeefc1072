//! Qualifier rules that wrap every granularity grammar.
//!
//! A [`Modifier`] recognises a qualifier phrase ("ca.", "early", "first half
//! of the", "rabbit year"...), strips it so the underlying grammar can match,
//! and afterwards reshapes the resolved range.
//!
//! [`ModifierStack`] runs the catalog in two passes:
//!
//! 1. **Extraction** walks [`CATALOG`] in order over progressively stripped
//!    working text, each rule removing its own phrase.
//! 2. **Transformation** walks the same order again, but decides which rules
//!    apply by testing the untouched original text.

use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;

use crate::calendar;
use crate::clean::collapse_whitespace;
use crate::options::ParseOptions;
use crate::outcome::DateRange;

/// Every modifier, in registration order.
pub const CATALOG: [Modifier; 12] = [
    Modifier::Dating,
    Modifier::Zodiac,
    Modifier::Printed,
    Modifier::AfterOriginal,
    Modifier::Parenthetical,
    Modifier::Islamic,
    Modifier::Season,
    Modifier::Half,
    Modifier::Quarter,
    Modifier::MiddleHalf,
    Modifier::Third,
    Modifier::Circa,
];

/// A qualifier rule: predicate, extractor and transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// "dated", "datable to the", "probably", "cast", trailing ", probably"...
    Dating,
    /// "ox year", "year of the snake"
    Zodiac,
    /// ", printed 1850"
    Printed,
    /// ", after 1610–11 original"
    AfterOriginal,
    /// A trailing "(...)" or "[...]" note.
    Parenthetical,
    /// An Anno Hegirae cross reference alongside the common era date.
    Islamic,
    /// "summer", "fall/winter", "spring of"
    Season,
    /// "first half of the", "second half", "end of the"
    Half,
    /// "third quarter of the"
    Quarter,
    /// "middle half of", "middle of the"
    MiddleHalf,
    /// "early", "mid", "late" and their compounds.
    Third,
    /// "ca.", "c.", "circa"
    Circa,
}

/// What a transformer needs beyond the range itself.
#[derive(Debug, Clone, Copy)]
pub struct ModifierContext {
    pub options: ParseOptions,
    /// Multiplier applied to the circa offsets for the wrapped granularity.
    pub circa_scale: i32,
}

// ── Patterns ────────────────────────────────────────────────────────────────

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("modifier pattern should compile")
}

fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Vec<Regex> {
    patterns.iter().map(|p| compile(p.as_ref())).collect()
}

static DATING: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"^dated\s+to\s+(?:the\s+)?",
        r"^datable\s+to\s+(?:the\s+)?",
        r"^dated,?\s+",
        r"^d\s+a\s+t\s+e\s+d\s+",
        r"^probably\s+",
        r"^possibly\s+",
        r"^likely\s+",
        r"^about\s+",
        r"^cast\s+",
        r"^patented\s+",
        r"^(?:originally\s+)?published\s+(?:in\s+)?",
        r"^the\s+",
        r"(?:,\s*|\s+)(?:probably|check)$",
    ])
});

const ANIMALS: &str = "rat|ox|tiger|rabbit|hare|dragon|snake|horse|goat|sheep|ram|monkey|rooster|cock|dog|boar|pig";

static ZODIAC: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        format!(r"\s+(?:{ANIMALS})\s+year\b"),
        format!(r"^year\s+of\s+the\s+(?:{ANIMALS})\s+"),
        format!(r",\s*year\s+of\s+the\s+(?:{ANIMALS})$"),
    ])
});

static PRINTED: LazyLock<Regex> = LazyLock::new(|| compile(r",\s*printed\b.*$"));

static AFTER_ORIGINAL: LazyLock<Regex> =
    LazyLock::new(|| compile(r",\s*after\s+.+\s+original$"));

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\s+[\(\[][^\(\)\[\]]*[\)\]]$"));

static AH_THEN_CE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?:\w+:?\s+)?a\.h\.\s+[?0-9–\-\sor]+\s*/"));
static CE_THEN_AH_PARENS: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"[0-9–\-\sor()?]+\s+ce\s*\([^)]*\)?\s*/[0-9–\-\sor()?]*\s+a\.h\.")
});
static CE_THEN_AH: LazyLock<Regex> =
    LazyLock::new(|| compile(r"[0-9–\-\sor()?]+\s+ce\s*/[0-9–\-\sor()?]*\s+a\.h\."));
static CE_THEN_AH_LOOSE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"[0-9–\-\sor()?]+\s+ce.*/.*a\.h\."));
static AH_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?:\w+:?\s+)?a\.h\.\s+[?0-9–\-\sor]+\s*/\s*"));
static AH_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\s*/[0-9–\-\sor()?]*\s+a\.h\..*$"));

const SEASONS: &str = "spring|summer|fall|autumn|winter";

static SEASON_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"\b({SEASONS})(?:\s*(?:/|&|\band\b|-|–)\s*({SEASONS}))?(?:\s+of)?\s+"
    ))
});

static SEASON_YEAR_SPAN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(\d{4})\s*[-–]\s*(\d{2,4})$"));

static BARE_YEAR_SPAN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(\d{4})\s*[-–]\s*\d{2,4}$"));

static FIRST_HALF: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:first|1st)\s+half\b(?:\s+of)?(?:\s+the)?\s*"));

static SECOND_HALF: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(?:second|2nd|last|latter)\s+half\b(?:\s+of)?(?:\s+the)?\s*|\bend\s+of(?:\s+the)?\s+")
});

static QUARTER: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(first|1st|second|2nd|third|3rd|fourth|4th|last)\s+quarter\b(?:\s+of)?(?:\s+the)?\s*")
});

static MIDDLE_HALF: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\bmiddle\s+half\b(?:\s+of)?(?:\s+the)?\s*|\bmiddle\s+of(?:\s+the)?\s+")
});

/// Thirds patterns, most specific first, with the thirds each one keeps.
static THIRDS: LazyLock<Vec<(Regex, u32, u32)>> = LazyLock::new(|| {
    [
        (r"\bearly[-\s]+(?:to|or)[-\s]+mid\b", 0, 1),
        (r"\bearly[-\s]+(?:to|or)[-\s]+late\b", 0, 2),
        (r"\bmid[-\s]+(?:to|or)[-\s]+late\b", 1, 2),
        (r"\bearly[-\s]+mid\b", 0, 1),
        (r"\bmid[-\s]+late\b", 1, 2),
        (r"\bearly\b", 0, 0),
        (r"\bmid\b", 1, 1),
        (r"\blate\b", 2, 2),
    ]
    .into_iter()
    .map(|(pattern, first, last)| (compile(pattern), first, last))
    .collect()
});

static CIRCA: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?:^|\s)(?:circa\b|ca\b\.?|c\.)\s*"));

// ── Rules ───────────────────────────────────────────────────────────────────

impl Modifier {
    /// Whether this rule's phrase occurs in `text`.
    pub fn applies(self, text: &str) -> bool {
        match self {
            Modifier::Dating => DATING.iter().any(|re| re.is_match(text)),
            Modifier::Zodiac => ZODIAC.iter().any(|re| re.is_match(text)),
            Modifier::Printed => PRINTED.is_match(text),
            Modifier::AfterOriginal => AFTER_ORIGINAL.is_match(text),
            Modifier::Parenthetical => PARENTHETICAL.is_match(text),
            Modifier::Islamic => {
                AH_THEN_CE.is_match(text)
                    || CE_THEN_AH_PARENS.is_match(text)
                    || CE_THEN_AH.is_match(text)
            }
            Modifier::Season => SEASON_PHRASE.is_match(text),
            Modifier::Half => FIRST_HALF.is_match(text) || SECOND_HALF.is_match(text),
            Modifier::Quarter => QUARTER.is_match(text),
            Modifier::MiddleHalf => MIDDLE_HALF.is_match(text),
            Modifier::Third => THIRDS.iter().any(|(re, _, _)| re.is_match(text)),
            Modifier::Circa => CIRCA.is_match(text),
        }
    }

    /// Remove this rule's phrase from `text`.
    pub fn extract(self, text: &str) -> String {
        let stripped = match self {
            Modifier::Dating => remove_first_of(DATING.iter(), text),
            Modifier::Zodiac => remove_first_of(ZODIAC.iter(), text),
            Modifier::Printed => PRINTED.replace(text, "").into_owned(),
            Modifier::AfterOriginal => AFTER_ORIGINAL.replace(text, "").into_owned(),
            Modifier::Parenthetical => PARENTHETICAL.replace(text, "").into_owned(),
            Modifier::Islamic => {
                if AH_THEN_CE.is_match(text) {
                    AH_PREFIX.replace(text, "").into_owned()
                } else if CE_THEN_AH_LOOSE.is_match(text) {
                    AH_SUFFIX.replace(text, "").into_owned()
                } else {
                    text.to_string()
                }
            }
            Modifier::Season => {
                let rest = SEASON_PHRASE.replace(text, "");
                let first_year = BARE_YEAR_SPAN.captures(&rest).map(|caps| caps[1].to_string());
                first_year.unwrap_or_else(|| rest.into_owned())
            }
            Modifier::Half => {
                if FIRST_HALF.is_match(text) {
                    FIRST_HALF.replace(text, "").into_owned()
                } else {
                    SECOND_HALF.replace(text, "").into_owned()
                }
            }
            Modifier::Quarter => QUARTER.replace(text, "").into_owned(),
            Modifier::MiddleHalf => MIDDLE_HALF.replace(text, "").into_owned(),
            Modifier::Third => remove_first_of(THIRDS.iter().map(|(re, _, _)| re), text),
            Modifier::Circa => CIRCA.replace(text, " ").into_owned(),
        };
        collapse_whitespace(&stripped)
    }

    /// Reshape a resolved range. `original` is the text before extraction.
    pub fn transform(
        self,
        range: DateRange,
        original: &str,
        context: &ModifierContext,
    ) -> Option<DateRange> {
        match self {
            Modifier::Dating
            | Modifier::Zodiac
            | Modifier::Printed
            | Modifier::AfterOriginal
            | Modifier::Parenthetical
            | Modifier::Islamic => Some(range),
            Modifier::Season => season_range(range, original),
            Modifier::Half => {
                if FIRST_HALF.is_match(original) {
                    range.portion(0, 0, 2)
                } else {
                    range.portion(1, 1, 2)
                }
            }
            Modifier::Quarter => {
                let caps = QUARTER.captures(original)?;
                let index = match &caps[1] {
                    "first" | "1st" => 0,
                    "second" | "2nd" => 1,
                    "third" | "3rd" => 2,
                    _ => 3,
                };
                range.portion(index, index, 4)
            }
            Modifier::MiddleHalf => range.portion(1, 2, 4),
            Modifier::Third => {
                let (_, first, last) = THIRDS.iter().find(|(re, _, _)| re.is_match(original))?;
                range.portion(*first, *last, 3)
            }
            Modifier::Circa => range.widen(
                context
                    .options
                    .circa_start_offset_years
                    .checked_mul(context.circa_scale)?,
                context
                    .options
                    .circa_end_offset_years
                    .checked_mul(context.circa_scale)?,
            ),
        }
    }

    /// Annotation rules strip text and leave the range untouched.
    pub fn is_annotation(self) -> bool {
        matches!(
            self,
            Modifier::Dating
                | Modifier::Zodiac
                | Modifier::Printed
                | Modifier::AfterOriginal
                | Modifier::Parenthetical
                | Modifier::Islamic
        )
    }
}

fn remove_first_of<'r, I>(patterns: I, text: &str) -> String
where
    I: IntoIterator<Item = &'r Regex>,
{
    patterns
        .into_iter()
        .find(|re| re.is_match(text))
        .map_or_else(|| text.to_string(), |re| re.replace(text, "").into_owned())
}

fn season_months(season: &str) -> (u32, u32) {
    match season {
        "spring" => (3, 5),
        "summer" => (6, 8),
        "fall" | "autumn" => (9, 11),
        _ => (12, 2),
    }
}

/// Replace a year range with the months of the named season(s).
///
/// Winter runs December to February: a trailing winter ends in the following
/// year and a leading winter paired with a later season starts in the
/// previous one. An explicit "2027-28" fixes the end year.
fn season_range(range: DateRange, original: &str) -> Option<DateRange> {
    let caps = SEASON_PHRASE.captures(original)?;
    let first = caps.get(1)?.as_str();
    let last = caps.get(2).map_or(first, |m| m.as_str());
    let (start_month, _) = season_months(first);
    let (_, end_month) = season_months(last);

    let mut start_year = range.start().year();
    if first == "winter" && last != "winter" {
        start_year -= 1;
    }

    let end_year = match SEASON_YEAR_SPAN.captures(original) {
        Some(span) => {
            let digits = &span[2];
            let value: i32 = digits.parse().ok()?;
            if digits.len() == 2 {
                range.start().year().div_euclid(100) * 100 + value
            } else {
                value
            }
        }
        None if last == "winter" => range.start().year() + 1,
        None => range.end().year(),
    };

    DateRange::new(
        calendar::start_of_month(start_year, start_month)?,
        calendar::end_of_month(end_year, end_month)?,
    )
}

// ── ModifierStack ───────────────────────────────────────────────────────────

/// The two passes of the catalog over one input.
#[derive(Debug, Clone)]
pub struct ModifierStack<'a> {
    original: &'a str,
    core: String,
}

impl<'a> ModifierStack<'a> {
    /// Run the extraction pass over `original`.
    pub fn extract(original: &'a str) -> Self {
        let core = CATALOG.iter().fold(original.to_string(), |working, rule| {
            if rule.applies(&working) {
                rule.extract(&working)
            } else {
                working
            }
        });
        Self { original, core }
    }

    /// The fully stripped text.
    pub fn core(&self) -> &str {
        &self.core
    }

    /// Run the transformation pass over a range resolved from [`Self::core`].
    pub fn transform(&self, base: DateRange, context: &ModifierContext) -> Option<DateRange> {
        CATALOG
            .iter()
            .filter(|rule| rule.applies(self.original))
            .try_fold(base, |range, rule| rule.transform(range, self.original, context))
    }
}

/// A leading season phrase whose only other content is an explicit year
/// span ("fall/winter 2027-28").
pub fn is_season_year_span(text: &str) -> bool {
    SEASON_PHRASE
        .find(text)
        .is_some_and(|phrase| phrase.start() == 0 && BARE_YEAR_SPAN.is_match(&text[phrase.end()..]))
}

/// Strip annotation-only phrases, which never change the resolved range.
pub fn strip_annotations(text: &str) -> String {
    CATALOG
        .iter()
        .filter(|rule| rule.is_annotation())
        .fold(text.to_string(), |working, rule| {
            if rule.applies(&working) {
                rule.extract(&working)
            } else {
                working
            }
        })
}

// ── Tests ───────────────────────────────────────────────────────────────────
