//! Calendar boundary math.
//!
//! All instants are UTC on the proleptic Gregorian calendar with astronomical
//! year numbering: year 0 is 1 BCE, year -1 is 2 BCE.
//!
//! # Functions
//!
//! - Primitives: [`start_of_day`], [`end_of_day`], [`start_of_month`],
//!   [`end_of_month`], [`start_of_year`], [`end_of_year`], [`add_years`]
//! - Era rule: [`Era`], [`astronomical_year`]
//! - Spans: [`span_years`] maps a decade/century/millennium ordinal to its
//!   first and last calendar year under a [`Convention`]
//! - [`format_instant`] renders the extended ISO 8601 form used in fixtures

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};

use crate::options::Convention;

/// A point in time, millisecond precision, astronomical year numbering.
pub type TimeInstant = DateTime<Utc>;

// ── Primitives ──────────────────────────────────────────────────────────────

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> Option<TimeInstant> {
    let naive = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&naive))
}

/// The last millisecond of `date`.
pub fn end_of_day(date: NaiveDate) -> Option<TimeInstant> {
    let naive = date.and_hms_milli_opt(23, 59, 59, 999)?;
    Some(Utc.from_utc_datetime(&naive))
}

pub fn start_of_month(year: i32, month: u32) -> Option<TimeInstant> {
    start_of_day(NaiveDate::from_ymd_opt(year, month, 1)?)
}

pub fn end_of_month(year: i32, month: u32) -> Option<TimeInstant> {
    end_of_day(last_day_of_month(year, month)?)
}

pub fn start_of_year(year: i32) -> Option<TimeInstant> {
    start_of_month(year, 1)
}

pub fn end_of_year(year: i32) -> Option<TimeInstant> {
    end_of_month(year, 12)
}

/// Shift an instant by whole calendar years (negative shifts backwards).
///
/// February 29 clamps to February 28 in non-leap target years.
pub fn add_years(instant: TimeInstant, years: i32) -> Option<TimeInstant> {
    let months = Months::new(years.unsigned_abs().checked_mul(12)?);
    if years >= 0 {
        instant.checked_add_months(months)
    } else {
        instant.checked_sub_months(months)
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

// ── Era ─────────────────────────────────────────────────────────────────────

/// A historical era marker attached to a year or ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
    /// BC / BCE and punctuated variants.
    Bce,
    /// AD / CE and punctuated variants.
    Ce,
}

impl Era {
    /// Parse an era token, ignoring dots and spaces (`"b.c."`, `"B. C. E."`, `"ad"`).
    pub fn parse(token: &str) -> Option<Era> {
        let letters: String = token
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match letters.as_str() {
            "bc" | "bce" => Some(Era::Bce),
            "ad" | "ce" => Some(Era::Ce),
            _ => None,
        }
    }
}

/// Convert an era year to astronomical numbering: `N BC` is year `-(N - 1)`.
pub fn astronomical_year(magnitude: i32, era: Option<Era>) -> i32 {
    match era {
        Some(Era::Bce) => 1 - magnitude,
        _ => magnitude,
    }
}

/// Sign an ordinal (century, millennium, decade) by era: the 1st century BC is `-1`.
pub fn signed_ordinal(ordinal: i32, era: Option<Era>) -> i32 {
    match era {
        Some(Era::Bce) => -ordinal,
        _ => ordinal,
    }
}

// ── Spans ───────────────────────────────────────────────────────────────────

/// A multi-year calendar span addressed by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    Decade,
    Century,
    Millennium,
}

const MS_PER_JULIAN_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0 * 1000.0;

impl Span {
    /// Length of the span in years.
    pub fn years(self) -> i32 {
        match self {
            Span::Decade => 10,
            Span::Century => 100,
            Span::Millennium => 1000,
        }
    }

    /// A reference instant (epoch ms) inside the span with the given ordinal.
    fn reference(self) -> (f64, i32) {
        match self {
            // 1975, inside the 198th decade
            Span::Decade => (157_770_000_000.0, 198),
            // 1950, inside the 20th century
            Span::Century => (-631_152_000_000.0, 20),
            // 1500, inside the 2nd millennium
            Span::Millennium => (-14_831_769_600_000.0, 2),
        }
    }
}

/// Map a signed ordinal to an instant that lands somewhere inside that span.
///
/// The arithmetic uses Julian-length years and is not calendar exact; only
/// the year of the result is meaningful. Ordinal 0 does not exist.
pub fn approximate_instant(span: Span, ordinal: i32) -> Option<TimeInstant> {
    if ordinal == 0 {
        return None;
    }
    let adjusted = if ordinal < 0 { ordinal + 1 } else { ordinal };
    let (reference_ms, reference_ordinal) = span.reference();
    let offset = (f64::from(adjusted) - f64::from(reference_ordinal)) * f64::from(span.years());
    let ms = reference_ms + offset * MS_PER_JULIAN_YEAR;
    if !ms.is_finite() || ms.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(ms.round() as i64)
}

/// First calendar year of the span containing `year`.
pub fn span_start_year(span: Span, year: i32, convention: Convention) -> i32 {
    match span {
        Span::Decade => {
            let decade = year.div_euclid(10) * 10;
            match decade {
                0 => 1,
                d if d > 0 => d,
                d => d + 2,
            }
        }
        Span::Century | Span::Millennium => {
            let base = year.div_euclid(span.years()) * span.years();
            match convention {
                Convention::Popular => base,
                Convention::Formal => base + 1,
            }
        }
    }
}

/// Last calendar year of the span containing `year`.
pub fn span_end_year(span: Span, year: i32, convention: Convention) -> i32 {
    match span {
        Span::Decade => {
            let decade = year.div_euclid(10) * 10;
            match decade {
                d if d >= 0 => d + 9,
                -10 => 0,
                d => d + 11,
            }
        }
        Span::Century | Span::Millennium => {
            let base = year.div_euclid(span.years()) * span.years();
            match convention {
                Convention::Popular => base + span.years() - 1,
                Convention::Formal => base + span.years(),
            }
        }
    }
}

/// First and last calendar year of the span with the given signed ordinal.
///
/// The ordinal is first mapped to an approximate instant; the exact bounds
/// are then recomputed from that instant's year alone.
///
/// # Examples
///
/// ```
/// use epoch_engine::calendar::{span_years, Span};
/// use epoch_engine::Convention;
///
/// assert_eq!(span_years(Span::Century, 20, Convention::Formal), Some((1901, 2000)));
/// assert_eq!(span_years(Span::Century, 20, Convention::Popular), Some((1900, 1999)));
/// assert_eq!(span_years(Span::Century, -1, Convention::Formal), Some((-99, 0)));
/// ```
pub fn span_years(span: Span, ordinal: i32, convention: Convention) -> Option<(i32, i32)> {
    let year = approximate_instant(span, ordinal)?.year();
    Some((
        span_start_year(span, year, convention),
        span_end_year(span, year, convention),
    ))
}

// ── Formatting ──────────────────────────────────────────────────────────────

/// Render an instant as `YYYY-MM-DDTHH:MM:SS.sssZ`, switching to the signed
/// six-digit extended year form outside `0..=9999`.
pub fn format_instant(instant: &TimeInstant) -> String {
    let year = instant.year();
    let rest = instant.format("-%m-%dT%H:%M:%S%.3fZ");
    if (0..=9999).contains(&year) {
        format!("{year:04}{rest}")
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        format!("{sign}{:06}{rest}", year.unsigned_abs())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
