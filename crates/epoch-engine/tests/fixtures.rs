//! Literal resolution fixtures.
//!
//! Every expected bound is written in the crate's extended ISO 8601 form so
//! that BCE boundaries (`-000099-...`) are checked exactly.

use chrono::Datelike;
use epoch_engine::{resolve, Convention, DateRange, ParseOptions};

fn defaults() -> ParseOptions {
    ParseOptions::default()
}

fn formal() -> ParseOptions {
    ParseOptions {
        convention: Convention::Formal,
        ..ParseOptions::default()
    }
}

fn iso(text: &str) -> Option<(String, String)> {
    resolve(text, &defaults()).map(|range| range.to_iso_pair())
}

fn pair(start: &str, end: &str) -> Option<(String, String)> {
    Some((start.to_string(), end.to_string()))
}

fn years(text: &str) -> Option<(i32, i32)> {
    resolve(text, &defaults()).map(|range| (range.start().year(), range.end().year()))
}

fn contains(outer: &DateRange, inner: &DateRange) -> bool {
    outer.start() <= inner.start() && inner.end() <= outer.end()
}

// ── Required fixtures ───────────────────────────────────────────────────────

#[test]
fn test_first_century_bc() {
    assert_eq!(
        iso("1st century BC"),
        pair("-000099-01-01T00:00:00.000Z", "0000-12-31T23:59:59.999Z")
    );
}

#[test]
fn test_year_shorthand() {
    assert_eq!(
        iso("1835-8"),
        pair("1835-01-01T00:00:00.000Z", "1838-12-31T23:59:59.999Z")
    );
}

#[test]
fn test_circa_year() {
    assert_eq!(years("ca. 1650"), Some((1647, 1650)));
}

#[test]
fn test_century_range() {
    assert_eq!(
        iso("18th–19th century"),
        pair("1701-01-01T00:00:00.000Z", "1900-12-31T23:59:59.999Z")
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(resolve("", &defaults()), None);
    assert_eq!(resolve(" \t ", &defaults()), None);
}

// ── Phrases ─────────────────────────────────────────────────────────────────

#[test]
fn test_after_year() {
    assert_eq!(
        iso("after 1909"),
        pair("1910-01-01T00:00:00.000Z", "1919-12-31T23:59:59.999Z")
    );
}

#[test]
fn test_before_year() {
    assert_eq!(
        iso("before 1876"),
        pair("1866-01-01T00:00:00.000Z", "1875-12-31T23:59:59.999Z")
    );
}

// ── Ranges ──────────────────────────────────────────────────────────────────

#[test]
fn test_circa_on_both_sides() {
    assert_eq!(
        iso("ca. 1804–ca. 1835"),
        pair("1801-01-01T00:00:00.000Z", "1838-12-31T23:59:59.999Z")
    );
}

#[test]
fn test_bc_range_shares_era() {
    assert_eq!(
        iso("1184–1153 BC"),
        pair("-001183-01-01T00:00:00.000Z", "-001152-12-31T23:59:59.999Z")
    );
    assert_eq!(
        iso("ca. 1184–1153 B.C.").map(|(start, _)| start),
        Some("-001186-01-01T00:00:00.000Z".to_string())
    );
    assert_eq!(iso("1184–53 BC"), iso("1184–1153 BC"));
}

#[test]
fn test_qualified_century_ranges() {
    assert_eq!(years("late 16th–mid-17th century"), Some((1567, 1667)));
    let (start, end) = iso("mid-7th–end of the 6th century BCE").unwrap();
    assert!(start.starts_with("-000666-"));
    assert_eq!(end, "-000500-12-31T23:59:59.999Z");
}

#[test]
fn test_front_era_century_range() {
    assert_eq!(
        iso("A.D. 2nd–7th century"),
        pair("0101-01-01T00:00:00.000Z", "0700-12-31T23:59:59.999Z")
    );
}

#[test]
fn test_month_and_day_ranges() {
    assert_eq!(
        iso("June–July 1834"),
        pair("1834-06-01T00:00:00.000Z", "1834-07-31T23:59:59.999Z")
    );
    assert_eq!(
        iso("April 22–24, 1865"),
        pair("1865-04-22T00:00:00.000Z", "1865-04-24T23:59:59.999Z")
    );
}

#[test]
fn test_lists_and_separators() {
    assert_eq!(years("1704, 1708"), Some((1704, 1708)));
    assert_eq!(years("1712, 1704, 1708"), Some((1704, 1712)));
    assert_eq!(years("1575; 1577"), Some((1575, 1577)));
    assert_eq!(years("1969/1981"), Some((1969, 1981)));
    assert_eq!(years("1806 or 1811"), Some((1806, 1811)));
}

#[test]
fn test_inverted_range_is_absent() {
    assert_eq!(resolve("1900–1850", &defaults()), None);
}

// ── Qualifiers and cleaning ─────────────────────────────────────────────────

#[test]
fn test_bracketed_annotation() {
    assert_eq!(
        iso("[about 1770s]"),
        pair("1770-01-01T00:00:00.000Z", "1779-12-31T23:59:59.999Z")
    );
}

#[test]
fn test_circa_scales_with_granularity() {
    assert_eq!(years("ca. 1850s"), Some((1820, 1859)));
    assert_eq!(years("ca. 19th century"), Some((1771, 1900)));
    assert_eq!(years("c. 1850"), Some((1847, 1850)));
}

#[test]
fn test_seasons() {
    assert_eq!(
        iso("summer 1850"),
        pair("1850-06-01T00:00:00.000Z", "1850-08-31T23:59:59.999Z")
    );
    assert_eq!(
        iso("winter/spring 2026"),
        pair("2025-12-01T00:00:00.000Z", "2026-05-31T23:59:59.999Z")
    );
    assert_eq!(
        iso("fall/winter 2027-28"),
        pair("2027-09-01T00:00:00.000Z", "2028-02-29T23:59:59.999Z")
    );
}

#[test]
fn test_season_with_other_qualifiers() {
    let summer = pair("1850-06-01T00:00:00.000Z", "1850-08-31T23:59:59.999Z");
    assert_eq!(iso("probably summer 1850"), summer);
    assert_eq!(iso("dated summer 1850"), summer);
    assert_eq!(
        iso("ca. summer 1850"),
        pair("1847-06-01T00:00:00.000Z", "1850-08-31T23:59:59.999Z")
    );
}

#[test]
fn test_range_between_seasons() {
    assert_eq!(
        iso("spring 1850 – summer 1851"),
        pair("1850-03-01T00:00:00.000Z", "1851-08-31T23:59:59.999Z")
    );
}

#[test]
fn test_oversized_shorthand_is_absent() {
    assert_eq!(resolve("2147483647-999", &defaults()), None);
}

#[test]
fn test_uncertainty_markers_ignored() {
    assert_eq!(iso("1787 (?)"), iso("1787"));
    assert_eq!(iso("1787?"), iso("1787"));
    assert_eq!(iso("n.d. [ca. 1770]"), iso("ca. 1770"));
}

#[test]
fn test_unsupported_idioms_are_absent() {
    for text in ["undated", "sometime", "month 13 1850", "the day before yesterday"] {
        assert_eq!(resolve(text, &defaults()), None, "{text}");
    }
}

// ── Equivalence classes ─────────────────────────────────────────────────────

#[test]
fn test_year_equivalence_class() {
    let expected = resolve("2000", &defaults());
    assert!(expected.is_some());
    for text in ["2000 AD", "  2000  ", "2000 CE", "AD 2000", "A.D. 2000"] {
        assert_eq!(resolve(text, &defaults()), expected, "{text}");
    }
}

#[test]
fn test_day_equivalence_class() {
    let expected = resolve("Jan 1 2000", &defaults());
    assert!(expected.is_some());
    for text in ["2000/1/1", "January 1, 2000", "1 Jan 2000", "jan 1st 2000"] {
        assert_eq!(resolve(text, &defaults()), expected, "{text}");
    }
}

#[test]
fn test_century_equivalence_class() {
    let expected = resolve("12th century", &defaults());
    assert!(expected.is_some());
    for text in ["twelfth century", "12th cent.", "12th Century"] {
        assert_eq!(resolve(text, &defaults()), expected, "{text}");
    }
}

// ── Consistency across granularities ────────────────────────────────────────

#[test]
fn test_year_and_century_boundaries_agree() {
    let first_year = resolve("2001", &defaults()).unwrap();
    let century = resolve("21st century", &formal()).unwrap();
    assert_eq!(first_year.start(), century.start());

    let last_year = resolve("2000", &defaults()).unwrap();
    let century = resolve("20th century", &formal()).unwrap();
    assert_eq!(last_year.end(), century.end());
}

#[test]
fn test_granularities_nest() {
    let chain = [
        "2nd millennium",
        "19th century",
        "1850s",
        "1850",
        "june 1850",
        "june 5, 1850",
    ];
    let ranges: Vec<DateRange> = chain
        .iter()
        .map(|text| resolve(text, &formal()).unwrap())
        .collect();
    for window in ranges.windows(2) {
        assert!(contains(&window[0], &window[1]), "{window:?}");
    }
}

#[test]
fn test_popular_convention() {
    let options = ParseOptions {
        convention: Convention::Popular,
        ..ParseOptions::default()
    };
    let range = resolve("20th century", &options).unwrap();
    assert_eq!(
        range.to_iso_pair(),
        (
            "1900-01-01T00:00:00.000Z".to_string(),
            "1999-12-31T23:59:59.999Z".to_string()
        )
    );
}
