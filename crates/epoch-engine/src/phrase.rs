//! Open-ended phrases: "after X", "before X", "X or later", "X or earlier".
//!
//! The open side extends by `after_offset_years` from the resolved X.

use std::sync::LazyLock;

use chrono::TimeDelta;
use regex::Regex;

use crate::attempt::first_success;
use crate::calendar;
use crate::options::ParseOptions;
use crate::outcome::{DateRange, HandlerId, ParseOutcome};
use crate::resolver::resolve_subexpression;

/// Which side of X the phrase opens onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    After,
    Before,
    OrLater,
    OrEarlier,
}

static PHRASES: LazyLock<Vec<(Regex, Phrase)>> = LazyLock::new(|| {
    [
        (r"^after\s+(?P<inner>.+)$", Phrase::After),
        (r"^before\s+(?P<inner>.+)$", Phrase::Before),
        (r"^(?P<inner>.+?),?\s+(?:or|and)\s+later$", Phrase::OrLater),
        (r"^(?P<inner>.+?),?\s+(?:or|and)\s+earlier$", Phrase::OrEarlier),
    ]
    .into_iter()
    .map(|(pattern, phrase)| {
        let re = Regex::new(pattern).expect("phrase pattern should compile");
        (re, phrase)
    })
    .collect()
});

impl Phrase {
    /// The range this phrase denotes around the resolved inner range.
    pub fn apply(self, inner: DateRange, offset_years: i32) -> Option<DateRange> {
        let millisecond = TimeDelta::milliseconds(1);
        match self {
            Phrase::After => DateRange::new(
                inner.end().checked_add_signed(millisecond)?,
                calendar::add_years(inner.end(), offset_years)?,
            ),
            Phrase::Before => DateRange::new(
                calendar::add_years(inner.start(), offset_years.checked_neg()?)?,
                inner.start().checked_sub_signed(millisecond)?,
            ),
            Phrase::OrLater => {
                DateRange::new(inner.start(), calendar::add_years(inner.end(), offset_years)?)
            }
            Phrase::OrEarlier => DateRange::new(
                calendar::add_years(inner.start(), offset_years.checked_neg()?)?,
                inner.end(),
            ),
        }
    }
}

/// Resolve an open-ended phrase.
pub fn resolve(text: &str, options: &ParseOptions) -> Option<ParseOutcome> {
    first_success(PHRASES.iter(), |(pattern, phrase)| {
        let caps = pattern.captures(text)?;
        let inner = resolve_subexpression(text, &caps["inner"], options)?;
        let range = phrase.apply(inner.range, options.after_offset_years)?;
        Some(ParseOutcome::composed(
            HandlerId::ModifierPhrase,
            text,
            *options,
            range,
            &[&inner],
        ))
    })
}
