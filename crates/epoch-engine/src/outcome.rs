//! Resolved ranges and their provenance.
//!
//! Every handler returns a [`ParseOutcome`]: the [`DateRange`] it produced
//! together with the [`ParseMetadata`] describing how it was derived.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, TimeInstant};
use crate::options::ParseOptions;

// ── DateRange ───────────────────────────────────────────────────────────────

/// An inclusive `[start, end]` pair of instants with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: TimeInstant,
    end: TimeInstant,
}

impl DateRange {
    /// Build a range, or `None` if `start > end`.
    pub fn new(start: TimeInstant, end: TimeInstant) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// From the first instant of `first_year` to the last instant of `last_year`.
    pub fn from_years(first_year: i32, last_year: i32) -> Option<Self> {
        Self::new(
            calendar::start_of_year(first_year)?,
            calendar::end_of_year(last_year)?,
        )
    }

    pub fn start(&self) -> TimeInstant {
        self.start
    }

    pub fn end(&self) -> TimeInstant {
        self.end
    }

    /// Divide the range into `parts` equal pieces and return pieces
    /// `first..=last` joined together.
    ///
    /// Pieces are contiguous at millisecond precision: piece `i` ends one
    /// millisecond before piece `i + 1` starts, and the last piece ends
    /// exactly at `self.end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use epoch_engine::DateRange;
    ///
    /// let century = DateRange::from_years(1901, 2000).unwrap();
    /// let first_half = century.portion(0, 0, 2).unwrap();
    /// assert_eq!(first_half.start(), century.start());
    /// let second_half = century.portion(1, 1, 2).unwrap();
    /// assert_eq!(second_half.end(), century.end());
    /// ```
    pub fn portion(&self, first: u32, last: u32, parts: u32) -> Option<DateRange> {
        if parts == 0 || first > last || last >= parts {
            return None;
        }
        let span_ms = (self.end - self.start).num_milliseconds() + 1;
        let boundary = |index: u32| {
            let offset = span_ms.checked_mul(i64::from(index))? / i64::from(parts);
            self.start
                .checked_add_signed(TimeDelta::try_milliseconds(offset)?)
        };
        let end = boundary(last + 1)?.checked_sub_signed(TimeDelta::milliseconds(1))?;
        DateRange::new(boundary(first)?, end)
    }

    /// Move the start back by `before` years and the end forward by `after` years.
    pub fn widen(&self, before: i32, after: i32) -> Option<DateRange> {
        DateRange::new(
            calendar::add_years(self.start, before.checked_neg()?)?,
            calendar::add_years(self.end, after)?,
        )
    }

    /// Both bounds in extended ISO 8601 form.
    pub fn to_iso_pair(&self) -> (String, String) {
        (
            calendar::format_instant(&self.start),
            calendar::format_instant(&self.end),
        )
    }
}

// ── Provenance ──────────────────────────────────────────────────────────────

/// Which handler produced or contributed to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandlerId {
    Year,
    Month,
    Day,
    Decade,
    Century,
    Millennium,
    Range,
    Partial,
    ModifierPhrase,
}

/// How a range was derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseMetadata {
    /// Contributing handlers, outermost first.
    pub handler_chain: Vec<HandlerId>,
    /// The outermost input text.
    pub original: String,
    /// Other top-level parses that also succeeded (verbose resolution only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<ParseOutcome>,
    pub options: ParseOptions,
}

impl ParseMetadata {
    /// Metadata with a one-element chain.
    pub fn new(handler: HandlerId, original: &str, options: ParseOptions) -> Self {
        Self {
            handler_chain: vec![handler],
            original: original.to_string(),
            alternates: Vec::new(),
            options,
        }
    }

    /// Append `additional`'s chain to this one.
    ///
    /// `original` is kept from `self` unless it is empty.
    pub fn merge(mut self, additional: &ParseMetadata) -> Self {
        self.handler_chain
            .extend(additional.handler_chain.iter().copied());
        if self.original.is_empty() {
            self.original.clone_from(&additional.original);
        }
        self
    }
}

/// A resolved range with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutcome {
    pub range: DateRange,
    pub metadata: ParseMetadata,
}

impl ParseOutcome {
    /// Outcome of a leaf handler.
    pub fn leaf(handler: HandlerId, original: &str, options: ParseOptions, range: DateRange) -> Self {
        Self {
            range,
            metadata: ParseMetadata::new(handler, original, options),
        }
    }

    /// Outcome of a composing handler: its own id followed by each child's chain.
    pub fn composed(
        handler: HandlerId,
        original: &str,
        options: ParseOptions,
        range: DateRange,
        children: &[&ParseOutcome],
    ) -> Self {
        let metadata = children.iter().fold(
            ParseMetadata::new(handler, original, options),
            |merged, child| merged.merge(&child.metadata),
        );
        Self { range, metadata }
    }

    pub fn handler_chain(&self) -> &[HandlerId] {
        &self.metadata.handler_chain
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
