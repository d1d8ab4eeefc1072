//! The resolution pipeline and public entry points.
//!
//! Cleaned text is offered to each [`Resolver`] in [`PIPELINE`] order and
//! the first success wins. Compound resolvers (phrase, range, partial)
//! re-enter the pipeline on strictly shorter sub-expressions through
//! [`resolve_subexpression`].

use tracing::{debug, trace};

use crate::attempt::{all_successes, first_success_tagged};
use crate::clean::clean;
use crate::error::Result;
use crate::granularity::Granularity;
use crate::options::{OptionOverrides, ParseOptions};
use crate::outcome::{DateRange, ParseOutcome};
use crate::{partial, phrase, range};

/// One entry in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    ModifierPhrase,
    YearRangeShorthand,
    Range,
    Partial,
    Granular(Granularity),
}

/// Resolvers in priority order: compound grammars before the leaf grammars
/// they are built from.
pub const PIPELINE: [Resolver; 10] = [
    Resolver::ModifierPhrase,
    Resolver::YearRangeShorthand,
    Resolver::Range,
    Resolver::Partial,
    Resolver::Granular(Granularity::Month),
    Resolver::Granular(Granularity::Day),
    Resolver::Granular(Granularity::Year),
    Resolver::Granular(Granularity::Decade),
    Resolver::Granular(Granularity::Century),
    Resolver::Granular(Granularity::Millennium),
];

impl Resolver {
    /// Try this resolver on cleaned text.
    pub fn attempt(self, text: &str, options: &ParseOptions) -> Option<ParseOutcome> {
        match self {
            Resolver::ModifierPhrase => phrase::resolve(text, options),
            Resolver::YearRangeShorthand => range::resolve_year_shorthand(text, options),
            Resolver::Range => range::resolve(text, options),
            Resolver::Partial => partial::resolve(text, options),
            Resolver::Granular(granularity) => granularity.resolve(text, options),
        }
    }
}

// ── Pipeline ────────────────────────────────────────────────────────────────

fn run_pipeline(text: &str, options: &ParseOptions) -> Option<ParseOutcome> {
    let (resolver, outcome) = first_success_tagged(PIPELINE, |resolver| {
        trace!(?resolver, input = text, "attempting");
        resolver.attempt(text, options)
    })?;
    trace!(?resolver, input = text, "matched");
    Some(outcome)
}

/// Re-enter the pipeline on part of `parent`.
///
/// `part` must be strictly shorter than `parent`; this bounds recursion.
pub(crate) fn resolve_subexpression(
    parent: &str,
    part: &str,
    options: &ParseOptions,
) -> Option<ParseOutcome> {
    debug_assert!(
        part.len() < parent.len(),
        "sub-expression {part:?} does not shrink {parent:?}"
    );
    let part = part.trim();
    if part.is_empty() {
        return None;
    }
    run_pipeline(part, options)
}

fn with_original(mut outcome: ParseOutcome, original: &str) -> ParseOutcome {
    outcome.metadata.original = original.to_string();
    outcome
}

// ── Public API ──────────────────────────────────────────────────────────────

/// Resolve a date expression to its earliest and latest instants.
///
/// Returns `None` for empty input or text outside the supported idioms.
///
/// # Examples
///
/// ```
/// use epoch_engine::{resolve, ParseOptions};
///
/// let range = resolve("1st century BC", &ParseOptions::default()).unwrap();
/// assert_eq!(
///     range.to_iso_pair(),
///     ("-000099-01-01T00:00:00.000Z".to_string(), "0000-12-31T23:59:59.999Z".to_string())
/// );
/// assert!(resolve("sometime", &ParseOptions::default()).is_none());
/// ```
pub fn resolve(text: &str, options: &ParseOptions) -> Option<DateRange> {
    resolve_outcome(text, options).map(|outcome| outcome.range)
}

/// Resolve with provenance: the handler chain and the outer input text.
pub fn resolve_outcome(text: &str, options: &ParseOptions) -> Option<ParseOutcome> {
    let Some(cleaned) = clean(text) else {
        debug!(input = text, "empty date expression");
        return None;
    };
    match run_pipeline(&cleaned, options) {
        Some(outcome) => {
            debug!(
                input = text,
                chain = ?outcome.handler_chain(),
                "resolved date expression"
            );
            Some(with_original(outcome, text))
        }
        None => {
            debug!(input = text, "no handler matched date expression");
            None
        }
    }
}

/// Like [`resolve_outcome`], also recording every other top-level resolver
/// that succeeds as an alternate parse.
pub fn resolve_verbose(text: &str, options: &ParseOptions) -> Option<ParseOutcome> {
    let cleaned = clean(text)?;
    let mut successes = all_successes(PIPELINE, |resolver| resolver.attempt(&cleaned, options))
        .into_iter()
        .map(|(_, outcome)| with_original(outcome, text));
    let mut primary = successes.next()?;
    let alternates: Vec<ParseOutcome> = successes.collect();
    debug!(
        input = text,
        chain = ?primary.handler_chain(),
        alternates = alternates.len(),
        "resolved date expression"
    );
    primary.metadata.alternates = alternates;
    Some(primary)
}

/// Resolve with caller-supplied partial options merged onto the defaults.
///
/// # Errors
///
/// Returns [`crate::EpochError::InvalidBreakpoint`] if the merged century
/// breakpoint is outside `0..=99`.
pub fn resolve_with_overrides(
    text: &str,
    overrides: &OptionOverrides,
) -> Result<Option<DateRange>> {
    let options = overrides.resolve()?;
    Ok(resolve(text, &options))
}

// ── Tests ───────────────────────────────────────────────────────────────────
