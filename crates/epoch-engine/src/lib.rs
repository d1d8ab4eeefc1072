//! # epoch-engine
//!
//! Deterministic resolution of fuzzy historical date expressions.
//!
//! Catalog dates such as `"early 12th century BC"`, `"ca. 1833–46"`,
//! `"3rd quarter of the 19th century"` or `"1969/1981"` are resolved to the
//! earliest and latest instant they could denote, together with provenance
//! describing which handlers produced the result. Expressions outside the
//! supported idioms resolve to `None`; nothing is guessed.
//!
//! ## Modules
//!
//! - [`resolver`]: Pipeline and public entry points ([`resolve`], [`resolve_outcome`], [`resolve_verbose`])
//! - [`granularity`]: Day, month, year, decade, century and millennium grammars
//! - [`modifier`]: Qualifier rules (circa, early/mid/late, halves, quarters, seasons, annotations)
//! - [`range`]: Compound "X to Y" expressions and year shorthand
//! - [`partial`]: "early X", "first half of X"
//! - [`phrase`]: "after X", "before X", "X or later"
//! - [`calendar`]: Era rule, span boundaries, calendar primitives
//! - [`outcome`]: Ranges, handler ids and metadata
//! - [`options`]: Resolution options and caller overrides
//! - [`clean`]: Input normalisation
//! - [`attempt`]: Combinators over optional results
//! - [`error`]: Error types

pub mod attempt;
pub mod calendar;
pub mod clean;
pub mod error;
pub mod granularity;
pub mod modifier;
pub mod options;
pub mod outcome;
pub mod partial;
pub mod phrase;
pub mod range;
pub mod resolver;

pub use calendar::{format_instant, TimeInstant};
pub use error::EpochError;
pub use options::{Convention, OptionOverrides, ParseOptions};
pub use outcome::{DateRange, HandlerId, ParseMetadata, ParseOutcome};
pub use resolver::{resolve, resolve_outcome, resolve_verbose, resolve_with_overrides};
