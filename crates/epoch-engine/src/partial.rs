//! "early X", "mid X", "late X", "first half of X", "third quarter of X".
//!
//! X is any full expression: it is resolved through the pipeline and the
//! selected portion of its range is returned.

use std::sync::LazyLock;

use regex::Regex;

use crate::attempt::first_success;
use crate::options::ParseOptions;
use crate::outcome::{HandlerId, ParseOutcome};
use crate::resolver::resolve_subexpression;

/// Pieces `first..=last` of a range cut into `parts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Portion {
    pub first: u32,
    pub last: u32,
    pub parts: u32,
}

impl Portion {
    const fn single(index: u32, parts: u32) -> Self {
        Self {
            first: index,
            last: index,
            parts,
        }
    }
}

const OF_THE: &str = r"\s+(?:of\s+)?(?:the\s+)?";

static PREFIXES: LazyLock<Vec<(Regex, Portion)>> = LazyLock::new(|| {
    [
        (r"^early\s+".to_string(), Portion::single(0, 3)),
        (r"^mid\s+".to_string(), Portion::single(1, 3)),
        (r"^late\s+".to_string(), Portion::single(2, 3)),
        (format!(r"^(?:first|1st)\s+half{OF_THE}"), Portion::single(0, 2)),
        (
            format!(r"^(?:second|2nd|last|latter)\s+half{OF_THE}"),
            Portion::single(1, 2),
        ),
        (format!(r"^(?:first|1st)\s+quarter{OF_THE}"), Portion::single(0, 4)),
        (format!(r"^(?:second|2nd)\s+quarter{OF_THE}"), Portion::single(1, 4)),
        (format!(r"^(?:third|3rd)\s+quarter{OF_THE}"), Portion::single(2, 4)),
        (
            format!(r"^(?:fourth|4th|last)\s+quarter{OF_THE}"),
            Portion::single(3, 4),
        ),
    ]
    .into_iter()
    .map(|(pattern, portion)| {
        let re = Regex::new(&pattern).expect("partial prefix pattern should compile");
        (re, portion)
    })
    .collect()
});

/// Resolve a leading partial qualifier applied to a full expression.
///
/// # Examples
///
/// ```
/// use epoch_engine::partial::resolve;
/// use epoch_engine::{HandlerId, ParseOptions};
///
/// let outcome = resolve("early 1990s", &ParseOptions::default()).unwrap();
/// assert_eq!(outcome.handler_chain(), &[HandlerId::Partial, HandlerId::Decade]);
/// ```
pub fn resolve(text: &str, options: &ParseOptions) -> Option<ParseOutcome> {
    first_success(PREFIXES.iter(), |(prefix, portion)| {
        let matched = prefix.find(text)?;
        let inner = resolve_subexpression(text, &text[matched.end()..], options)?;
        let range = inner
            .range
            .portion(portion.first, portion.last, portion.parts)?;
        Some(ParseOutcome::composed(
            HandlerId::Partial,
            text,
            *options,
            range,
            &[&inner],
        ))
    })
}
