//! Resolution options.
//!
//! A [`ParseOptions`] value is built once per top-level call, by merging the
//! caller's [`OptionOverrides`] onto the defaults, and is then threaded
//! unchanged through every recursive resolution.

use serde::{Deserialize, Serialize};

use crate::error::{EpochError, Result};

/// Which calendar years belong to the "Nth" century or millennium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// The 20th century is 1900–1999.
    Popular,
    /// The 20th century is 1901–2000.
    #[default]
    Formal,
}

/// Fully resolved options for one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOptions {
    /// Century/millennium boundary convention.
    pub convention: Convention,
    /// Read bare two-digit years ("85") relative to `century_breakpoint`.
    pub century_shorthand: bool,
    /// Two-digit years at or below this value land in the 2000s, above it in the 1900s.
    pub century_breakpoint: u32,
    /// Years subtracted from the start of a "circa" range.
    pub circa_start_offset_years: i32,
    /// Years added to the end of a "circa" range.
    pub circa_end_offset_years: i32,
    /// Length in years of the open side of "after X", "before X", "X or later".
    pub after_offset_years: i32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            convention: Convention::Formal,
            century_shorthand: false,
            century_breakpoint: 29,
            circa_start_offset_years: 3,
            circa_end_offset_years: 0,
            after_offset_years: 10,
        }
    }
}

impl ParseOptions {
    /// Merge caller overrides onto these options.
    ///
    /// # Errors
    ///
    /// Returns [`EpochError::InvalidBreakpoint`] if the resulting breakpoint is
    /// outside `0..=99`.
    pub fn with_overrides(&self, overrides: &OptionOverrides) -> Result<ParseOptions> {
        let merged = ParseOptions {
            convention: overrides.convention.unwrap_or(self.convention),
            century_shorthand: overrides.century_shorthand.unwrap_or(self.century_shorthand),
            century_breakpoint: overrides
                .century_breakpoint
                .unwrap_or(self.century_breakpoint),
            circa_start_offset_years: overrides
                .circa_start_offset_years
                .unwrap_or(self.circa_start_offset_years),
            circa_end_offset_years: overrides
                .circa_end_offset_years
                .unwrap_or(self.circa_end_offset_years),
            after_offset_years: overrides
                .after_offset_years
                .unwrap_or(self.after_offset_years),
        };
        merged.validate()?;
        Ok(merged)
    }

    /// Check the caller-supplied invariants.
    pub fn validate(&self) -> Result<()> {
        if self.century_breakpoint > 99 {
            return Err(EpochError::InvalidBreakpoint(self.century_breakpoint));
        }
        Ok(())
    }

    /// The same options with circa start and end offsets exchanged.
    pub(crate) fn with_swapped_circa(&self) -> ParseOptions {
        ParseOptions {
            circa_start_offset_years: self.circa_end_offset_years,
            circa_end_offset_years: self.circa_start_offset_years,
            ..*self
        }
    }
}

/// Partial options supplied by a caller. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct OptionOverrides {
    pub convention: Option<Convention>,
    pub century_shorthand: Option<bool>,
    pub century_breakpoint: Option<u32>,
    pub circa_start_offset_years: Option<i32>,
    pub circa_end_offset_years: Option<i32>,
    pub after_offset_years: Option<i32>,
}

impl OptionOverrides {
    /// Parse overrides from a JSON object such as `{"convention": "popular"}`.
    ///
    /// # Errors
    ///
    /// Returns [`EpochError::InvalidOptions`] for malformed JSON, unknown
    /// fields, or values of the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EpochError::InvalidOptions(e.to_string()))
    }

    /// Resolve these overrides against the defaults.
    pub fn resolve(&self) -> Result<ParseOptions> {
        ParseOptions::default().with_overrides(self)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
