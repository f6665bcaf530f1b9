// Fiscal-year resolution from anchor text
//
// The resolved label is the on-disk partition key for a document, so
// resolution must be deterministic and side-effect-free.

use crate::ingest::Result;
use regex::Regex;

/// Fallback label when no fiscal year can be resolved
pub const UNKNOWN_FISCAL_YEAR: &str = "unknown";

/// Resolves fiscal-year labels from link text
///
/// Rules are tried in order and the first match wins:
/// 1. A 4-digit year prefixed by "FY" with optional whitespace
/// 2. A bare 4-digit year starting with "20"
/// 3. The literal label `unknown`
///
/// Output is always `FY<digits>` or `unknown`.
pub struct FiscalYearResolver {
    fy_pattern: Regex,
    year_pattern: Regex,
}

impl FiscalYearResolver {
    pub fn new() -> Result<Self> {
        Ok(FiscalYearResolver {
            fy_pattern: Regex::new(r"FY\s?(\d{4})")?,
            year_pattern: Regex::new(r"(20\d{2})")?,
        })
    }

    /// Resolve the fiscal-year label for a piece of anchor text
    pub fn resolve(&self, text: &str) -> String {
        if let Some(captures) = self.fy_pattern.captures(text) {
            return format!("FY{}", &captures[1]);
        }

        if let Some(captures) = self.year_pattern.captures(text) {
            return format!("FY{}", &captures[1]);
        }

        UNKNOWN_FISCAL_YEAR.to_string()
    }

    /// Whether the text resolves to a concrete fiscal year
    pub fn resolves(&self, text: &str) -> bool {
        self.resolve(text) != UNKNOWN_FISCAL_YEAR
    }
}
