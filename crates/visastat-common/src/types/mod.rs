//! Shared domain types for visastat
//!
//! The ingestion system runs two pipeline drivers (`monthly`, `annual`).
//! The monthly driver covers two visa programs, so manifest records carry
//! one of three variant tags.

use serde::{Deserialize, Serialize};

/// A pipeline driver: which traversal rules to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantFamily {
    /// Monthly immigrant + non-immigrant visa statistics pages
    Monthly,
    /// Annual report pages, one per fiscal year
    Annual,
}

impl VariantFamily {
    /// Destination subdirectory under the data root for this family
    pub fn subpath(&self) -> &'static str {
        match self {
            VariantFamily::Monthly => "monthly",
            VariantFamily::Annual => "annual",
        }
    }
}

impl std::str::FromStr for VariantFamily {
    type Err = crate::VisastatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(VariantFamily::Monthly),
            "annual" => Ok(VariantFamily::Annual),
            _ => Err(crate::VisastatError::Parse(format!(
                "Invalid variant family: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for VariantFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariantFamily::Monthly => write!(f, "monthly"),
            VariantFamily::Annual => write!(f, "annual"),
        }
    }
}

/// The variant tag recorded on every manifest record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantTag {
    /// Monthly immigrant visa statistics
    MonthlyIv,
    /// Monthly non-immigrant visa statistics
    MonthlyNiv,
    /// Annual reports
    Annual,
}

impl VariantTag {
    pub fn family(&self) -> VariantFamily {
        match self {
            VariantTag::MonthlyIv | VariantTag::MonthlyNiv => VariantFamily::Monthly,
            VariantTag::Annual => VariantFamily::Annual,
        }
    }
}

impl std::fmt::Display for VariantTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariantTag::MonthlyIv => write!(f, "monthly-iv"),
            VariantTag::MonthlyNiv => write!(f, "monthly-niv"),
            VariantTag::Annual => write!(f, "annual"),
        }
    }
}
