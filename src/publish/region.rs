//! Region overrides.

use crate::error::{ActionError, Result};
use std::fmt;

/// Service clusters a publish can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Europe
    Eu,
    /// United States
    Us,
    /// Asia-Pacific
    Ap,
}

impl Region {
    /// All regions, in display order
    pub const ALL: [Region; 3] = [Region::Eu, Region::Us, Region::Ap];

    /// Region code as passed to `--region`
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Eu => "EU",
            Region::Us => "US",
            Region::Ap => "AP",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a region override to its upper-case code.
///
/// # Errors
///
/// * `InvalidRegion` - listing the accepted codes
pub fn validate_region(region: &str) -> Result<Region> {
    let normalized = region.to_uppercase();
    Region::ALL
        .into_iter()
        .find(|r| r.as_str() == normalized)
        .ok_or_else(|| ActionError::InvalidRegion {
            region: region.to_string(),
            valid: Region::ALL.iter().map(|r| r.as_str().to_string()).collect(),
        })
}
