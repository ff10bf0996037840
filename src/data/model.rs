use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::error::LoadError;
use super::filter::PayloadRange;

/// Sentinel site value meaning "no site filter applied".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch result as stored in the `class` column: `1` = success, `0` = failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret a numeric `class` cell. Anything other than 0 or 1 is rejected.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The numeric `class` value (0 or 1).
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    /// Human readable label used for pie slices and legends.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.class()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// `Launch Site` column.
    pub site: String,
    /// `Payload Mass (kg)` column, always finite and `>= 0`.
    pub payload_mass_kg: f64,
    /// `class` column.
    pub outcome: Outcome,
    /// `Booster Version` column.
    pub booster_version: String,
}

// ---------------------------------------------------------------------------
// SiteOption – one entry of the site dropdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

impl SiteOption {
    fn new(site: &str) -> Self {
        SiteOption {
            label: site.to_string(),
            value: site.to_string(),
        }
    }

    /// The synthetic "ALL" entry.
    pub fn all() -> Self {
        SiteOption::new(ALL_SITES)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the immutable loaded table
// ---------------------------------------------------------------------------

/// The full parsed table. Never empty; every payload is finite and non-negative.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
}

impl Dataset {
    /// Validate loaded records and wrap them.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::Empty);
        }
        if let Some((row, rec)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| !r.payload_mass_kg.is_finite() || r.payload_mass_kg < 0.0)
        {
            return Err(LoadError::InvalidPayload {
                row,
                value: rec.payload_mass_kg,
            });
        }
        Ok(Dataset { records })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a constructed dataset; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct site names in first-occurrence order, exactly as recorded.
    pub fn sites(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.site.as_str())
            .filter(|site| seen.insert(*site))
            .collect()
    }

    /// Dropdown options: "ALL" first, then each distinct site once. A site
    /// recorded as "ALL" is folded into the sentinel entry.
    pub fn site_options(&self) -> Vec<SiteOption> {
        std::iter::once(SiteOption::all())
            .chain(
                self.sites()
                    .into_iter()
                    .filter(|site| *site != ALL_SITES)
                    .map(SiteOption::new),
            )
            .collect()
    }

    /// Smallest and largest payload mass in the table.
    pub fn payload_bounds(&self) -> PayloadRange {
        let (min, max) = self.records.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), r| (lo.min(r.payload_mass_kg), hi.max(r.payload_mass_kg)),
        );
        PayloadRange::new(min, max)
    }
}
