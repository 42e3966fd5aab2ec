use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("launch class must be 0 or 1, got {0}")]
    InvalidOutcome(i64),
}

#[derive(Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("payload bounds must be finite and non-negative, got [{min}, {max}]")]
    OutOfDomain { min: f64, max: f64 },
    #[error("payload minimum {min} exceeds maximum {max}")]
    Inverted { min: f64, max: f64 },
}

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Binary launch outcome. Ordered so that `Failure < Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Pie-chart label for this outcome.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failed",
        }
    }

    /// Numeric class value as stored in the dataset.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure => 0,
        }
    }
}

impl TryFrom<i64> for Outcome {
    type Error = ModelError;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        match class {
            1 => Ok(Outcome::Success),
            0 => Ok(Outcome::Failure),
            other => Err(ModelError::InvalidOutcome(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    /// `None` when the source cell was empty or not a usable mass.
    pub payload_mass_kg: Option<f64>,
    pub outcome: Outcome,
    pub flight_number: Option<u32>,
    pub booster_version_category: Option<String>,
}

impl LaunchRecord {
    /// Record with only the three required columns populated.
    pub fn new(site: impl Into<String>, payload_mass_kg: Option<f64>, outcome: Outcome) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            outcome,
            flight_number: None,
            booster_version_category: None,
        }
    }
}

// ---------------------------------------------------------------------------
// SiteChoice – selector value, a real site or the "All Sites" sentinel
// ---------------------------------------------------------------------------

pub const ALL_SITES: &str = "All Sites";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteChoice {
    #[default]
    All,
    Site(String),
}

impl SiteChoice {
    /// Whether a record launched from `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteChoice::All => true,
            SiteChoice::Site(selected) => selected == site,
        }
    }
}

impl fmt::Display for SiteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteChoice::All => f.write_str(ALL_SITES),
            SiteChoice::Site(site) => f.write_str(site),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – inclusive [min, max] in kilograms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    min_kg: f64,
    max_kg: f64,
}

impl PayloadRange {
    pub fn new(min_kg: f64, max_kg: f64) -> Result<Self, RangeError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(min_kg) || !valid(max_kg) {
            return Err(RangeError::OutOfDomain { min: min_kg, max: max_kg });
        }
        if min_kg > max_kg {
            return Err(RangeError::Inverted { min: min_kg, max: max_kg });
        }
        Ok(Self { min_kg, max_kg })
    }

    pub fn min_kg(&self) -> f64 {
        self.min_kg
    }

    pub fn max_kg(&self) -> f64 {
        self.max_kg
    }

    /// Inclusive on both ends. An absent mass is never contained.
    pub fn contains(&self, payload_mass_kg: Option<f64>) -> bool {
        payload_mass_kg.is_some_and(|kg| self.min_kg <= kg && kg <= self.max_kg)
    }
}

impl Default for PayloadRange {
    fn default() -> Self {
        Self { min_kg: 0.0, max_kg: 0.0 }
    }
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Immutable table of launches with the site list computed once at load time.
#[derive(Debug, Clone, Default)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    /// Distinct sites in first-appearance order.
    sites: Vec<String>,
}

impl LaunchTable {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        for record in &records {
            if !sites.iter().any(|s| *s == record.site) {
                sites.push(record.site.clone());
            }
        }
        LaunchTable { records, sites }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Observed minimum and maximum payload mass, ignoring absent values.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.payload_mass_kg)
            .fold(None, |acc, kg| match acc {
                None => Some((kg, kg)),
                Some((lo, hi)) => Some((lo.min(kg), hi.max(kg))),
            })
    }

    /// Payload range spanning the whole table; `[0, 0]` when no payload is known.
    pub fn full_payload_range(&self) -> PayloadRange {
        self.payload_bounds()
            .and_then(|(lo, hi)| PayloadRange::new(lo, hi).ok())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_class() {
        assert_eq!(Outcome::try_from(1), Ok(Outcome::Success));
        assert_eq!(Outcome::try_from(0), Ok(Outcome::Failure));
        assert_eq!(Outcome::try_from(2), Err(ModelError::InvalidOutcome(2)));
    }

    #[test]
    fn site_choice_display_uses_sentinel() {
        assert_eq!(SiteChoice::All.to_string(), "All Sites");
        assert_eq!(SiteChoice::Site("KSC".into()).to_string(), "KSC");
    }

    #[test]
    fn payload_range_rejects_bad_bounds() {
        assert!(matches!(
            PayloadRange::new(10.0, 5.0),
            Err(RangeError::Inverted { .. })
        ));
        assert!(matches!(
            PayloadRange::new(-1.0, 5.0),
            Err(RangeError::OutOfDomain { .. })
        ));
        assert!(matches!(
            PayloadRange::new(0.0, f64::INFINITY),
            Err(RangeError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn payload_range_is_inclusive() {
        let range = PayloadRange::new(2000.0, 2000.0).unwrap();
        assert!(range.contains(Some(2000.0)));
        assert!(!range.contains(Some(1999.9)));
        assert!(!range.contains(None));
    }

    #[test]
    fn table_derives_sites_and_bounds() {
        let table = LaunchTable::from_records(vec![
            LaunchRecord::new("KSC", Some(5000.0), Outcome::Success),
            LaunchRecord::new("CCAFS", None, Outcome::Failure),
            LaunchRecord::new("KSC", Some(300.0), Outcome::Failure),
        ]);
        assert_eq!(table.sites(), ["KSC".to_string(), "CCAFS".to_string()]);
        assert_eq!(table.payload_bounds(), Some((300.0, 5000.0)));
        assert_eq!(table.full_payload_range(), PayloadRange::new(300.0, 5000.0).unwrap());
    }

    #[test]
    fn empty_table_has_zero_range() {
        let table = LaunchTable::default();
        assert!(table.is_empty());
        assert_eq!(table.payload_bounds(), None);
        assert_eq!(table.full_payload_range(), PayloadRange::default());
    }
}
