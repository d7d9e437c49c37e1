use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

/// Length of a country ISO code; longer codes (`OWID_WRL`, `OWID_AFR`, …)
/// mark aggregates such as continents or the whole world.
pub const COUNTRY_CODE_LEN: usize = 3;

/// Whether `code` identifies a single country rather than an aggregate.
pub fn is_country_code(code: &str) -> bool {
    code.chars().count() == COUNTRY_CODE_LEN
}

// ---------------------------------------------------------------------------
// Record – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single (country, date) observation.
///
/// Field renames keep the serialized form identical to the OWID column names
/// so an exported view can be loaded again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "iso_code")]
    pub entity_code: String,
    #[serde(rename = "location")]
    pub entity_name: String,
    pub date: NaiveDate,
    pub total_cases: Option<f64>,
    pub new_cases: Option<f64>,
    pub total_deaths: Option<f64>,
    pub new_deaths: Option<f64>,
    pub total_vaccinations: Option<f64>,
}

// ---------------------------------------------------------------------------
// Table – anything that exposes an ordered slice of records
// ---------------------------------------------------------------------------

/// Read access to an ordered collection of records.
pub trait Table {
    fn records(&self) -> &[Record];

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed entity index and date bounds.
///
/// Fields are private: once built, a dataset is never mutated. Every derived
/// view is an owned copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    entity_names: BTreeSet<String>,
    date_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl Dataset {
    /// Build the entity index and date bounds from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let entity_names = records.iter().map(|r| r.entity_name.clone()).collect();
        let date_bounds = records.iter().fold(None, |acc, r| match acc {
            None => Some((r.date, r.date)),
            Some((lo, hi)) => Some((lo.min(r.date), hi.max(r.date))),
        });
        Dataset {
            records,
            entity_names,
            date_bounds,
        }
    }

    /// Sorted unique entity names.
    pub fn entity_names(&self) -> &BTreeSet<String> {
        &self.entity_names
    }

    /// Global `(min, max)` date, or `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_bounds
    }
}

impl Table for Dataset {
    fn records(&self) -> &[Record] {
        &self.records
    }
}

// ---------------------------------------------------------------------------
// FilteredView – rows matching the current selection
// ---------------------------------------------------------------------------

/// Owned subset of a [`Dataset`] in source row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    pub rows: Vec<Record>,
}

impl Table for FilteredView {
    fn records(&self) -> &[Record] {
        &self.rows
    }
}

// ---------------------------------------------------------------------------
// LatestSnapshot – most recent row per entity
// ---------------------------------------------------------------------------

/// One record per distinct entity, ordered by entity name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestSnapshot {
    pub rows: Vec<Record>,
}

impl Table for LatestSnapshot {
    fn records(&self) -> &[Record] {
        &self.rows
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn record(name: &str, code: &str, day: NaiveDate, total_cases: Option<f64>) -> Record {
        Record {
            entity_code: code.to_string(),
            entity_name: name.to_string(),
            date: day,
            total_cases,
            new_cases: None,
            total_deaths: None,
            new_deaths: None,
            total_vaccinations: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn country_code_counts_characters() {
        assert!(is_country_code("KEN"));
        assert!(!is_country_code("OWID_WRL"));
        assert!(!is_country_code("KE"));
        assert!(!is_country_code(""));
    }

    #[test]
    fn dataset_indexes_names_and_bounds() {
        let ds = Dataset::from_records(vec![
            record("Kenya", "KEN", date(2021, 1, 2), Some(1.0)),
            record("India", "IND", date(2020, 3, 1), None),
            record("Kenya", "KEN", date(2021, 1, 1), Some(1.0)),
        ]);
        assert_eq!(ds.len(), 3);
        let names: Vec<_> = ds.entity_names().iter().cloned().collect();
        assert_eq!(names, vec!["India".to_string(), "Kenya".to_string()]);
        assert_eq!(ds.date_bounds(), Some((date(2020, 3, 1), date(2021, 1, 2))));
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.date_bounds(), None);
    }
}
