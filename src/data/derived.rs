use super::model::{FilteredView, Record};

/// A filtered row with its derived death rate. `None` means the ratio is
/// undefined (no cases yet, or missing counts) and must be drawn as a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedRecord {
    pub record: Record,
    pub death_rate: Option<f64>,
}

/// A [`FilteredView`] with the `death_rate` column appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatedView {
    pub rows: Vec<RatedRecord>,
}

impl RatedView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// `total_deaths / total_cases * 100`, or `None` when that is not a number.
pub fn death_rate(record: &Record) -> Option<f64> {
    let deaths = record.total_deaths?;
    let cases = record.total_cases?;
    if cases == 0.0 {
        return None;
    }
    let rate = deaths / cases * 100.0;
    rate.is_finite().then_some(rate)
}

/// Append the death-rate column to every row of `view`.
pub fn with_death_rate(view: &FilteredView) -> RatedView {
    RatedView {
        rows: view
            .rows
            .iter()
            .map(|record| RatedRecord {
                death_rate: death_rate(record),
                record: record.clone(),
            })
            .collect(),
    }
}
