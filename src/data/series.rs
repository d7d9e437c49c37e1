use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::derived::{RatedRecord, RatedView};

// ---------------------------------------------------------------------------
// Metrics plotted over time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    TotalCases,
    TotalDeaths,
    TotalVaccinations,
    DeathRate,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::TotalCases,
        Metric::TotalDeaths,
        Metric::TotalVaccinations,
        Metric::DeathRate,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Metric::TotalCases => "Total COVID-19 Cases",
            Metric::TotalDeaths => "Total COVID-19 Deaths",
            Metric::TotalVaccinations => "Total COVID-19 Vaccinations",
            Metric::DeathRate => "COVID-19 Death Rate (%)",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Metric::TotalCases => "total_cases",
            Metric::TotalDeaths => "total_deaths",
            Metric::TotalVaccinations => "total_vaccinations",
            Metric::DeathRate => "death_rate",
        }
    }

    fn value(self, row: &RatedRecord) -> Option<f64> {
        match self {
            Metric::TotalCases => row.record.total_cases,
            Metric::TotalDeaths => row.record.total_deaths,
            Metric::TotalVaccinations => row.record.total_vaccinations,
            Metric::DeathRate => row.death_rate,
        }
    }
}

// ---------------------------------------------------------------------------
// Date <-> plot x coordinate
// ---------------------------------------------------------------------------

/// Plot x coordinate for a date (days since 0001-01-01).
pub fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Inverse of [`date_to_x`], rounding to the nearest day.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

// ---------------------------------------------------------------------------
// Series extraction
// ---------------------------------------------------------------------------

/// Unbroken stretch of `[x, y]` points.
pub type Segment = Vec<[f64; 2]>;

/// Per-country line data for `metric`, date-ordered.
///
/// A missing value ends the current segment so the chart shows a gap
/// instead of interpolating (or dropping to zero).
pub fn series_by_entity(view: &RatedView, metric: Metric) -> BTreeMap<String, Vec<Segment>> {
    let mut by_entity: BTreeMap<&str, Vec<&RatedRecord>> = BTreeMap::new();
    for row in &view.rows {
        by_entity
            .entry(row.record.entity_name.as_str())
            .or_default()
            .push(row);
    }

    by_entity
        .into_iter()
        .map(|(name, mut rows)| {
            rows.sort_by_key(|r| r.record.date);

            let mut segments: Vec<Segment> = Vec::new();
            let mut current = Segment::new();
            for row in rows {
                match metric.value(row) {
                    Some(y) if y.is_finite() => current.push([date_to_x(row.record.date), y]),
                    _ => {
                        if !current.is_empty() {
                            segments.push(std::mem::take(&mut current));
                        }
                    }
                }
            }
            if !current.is_empty() {
                segments.push(current);
            }
            (name.to_string(), segments)
        })
        .collect()
}
