use std::collections::BTreeMap;

use super::model::{is_country_code, Dataset, LatestSnapshot, Record, Table};

/// Sidebar key figures for the latest day of each selected country.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarTotals {
    pub total_vaccinations: i64,
    pub new_cases: i64,
    pub new_deaths: i64,
}

/// Keep the most recent record of every country in `table`.
///
/// If a country has two records on its latest date the earlier row wins.
/// Output is ordered by country name.
pub fn latest_per_entity<T: Table + ?Sized>(table: &T) -> LatestSnapshot {
    let mut latest: BTreeMap<&str, &Record> = BTreeMap::new();
    for record in table.records() {
        latest
            .entry(record.entity_name.as_str())
            .and_modify(|current| {
                if record.date > current.date {
                    *current = record;
                }
            })
            .or_insert(record);
    }
    LatestSnapshot {
        rows: latest.into_values().cloned().collect(),
    }
}

/// Sum the sidebar metrics over a snapshot. Missing or non-finite values
/// count as zero and each sum is truncated toward zero.
pub fn sidebar_totals(snapshot: &LatestSnapshot) -> SidebarTotals {
    let sum = |metric: fn(&Record) -> Option<f64>| -> i64 {
        let total: f64 = snapshot
            .rows
            .iter()
            .filter_map(metric)
            .filter(|v| v.is_finite())
            .sum();
        total.trunc() as i64
    };
    SidebarTotals {
        total_vaccinations: sum(|r| r.total_vaccinations),
        new_cases: sum(|r| r.new_cases),
        new_deaths: sum(|r| r.new_deaths),
    }
}

/// Latest record per country over the whole dataset, for the map.
pub fn latest_global_snapshot(dataset: &Dataset) -> LatestSnapshot {
    let mut snapshot = latest_per_entity(dataset);
    snapshot.rows.retain(|r| is_country_code(&r.entity_code));
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Selection;
    use crate::data::model::fixtures::{date, record};
    use crate::data::model::FilteredView;

    fn with_metrics(mut r: Record, vax: Option<f64>, cases: Option<f64>, deaths: Option<f64>) -> Record {
        r.total_vaccinations = vax;
        r.new_cases = cases;
        r.new_deaths = deaths;
        r
    }

    #[test]
    fn picks_max_date_per_country() {
        let view = FilteredView {
            rows: vec![
                record("Kenya", "KEN", date(2021, 1, 2), Some(120.0)),
                record("India", "IND", date(2021, 1, 1), Some(10.0)),
                record("Kenya", "KEN", date(2021, 1, 1), Some(100.0)),
            ],
        };
        let snap = latest_per_entity(&view);
        assert_eq!(snap.rows.len(), 2);
        assert_eq!(snap.rows[0].entity_name, "India");
        assert_eq!(snap.rows[1].entity_name, "Kenya");
        assert_eq!(snap.rows[1].date, date(2021, 1, 2));
        assert_eq!(snap.rows[1].total_cases, Some(120.0));
    }

    #[test]
    fn date_tie_keeps_first_row() {
        let view = FilteredView {
            rows: vec![
                record("Kenya", "KEN", date(2021, 1, 2), Some(1.0)),
                record("Kenya", "KEN", date(2021, 1, 2), Some(2.0)),
            ],
        };
        let snap = latest_per_entity(&view);
        assert_eq!(snap.rows.len(), 1);
        assert_eq!(snap.rows[0].total_cases, Some(1.0));
    }

    #[test]
    fn totals_treat_missing_as_zero_and_truncate() {
        let snap = LatestSnapshot {
            rows: vec![
                with_metrics(
                    record("Kenya", "KEN", date(2021, 1, 2), None),
                    Some(1000.7),
                    None,
                    Some(3.0),
                ),
                with_metrics(
                    record("India", "IND", date(2021, 1, 2), None),
                    None,
                    Some(250.9),
                    Some(1.5),
                ),
            ],
        };
        assert_eq!(
            sidebar_totals(&snap),
            SidebarTotals {
                total_vaccinations: 1000,
                new_cases: 250,
                new_deaths: 4,
            }
        );
    }

    #[test]
    fn non_finite_values_do_not_wipe_out_totals() {
        let snap = LatestSnapshot {
            rows: vec![
                with_metrics(
                    record("Kenya", "KEN", date(2021, 1, 2), None),
                    Some(1200.0),
                    Some(20.0),
                    Some(4.0),
                ),
                with_metrics(
                    record("India", "IND", date(2021, 1, 2), None),
                    Some(f64::INFINITY),
                    Some(f64::NAN),
                    None,
                ),
            ],
        };
        assert_eq!(
            sidebar_totals(&snap),
            SidebarTotals {
                total_vaccinations: 1200,
                new_cases: 20,
                new_deaths: 4,
            }
        );
    }

    #[test]
    fn empty_snapshot_totals_are_zero() {
        let snap = latest_per_entity(&FilteredView::default());
        assert!(snap.is_empty());
        assert_eq!(sidebar_totals(&snap), SidebarTotals::default());
    }

    #[test]
    fn kenya_india_scenario() {
        let ds = Dataset::from_records(vec![
            with_metrics(
                record("Kenya", "KEN", date(2021, 1, 1), Some(100.0)),
                Some(10.0),
                Some(100.0),
                Some(1.0),
            ),
            with_metrics(
                record("Kenya", "KEN", date(2021, 1, 2), Some(120.0)),
                Some(20.0),
                Some(20.0),
                Some(2.0),
            ),
            record("India", "IND", date(2021, 2, 1), Some(9000.0)),
        ]);
        let selection = Selection {
            entities: ["Kenya", "India"].iter().map(|s| s.to_string()).collect(),
            start: date(2021, 1, 1),
            end: date(2021, 1, 2),
        };

        let view = selection.apply(&ds);
        assert_eq!(view.len(), 2);

        let snap = latest_per_entity(&view);
        assert_eq!(snap.rows.len(), 1);
        assert_eq!(snap.rows[0].entity_name, "Kenya");
        assert_eq!(snap.rows[0].date, date(2021, 1, 2));
        assert_eq!(snap.rows[0].total_cases, Some(120.0));

        assert_eq!(
            sidebar_totals(&snap),
            SidebarTotals {
                total_vaccinations: 20,
                new_cases: 20,
                new_deaths: 2,
            }
        );
    }

    #[test]
    fn global_snapshot_spans_whole_dataset() {
        let ds = Dataset::from_records(vec![
            record("Kenya", "KEN", date(2021, 1, 1), Some(100.0)),
            record("Kenya", "KEN", date(2022, 6, 1), Some(300.0)),
            record("India", "IND", date(2022, 5, 1), Some(9000.0)),
        ]);
        let snap = latest_global_snapshot(&ds);
        let got: Vec<_> = snap
            .rows
            .iter()
            .map(|r| (r.entity_code.as_str(), r.total_cases))
            .collect();
        assert_eq!(got, vec![("IND", Some(9000.0)), ("KEN", Some(300.0))]);
    }
}
