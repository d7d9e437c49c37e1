use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{Dataset, FilteredView, Table};

// ---------------------------------------------------------------------------
// Selection: which countries and which dates the user is looking at
// ---------------------------------------------------------------------------

/// Countries chosen in the sidebar plus a closed date interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub entities: BTreeSet<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Selection {
    /// Initial selection: the preferred countries that exist in the data and
    /// the dataset's full date range.
    ///
    /// Returns `None` for an empty dataset, which has no date range.
    pub fn initial(dataset: &Dataset, preferred: &[String]) -> Option<Self> {
        let (start, end) = dataset.date_bounds()?;
        let entities = preferred
            .iter()
            .filter(|name| {
                let present = dataset.entity_names().contains(name.as_str());
                if !present {
                    log::warn!("Default country '{name}' not found in dataset");
                }
                present
            })
            .cloned()
            .collect();
        Some(Self {
            entities,
            start,
            end,
        })
    }

    pub fn apply(&self, dataset: &Dataset) -> FilteredView {
        filter_view(dataset, &self.entities, self.start, self.end)
    }
}

/// Return the rows whose country is in `entities` and whose date lies in
/// `[start, end]`, in source order.
///
/// An inverted range (`start > end`) selects nothing.
pub fn filter_view(
    dataset: &Dataset,
    entities: &BTreeSet<String>,
    start: NaiveDate,
    end: NaiveDate,
) -> FilteredView {
    if start > end {
        log::debug!("Inverted date range {start} > {end}, nothing selected");
        return FilteredView::default();
    }
    if entities.is_empty() {
        return FilteredView::default();
    }

    let rows = dataset
        .records()
        .iter()
        .filter(|r| entities.contains(&r.entity_name) && (start..=end).contains(&r.date))
        .cloned()
        .collect();
    FilteredView { rows }
}
