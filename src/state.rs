use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::derived::{with_death_rate, RatedView};
use crate::data::export::{export_artifact, ExportArtifact};
use crate::data::filter::Selection;
use crate::data::map::{map_tiles, MapTile};
use crate::data::model::{Dataset, LatestSnapshot};
use crate::data::series::{series_by_entity, Metric, Segment};
use crate::data::snapshot::{latest_global_snapshot, latest_per_entity, sidebar_totals, SidebarTotals};

// ---------------------------------------------------------------------------
// Derived tables for the current selection
// ---------------------------------------------------------------------------

/// Everything computed from one [`Selection`]. Rebuilt from scratch whenever
/// the selection changes; nothing here outlives it.
#[derive(Debug, Clone, Default)]
pub struct SelectionView {
    pub rated: RatedView,
    pub latest: LatestSnapshot,
    pub totals: SidebarTotals,
    pub series: Vec<(Metric, BTreeMap<String, Vec<Segment>>)>,
}

impl SelectionView {
    pub fn compute(dataset: &Dataset, selection: &Selection) -> Self {
        let filtered = selection.apply(dataset);
        let latest = latest_per_entity(&filtered);
        let totals = sidebar_totals(&latest);
        let rated = with_death_rate(&filtered);
        let series = Metric::ALL
            .iter()
            .map(|&metric| (metric, series_by_entity(&rated, metric)))
            .collect();

        log::debug!(
            "Selection of {} countries → {} rows, {} with latest data",
            selection.entities.len(),
            rated.len(),
            latest.rows.len()
        );

        Self {
            rated,
            latest,
            totals,
            series,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, shared with the loader cache.
    pub dataset: Arc<Dataset>,

    /// Current country / date selection.
    pub selection: Selection,

    /// Tables derived from `selection`.
    pub view: SelectionView,

    /// Latest case counts of every country, independent of the selection.
    pub map: Vec<MapTile>,

    /// Line colour per country.
    pub color_map: ColorMap,

    /// Text typed into the country search box.
    pub entity_query: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the initial state. Returns `None` when the dataset has no rows
    /// (and therefore no date range to select from).
    pub fn new(dataset: Arc<Dataset>, config: &DashboardConfig) -> Option<Self> {
        let selection = Selection::initial(&dataset, &config.default_entities)?;
        let view = SelectionView::compute(&dataset, &selection);
        let map = map_tiles(&latest_global_snapshot(&dataset));
        let color_map = ColorMap::new(dataset.entity_names());

        Some(Self {
            dataset,
            selection,
            view,
            map,
            color_map,
            entity_query: String::new(),
            status_message: None,
        })
    }

    /// Recompute the derived tables after a selection change.
    pub fn refresh(&mut self) {
        self.view = SelectionView::compute(&self.dataset, &self.selection);
    }

    /// Add or remove a single country.
    pub fn toggle_entity(&mut self, name: &str) {
        if !self.selection.entities.remove(name) {
            self.selection.entities.insert(name.to_string());
        }
        self.refresh();
    }

    /// Select every country currently matching the search box.
    pub fn select_all(&mut self) {
        let matching: Vec<String> = self.matching_entities().cloned().collect();
        self.selection.entities.extend(matching);
        self.refresh();
    }

    pub fn select_none(&mut self) {
        self.selection.entities.clear();
        self.refresh();
    }

    /// Update both ends of the date range. Inverted ranges are kept as
    /// entered and simply select nothing.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        if (start, end) != (self.selection.start, self.selection.end) {
            self.selection.start = start;
            self.selection.end = end;
            self.refresh();
        }
    }

    /// Countries whose name contains the search text (case-insensitive).
    pub fn matching_entities(&self) -> impl Iterator<Item = &String> {
        let query = self.entity_query.trim().to_lowercase();
        self.dataset
            .entity_names()
            .iter()
            .filter(move |name| query.is_empty() || name.to_lowercase().contains(&query))
    }

    /// Serialize the current view for download.
    pub fn export(&self) -> anyhow::Result<ExportArtifact> {
        export_artifact(&self.view.rated)
    }
}
