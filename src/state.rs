use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::data::aggregate::{compute_scatter_data, PieChart, ScatterChart};
use crate::data::filter::{PayloadRange, Selection};
use crate::data::model::{Dataset, SiteOption, ALL_SITES};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// File the dataset was read from.
    pub source: PathBuf,

    /// Loaded launch table.
    pub dataset: Dataset,

    /// Dropdown entries, "ALL" first (derived once per dataset).
    pub site_options: Vec<SiteOption>,

    /// Slider extent (derived once per dataset).
    pub payload_bounds: PayloadRange,

    /// Current dropdown + slider values.
    pub selection: Selection,

    /// Text typed into the searchable dropdown.
    pub site_query: String,

    /// Cached pie result for `selection.site`.
    pub pie: PieChart,

    /// Slice colours for the current pie.
    pub pie_colors: ColorMap,

    /// Cached scatter result for the full selection.
    pub scatter: ScatterChart,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(source: PathBuf, dataset: Dataset) -> Self {
        let selection = Selection::full(&dataset);
        let pie = PieChart::for_site(&dataset, &selection.site);
        let pie_colors = ColorMap::new(pie.data.iter().map(|d| d.label.as_str()));
        let scatter = compute_scatter_data(&dataset, &selection.site, &selection.payload_range);

        AppState {
            source,
            site_options: dataset.site_options(),
            payload_bounds: dataset.payload_bounds(),
            dataset,
            selection,
            site_query: String::new(),
            pie,
            pie_colors,
            scatter,
            status_message: None,
        }
    }

    /// Replace the dataset (File → Open…) and reset every control.
    pub fn set_dataset(&mut self, source: PathBuf, dataset: Dataset) {
        *self = AppState::new(source, dataset);
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Dropdown changed: both charts depend on the site.
    pub fn select_site(&mut self, site: &str) {
        if self.selection.site == site {
            return;
        }
        self.selection.site = site.to_string();
        self.site_query.clear();
        self.refresh_pie();
        self.refresh_scatter();
    }

    /// Lower slider moved. Drags the upper bound along so `min <= max` holds.
    pub fn set_payload_min(&mut self, value: f64) {
        let value = self.clamp_to_bounds(value);
        let range = &mut self.selection.payload_range;
        range.min = value;
        if range.max < value {
            range.max = value;
        }
        self.refresh_scatter();
    }

    /// Upper slider moved. Drags the lower bound along so `min <= max` holds.
    pub fn set_payload_max(&mut self, value: f64) {
        let value = self.clamp_to_bounds(value);
        let range = &mut self.selection.payload_range;
        range.max = value;
        if range.min > value {
            range.min = value;
        }
        self.refresh_scatter();
    }

    /// Restore the full payload window.
    pub fn reset_payload_range(&mut self) {
        self.selection.payload_range = self.payload_bounds;
        self.refresh_scatter();
    }

    /// Options matching the dropdown search text (case-insensitive substring).
    /// "ALL" is always offered.
    pub fn matching_site_options(&self) -> Vec<&SiteOption> {
        let query = self.site_query.trim().to_lowercase();
        self.site_options
            .iter()
            .filter(|o| {
                query.is_empty()
                    || o.value == ALL_SITES
                    || o.label.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Launches currently on the scatter chart.
    pub fn in_view(&self) -> usize {
        self.scatter.points.len()
    }

    fn clamp_to_bounds(&self, value: f64) -> f64 {
        value.clamp(self.payload_bounds.min, self.payload_bounds.max)
    }

    fn refresh_pie(&mut self) {
        self.pie = PieChart::for_site(&self.dataset, &self.selection.site);
        self.pie_colors = ColorMap::new(self.pie.data.iter().map(|d| d.label.as_str()));
        log::debug!("pie recomputed for site {:?}: {} slices", self.selection.site, self.pie.data.len());
    }

    fn refresh_scatter(&mut self) {
        let sel = &self.selection;
        self.scatter = compute_scatter_data(&self.dataset, &sel.site, &sel.payload_range);
        log::debug!(
            "scatter recomputed for site {:?}, payload {}..={} kg: {} points",
            sel.site,
            sel.payload_range.min,
            sel.payload_range.max,
            self.scatter.points.len()
        );
    }
}
