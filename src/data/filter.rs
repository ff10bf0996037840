use super::model::{Dataset, LaunchRecord, ALL_SITES};

/// Spacing of the labelled ticks under the payload sliders.
pub const PAYLOAD_MARK_INTERVAL_KG: f64 = 2000.0;

/// Upper bound on ticks; the interval doubles until the marks fit.
pub const MAX_PAYLOAD_MARKS: usize = 50;

// ---------------------------------------------------------------------------
// PayloadRange – inclusive payload mass window
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` payload window in kilograms.
///
/// An inverted window (`min > max`) is allowed and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub min: f64,
    pub max: f64,
}

impl PayloadRange {
    pub fn new(min: f64, max: f64) -> Self {
        PayloadRange { min, max }
    }

    /// Whether `payload` lies within the window, both bounds included.
    pub fn contains(&self, payload: f64) -> bool {
        payload >= self.min && payload <= self.max
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Tick positions every `interval` kg from `floor(min)` up to `floor(max)`.
    /// Wide ranges double the interval until at most [`MAX_PAYLOAD_MARKS`] remain.
    pub fn marks(&self, interval: f64) -> Vec<f64> {
        if interval.is_nan() || interval <= 0.0 || self.is_inverted() {
            return Vec::new();
        }
        let start = self.min.floor();
        let end = self.max.floor();
        let span = end - start;
        if !span.is_finite() {
            return Vec::new();
        }

        let mut interval = interval;
        while (span / interval).floor() >= MAX_PAYLOAD_MARKS as f64 {
            interval *= 2.0;
        }
        let count = (span / interval).floor() as usize + 1;
        (0..count).map(|i| start + i as f64 * interval).collect()
    }
}

// ---------------------------------------------------------------------------
// Selection – current state of the two input controls
// ---------------------------------------------------------------------------

/// What the user has picked: a site (or "ALL") and a payload window.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: String,
    pub payload_range: PayloadRange,
}

impl Selection {
    /// Initial selection: every site, full payload range.
    pub fn full(dataset: &Dataset) -> Self {
        Selection {
            site: ALL_SITES.to_string(),
            payload_range: dataset.payload_bounds(),
        }
    }

    pub fn is_all_sites(&self) -> bool {
        self.site == ALL_SITES
    }
}

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// Exact, case-sensitive site match; "ALL" matches every row.
pub fn matches_site(record: &LaunchRecord, site: &str) -> bool {
    site == ALL_SITES || record.site == site
}

/// Return indices of launches passing both the site and the payload filter,
/// in dataset order.
pub fn filtered_indices(dataset: &Dataset, site: &str, range: &PayloadRange) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| matches_site(r, site) && range.contains(r.payload_mass_kg))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let range = PayloadRange::new(1000.0, 2000.0);
        assert!(range.contains(1000.0));
        assert!(range.contains(2000.0));
        assert!(!range.contains(999.9));
        assert!(!range.contains(2000.1));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let ds = sample_dataset();
        let range = PayloadRange::new(2000.0, 0.0);
        assert!(range.is_inverted());
        assert!(filtered_indices(&ds, ALL_SITES, &range).is_empty());
    }

    #[test]
    fn site_filter_is_exact_and_case_sensitive() {
        let ds = sample_dataset();
        let everything = PayloadRange::new(0.0, 10_000.0);
        assert_eq!(filtered_indices(&ds, "A", &everything), vec![0, 1]);
        assert!(filtered_indices(&ds, "a", &everything).is_empty());
        assert!(filtered_indices(&ds, "Nowhere", &everything).is_empty());
        assert_eq!(filtered_indices(&ds, ALL_SITES, &everything), vec![0, 1, 2]);
    }

    #[test]
    fn marks_follow_floor_of_bounds() {
        let range = PayloadRange::new(0.0, 9600.0);
        assert_eq!(range.marks(2000.0), vec![0.0, 2000.0, 4000.0, 6000.0, 8000.0]);

        let range = PayloadRange::new(362.5, 4362.0);
        assert_eq!(range.marks(2000.0), vec![362.0, 2362.0, 4362.0]);

        assert!(PayloadRange::new(5.0, 1.0).marks(2000.0).is_empty());
    }

    #[test]
    fn marks_stay_bounded_for_huge_payloads() {
        for max in [1e12, 1e300] {
            let marks = PayloadRange::new(0.0, max).marks(PAYLOAD_MARK_INTERVAL_KG);
            assert!(!marks.is_empty(), "max {max}");
            assert!(marks.len() <= MAX_PAYLOAD_MARKS, "max {max}: {} marks", marks.len());
            assert_eq!(marks[0], 0.0);
            assert!(marks.iter().all(|m| m.is_finite()));
        }
    }

    #[test]
    fn full_selection_covers_dataset() {
        let ds = sample_dataset();
        let sel = Selection::full(&ds);
        assert!(sel.is_all_sites());
        assert_eq!(sel.payload_range, ds.payload_bounds());
    }
}
