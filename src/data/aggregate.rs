//! Chart aggregates derived from the launch table and the current selection.
//!
//! Every function here is a pure scan over the dataset: no errors, no state,
//! identical inputs always give identical outputs.

use std::collections::HashMap;

use crate::color::{MarkerStyle, OutcomeColors};

use super::filter::{filtered_indices, matches_site, PayloadRange};
use super::model::{Dataset, Outcome, ALL_SITES};

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// One pie slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieDatum {
    pub label: String,
    pub count: usize,
}

impl PieDatum {
    fn new(label: &str, count: usize) -> Self {
        PieDatum {
            label: label.to_string(),
            count,
        }
    }
}

/// Pie slices.
///
/// * `"ALL"`: one slice per distinct site (first-occurrence order) whose count
///   is that site's number of *successful* launches.
/// * any other value: exactly `[Success, Failure]` counts for that site. A site
///   with no rows yields two zero counts.
pub fn compute_pie_data(dataset: &Dataset, site: &str) -> Vec<PieDatum> {
    if site == ALL_SITES {
        let mut successes: HashMap<&str, usize> = HashMap::new();
        for r in dataset.records() {
            if r.outcome.is_success() {
                *successes.entry(r.site.as_str()).or_default() += 1;
            }
        }
        return dataset
            .sites()
            .into_iter()
            .map(|s| PieDatum::new(s, successes.get(s).copied().unwrap_or(0)))
            .collect();
    }

    let (total, success) = dataset
        .records()
        .iter()
        .filter(|r| matches_site(r, site))
        .fold((0usize, 0usize), |(total, success), r| {
            (total + 1, success + usize::from(r.outcome.is_success()))
        });

    vec![
        PieDatum::new(Outcome::Success.label(), success),
        PieDatum::new(Outcome::Failure.label(), total - success),
    ]
}

pub fn pie_title(site: &str) -> String {
    if site == ALL_SITES {
        "Success rates for launch sites".to_string()
    } else {
        format!("Success vs Failure for {site}")
    }
}

/// Pie slices plus the title the renderer shows above them.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub data: Vec<PieDatum>,
}

impl PieChart {
    pub fn for_site(dataset: &Dataset, site: &str) -> Self {
        PieChart {
            title: pie_title(site),
            data: compute_pie_data(dataset, site),
        }
    }

    pub fn total(&self) -> usize {
        self.data.iter().map(|d| d.count).sum()
    }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Projection of a launch onto the scatter axes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version: String,
}

/// Everything the scatter renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub points: Vec<ScatterPoint>,
    pub colors: OutcomeColors,
    pub style: MarkerStyle,
}

pub fn scatter_title(site: &str) -> String {
    format!("Payload vs. Success for {site}")
}

/// Launches at `site` (or every site for "ALL") whose payload lies in `range`,
/// in dataset order. An unknown site or an inverted range gives no points.
pub fn compute_scatter_data(dataset: &Dataset, site: &str, range: &PayloadRange) -> ScatterChart {
    let records = dataset.records();
    let points = filtered_indices(dataset, site, range)
        .into_iter()
        .map(|i| {
            let r = &records[i];
            ScatterPoint {
                payload_mass_kg: r.payload_mass_kg,
                outcome: r.outcome,
                booster_version: r.booster_version.clone(),
            }
        })
        .collect();

    ScatterChart {
        title: scatter_title(site),
        points,
        colors: OutcomeColors::default(),
        style: MarkerStyle::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, sample_dataset};

    fn payloads(chart: &ScatterChart) -> Vec<f64> {
        chart.points.iter().map(|p| p.payload_mass_kg).collect()
    }

    #[test]
    fn all_mode_counts_successes_per_site() {
        let ds = sample_dataset();
        assert_eq!(
            compute_pie_data(&ds, ALL_SITES),
            vec![PieDatum::new("A", 1), PieDatum::new("B", 1)]
        );
    }

    #[test]
    fn all_mode_keeps_sites_without_successes() {
        let ds = Dataset::from_records(vec![
            record("X", 10.0, 0, "B1"),
            record("Y", 20.0, 1, "B2"),
            record("Y", 30.0, 1, "B3"),
        ])
        .unwrap();
        assert_eq!(
            compute_pie_data(&ds, ALL_SITES),
            vec![PieDatum::new("X", 0), PieDatum::new("Y", 2)]
        );
    }

    #[test]
    fn all_mode_includes_a_site_recorded_as_all() {
        let ds = Dataset::from_records(vec![
            record("ALL", 100.0, 1, "B1"),
            record("X", 200.0, 1, "B2"),
        ])
        .unwrap();
        let pie = compute_pie_data(&ds, ALL_SITES);
        assert_eq!(pie, vec![PieDatum::new("ALL", 1), PieDatum::new("X", 1)]);

        let successes = compute_scatter_data(&ds, ALL_SITES, &ds.payload_bounds())
            .points
            .iter()
            .filter(|p| p.outcome.is_success())
            .count();
        assert_eq!(pie.iter().map(|d| d.count).sum::<usize>(), successes);
    }

    #[test]
    fn single_site_is_success_then_failure() {
        let ds = sample_dataset();
        assert_eq!(
            compute_pie_data(&ds, "A"),
            vec![PieDatum::new("Success", 1), PieDatum::new("Failure", 1)]
        );
    }

    #[test]
    fn single_site_counts_sum_to_site_rows() {
        let ds = Dataset::from_records(vec![
            record("A", 1.0, 1, "B"),
            record("B", 2.0, 0, "B"),
            record("A", 3.0, 0, "B"),
            record("A", 4.0, 1, "B"),
            record("B", 5.0, 1, "B"),
        ])
        .unwrap();
        for site in ds.sites() {
            let rows = ds.records().iter().filter(|r| r.site == site).count();
            let chart = PieChart::for_site(&ds, site);
            assert_eq!(chart.total(), rows, "site {site}");
        }
    }

    #[test]
    fn unknown_site_gives_zero_counts() {
        let ds = sample_dataset();
        assert_eq!(
            compute_pie_data(&ds, "Mars"),
            vec![PieDatum::new("Success", 0), PieDatum::new("Failure", 0)]
        );
        assert!(compute_scatter_data(&ds, "Mars", &ds.payload_bounds())
            .points
            .is_empty());
    }

    #[test]
    fn pie_titles() {
        let ds = sample_dataset();
        assert_eq!(PieChart::for_site(&ds, ALL_SITES).title, "Success rates for launch sites");
        assert_eq!(PieChart::for_site(&ds, "A").title, "Success vs Failure for A");
    }

    #[test]
    fn scatter_all_over_full_bounds_returns_every_row_in_order() {
        let ds = sample_dataset();
        let chart = compute_scatter_data(&ds, ALL_SITES, &ds.payload_bounds());
        assert_eq!(payloads(&chart), vec![500.0, 1500.0, 1000.0]);

        let chart = compute_scatter_data(&ds, ALL_SITES, &PayloadRange::new(0.0, 2000.0));
        assert_eq!(chart.points.len(), 3);
        assert_eq!(chart.title, "Payload vs. Success for ALL");
    }

    #[test]
    fn scatter_filters_by_site_and_payload() {
        let ds = sample_dataset();
        let chart = compute_scatter_data(&ds, "A", &PayloadRange::new(1000.0, 2000.0));
        assert_eq!(
            chart.points,
            vec![ScatterPoint {
                payload_mass_kg: 1500.0,
                outcome: Outcome::Failure,
                booster_version: "F9 v1.1".to_string(),
            }]
        );
        assert_eq!(chart.title, "Payload vs. Success for A");
    }

    #[test]
    fn scatter_with_inverted_range_is_empty() {
        let ds = sample_dataset();
        for site in [ALL_SITES, "A", "B"] {
            let chart = compute_scatter_data(&ds, site, &PayloadRange::new(2000.0, 0.0));
            assert!(chart.points.is_empty(), "site {site}");
        }
    }

    #[test]
    fn scatter_carries_fixed_presentation() {
        let ds = sample_dataset();
        let chart = compute_scatter_data(&ds, "B", &ds.payload_bounds());
        assert_eq!(chart.colors, OutcomeColors::default());
        assert_eq!(chart.style.size, 10.0);
        assert_eq!(chart.style.border_width, 1.0);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let ds = sample_dataset();
        let range = PayloadRange::new(400.0, 1200.0);
        assert_eq!(compute_pie_data(&ds, ALL_SITES), compute_pie_data(&ds, ALL_SITES));
        assert_eq!(compute_pie_data(&ds, "A"), compute_pie_data(&ds, "A"));
        assert_eq!(
            compute_scatter_data(&ds, "A", &range),
            compute_scatter_data(&ds, "A", &range)
        );
    }
}
