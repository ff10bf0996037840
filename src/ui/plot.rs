use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::data::aggregate::{PieDatum, ScatterPoint};
use crate::data::model::Outcome;
use crate::state::AppState;

/// Arc resolution for pie wedges.
const ARC_STEP: f64 = TAU / 180.0;

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// Angular extent of one non-empty slice, in radians. Slices run clockwise
/// from twelve o'clock, so `end < start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge<'a> {
    pub label: &'a str,
    pub count: usize,
    pub start: f64,
    pub end: f64,
}

impl Wedge<'_> {
    pub fn mid_angle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Outline pieces of at most a quarter turn each, so every piece is a
    /// convex polygon (egui fills only those correctly).
    fn outlines(&self) -> Vec<Vec<[f64; 2]>> {
        let sweep = self.start - self.end;
        let pieces = (sweep / FRAC_PI_2 - 1e-9).ceil().max(1.0) as usize;
        let piece_sweep = sweep / pieces as f64;

        (0..pieces)
            .map(|p| {
                let from = self.start - p as f64 * piece_sweep;
                let steps = (piece_sweep / ARC_STEP).ceil().max(1.0) as usize;
                std::iter::once([0.0, 0.0])
                    .chain((0..=steps).map(|s| {
                        let a = from - piece_sweep * s as f64 / steps as f64;
                        [a.cos(), a.sin()]
                    }))
                    .collect()
            })
            .collect()
    }
}

/// Lay slices out proportionally to their counts. Zero-count slices get no
/// wedge; an all-zero pie gets none at all.
pub fn pie_wedges(data: &[PieDatum]) -> Vec<Wedge<'_>> {
    let total: usize = data.iter().map(|d| d.count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = FRAC_PI_2;
    data.iter()
        .filter(|d| d.count > 0)
        .map(|d| {
            let end = start - TAU * d.count as f64 / total as f64;
            let wedge = Wedge {
                label: &d.label,
                count: d.count,
                start,
                end,
            };
            start = end;
            wedge
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Render the success pie for the selected site.
pub fn pie_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let pie = &state.pie;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&pie.title);
    });

    if pie.total() == 0 {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("No launches recorded for this selection.");
            });
        });
        return;
    }

    let wedges = pie_wedges(&pie.data);
    Plot::new("success_pie")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            for wedge in &wedges {
                let color = state.pie_colors.color_for(wedge.label);
                for outline in wedge.outlines() {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(outline))
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                            .name(wedge.label),
                    );
                }

                let mid = wedge.mid_angle();
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    RichText::new(wedge.count.to_string())
                        .color(Color32::WHITE)
                        .strong(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter chart
// ---------------------------------------------------------------------------

/// The launch under the cursor: same outcome row, closest payload.
pub fn nearest_point(points: &[ScatterPoint], x: f64, y: f64) -> Option<&ScatterPoint> {
    let class = y.round();
    if (y - class).abs() > 0.15 {
        return None;
    }
    points
        .iter()
        .filter(|p| f64::from(p.outcome.class()) == class)
        .min_by(|a, b| {
            (a.payload_mass_kg - x)
                .abs()
                .total_cmp(&(b.payload_mass_kg - x).abs())
        })
}

/// Render the payload scatter for the current selection.
pub fn scatter_chart(ui: &mut Ui, state: &AppState) {
    let chart = &state.scatter;
    let style = chart.style;
    let bounds = state.payload_bounds;

    egui::Frame::default()
        .fill(style.paper_background)
        .inner_margin(8.0)
        .show(ui, |ui: &mut Ui| {
            ui.visuals_mut().extreme_bg_color = style.plot_background;
            ui.visuals_mut().override_text_color = Some(style.text_color);

            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(&chart.title);
            });

            let points = &chart.points;
            Plot::new("payload_scatter")
                .legend(Legend::default())
                .x_axis_label("Payload Mass (kg)")
                .y_axis_label("Launch Outcome")
                .include_x(bounds.min)
                .include_x(bounds.max)
                .include_y(-0.25)
                .include_y(1.25)
                .allow_boxed_zoom(true)
                .allow_drag(true)
                .allow_scroll(true)
                .allow_zoom(true)
                .label_formatter(move |_name, value| match nearest_point(points, value.x, value.y) {
                    Some(p) => format!(
                        "Payload: {:.0} kg\nOutcome: {}\nBooster Version: {}",
                        p.payload_mass_kg,
                        p.outcome.class(),
                        p.booster_version
                    ),
                    None => format!("Payload: {:.0} kg", value.x),
                })
                .show(ui, |plot_ui| {
                    let radius = style.size / 2.0;
                    for outcome in [Outcome::Failure, Outcome::Success] {
                        let coords: Vec<[f64; 2]> = points
                            .iter()
                            .filter(|p| p.outcome == outcome)
                            .map(|p| [p.payload_mass_kg, f64::from(outcome.class())])
                            .collect();
                        if coords.is_empty() {
                            continue;
                        }

                        // Border ring first, fill on top.
                        plot_ui.points(
                            Points::new(PlotPoints::new(coords.clone()))
                                .shape(MarkerShape::Circle)
                                .filled(true)
                                .radius(radius + style.border_width)
                                .color(style.border_color),
                        );
                        plot_ui.points(
                            Points::new(PlotPoints::new(coords))
                                .shape(MarkerShape::Circle)
                                .filled(true)
                                .radius(radius)
                                .color(chart.colors.color_for(outcome))
                                .name(outcome.class()),
                        );
                    }
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datum(label: &str, count: usize) -> PieDatum {
        PieDatum {
            label: label.to_string(),
            count,
        }
    }

    fn point(payload: f64, class: i64, booster: &str) -> ScatterPoint {
        ScatterPoint {
            payload_mass_kg: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_version: booster.to_string(),
        }
    }

    #[test]
    fn wedges_are_proportional_and_contiguous() {
        let data = [datum("A", 1), datum("B", 3)];
        let wedges = pie_wedges(&data);

        assert_eq!(wedges.len(), 2);
        assert!((wedges[0].start - FRAC_PI_2).abs() < 1e-12);
        assert!((wedges[0].start - wedges[0].end - TAU / 4.0).abs() < 1e-12);
        assert_eq!(wedges[0].end, wedges[1].start);
        assert!((wedges[1].end - (FRAC_PI_2 - TAU)).abs() < 1e-9);
    }

    #[test]
    fn zero_slices_are_skipped() {
        let data = [datum("Success", 0), datum("Failure", 5)];
        let wedges = pie_wedges(&data);
        assert_eq!(wedges.len(), 1);
        assert_eq!(wedges[0].label, "Failure");

        assert!(pie_wedges(&[datum("Success", 0), datum("Failure", 0)]).is_empty());
    }

    #[test]
    fn full_circle_is_split_into_convex_pieces() {
        let data = [datum("Only", 7)];
        let outlines = pie_wedges(&data)[0].outlines();
        assert_eq!(outlines.len(), 4);
        for outline in &outlines {
            assert_eq!(outline[0], [0.0, 0.0]);
            assert!(outline.len() >= 3);
        }
    }

    #[test]
    fn hover_picks_closest_launch_on_the_same_outcome_row() {
        let points = [
            point(500.0, 1, "B1"),
            point(1500.0, 0, "B2"),
            point(1000.0, 1, "B3"),
        ];
        assert_eq!(nearest_point(&points, 900.0, 1.02).unwrap().booster_version, "B3");
        assert_eq!(nearest_point(&points, 900.0, 0.05).unwrap().booster_version, "B2");
        assert!(nearest_point(&points, 900.0, 0.5).is_none());
        assert!(nearest_point(&[], 900.0, 1.0).is_none());
    }
}
