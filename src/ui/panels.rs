use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::HEADING;
use crate::data::filter::PAYLOAD_MARK_INTERVAL_KG;
use crate::export::{write_json, ChartExport};
use crate::state::AppState;

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";

/// Slider step, counted from the lower bound.
const PAYLOAD_STEP_KG: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Heading
// ---------------------------------------------------------------------------

pub fn heading(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(DASHBOARD_TITLE).size(40.0).color(HEADING));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – site dropdown and payload range
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch Site");
    ui.separator();

    let mut picked: Option<String> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(state.selection.site.clone())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(egui::TextEdit::singleline(&mut state.site_query).hint_text("select site"));
            ui.separator();
            for option in state.matching_site_options() {
                if ui
                    .selectable_label(state.selection.site == option.value, &option.label)
                    .clicked()
                {
                    picked = Some(option.value.clone());
                }
            }
        });
    if let Some(site) = picked {
        state.select_site(&site);
    }

    ui.add_space(12.0);
    ui.strong("Payload range (Kg):");
    ui.separator();

    let bounds = state.payload_bounds;
    let mut min = state.selection.payload_range.min;
    let mut max = state.selection.payload_range.max;

    if ui
        .add(egui::Slider::new(&mut min, bounds.min..=bounds.max).step_by(PAYLOAD_STEP_KG).text("min").suffix(" kg"))
        .changed()
    {
        state.set_payload_min(min);
    }
    if ui
        .add(egui::Slider::new(&mut max, bounds.min..=bounds.max).step_by(PAYLOAD_STEP_KG).text("max").suffix(" kg"))
        .changed()
    {
        state.set_payload_max(max);
    }

    let marks: Vec<String> = bounds
        .marks(PAYLOAD_MARK_INTERVAL_KG)
        .iter()
        .map(|m| format!("{m:.0}"))
        .collect();
    ui.label(RichText::new(marks.join(" · ")).small().weak());

    if ui.small_button("Full range").clicked() {
        state.reset_payload_range();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export chart data…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in view",
            state.dataset.len(),
            state.in_view()
        ))
        .on_hover_text(state.source().display().to_string());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – launches in view
// ---------------------------------------------------------------------------

pub fn launch_table(ui: &mut Ui, state: &AppState) {
    let points = &state.scatter.points;
    let scope = if state.selection.is_all_sites() {
        "all sites".to_string()
    } else {
        state.selection.site.clone()
    };
    ui.strong(format!("Launches in view – {scope} ({})", points.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(180.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Booster Version");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Outcome");
            });
        })
        .body(|body| {
            body.rows(18.0, points.len(), |mut row| {
                let p = &points[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(&p.booster_version);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", p.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(p.outcome.label());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} ({} sites)",
                    dataset.len(),
                    path.display(),
                    dataset.sites().len()
                );
                state.set_dataset(path, dataset);
            }
            Err(e) => {
                log::warn!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .set_file_name("chart_data.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        let export = ChartExport::new(&state.selection, &state.pie, &state.pie_colors, &state.scatter);
        if let Err(e) = write_json(&export, &path) {
            log::warn!("Chart export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
