use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        egui::TopBottomPanel::top("heading").show(ctx, |ui| {
            panels::heading(ui);
        });

        // ---- Left side panel: site + payload controls ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: launches in view ----
        egui::TopBottomPanel::bottom("launch_table")
            .resizable(true)
            .default_height(180.0)
            .show(ctx, |ui| {
                panels::launch_table(ui, &self.state);
            });

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let pie_height = (ui.available_height() * 0.45).max(160.0);
            plot::pie_chart(ui, &self.state, pie_height);
            ui.separator();
            plot::scatter_chart(ui, &self.state);
        });
    }
}
