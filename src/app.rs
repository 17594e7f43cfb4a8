use eframe::egui;

use crate::controller::ChartSlot;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct KeplerDashApp {
    pub state: AppState,
}

impl KeplerDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for KeplerDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Filter row ----
        egui::TopBottomPanel::top("filter_bar")
            .min_height(70.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                panels::filter_bar(ui, &mut self.state);
                ui.add_space(6.0);
            });

        // ---- Bottom panel: records table (optional) ----
        if self.state.show_records {
            egui::TopBottomPanel::bottom("records")
                .resizable(true)
                .default_height(220.0)
                .show(ctx, |ui| {
                    panels::records_table(ui, &self.state);
                });
        }

        // ---- Central panel: the two charts side by side ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let controller = &self.state.controller;
            ui.columns(2, |columns| {
                for (column, slot) in columns.iter_mut().zip(ChartSlot::ALL) {
                    plot::scatter_plot(column, slot, controller.output(slot));
                }
            });
        });
    }
}
