use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::controller::ChartSlot;
use crate::data::model::StarSize;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Filter row – radius slider, star-size selector, Apply
// ---------------------------------------------------------------------------

/// Render the controls above the charts.
pub fn filter_bar(ui: &mut Ui, state: &mut AppState) {
    let (lo, hi) = state.catalog.radius_bounds().unwrap_or((0.0, 0.0));
    let current = state.controller.inputs().radius;
    let mut range = current;

    ui.horizontal(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label("Select planet radius range");
            let mut min = current.min;
            let mut max = current.max;
            let min_changed = ui
                .add(
                    egui::Slider::new(&mut min, lo..=hi)
                        .text("min")
                        .max_decimals(2),
                )
                .changed();
            let max_changed = ui
                .add(
                    egui::Slider::new(&mut max, lo..=hi)
                        .text("max")
                        .max_decimals(2),
                )
                .changed();
            // each thumb stops at the other one
            if min_changed {
                range = range.with_min(min);
            }
            if max_changed {
                range = range.with_max(max);
            }
        });

        ui.add_space(40.0);

        ui.vertical(|ui: &mut Ui| {
            ui.label("Choose star size");
            let selected = &state.controller.inputs().star_sizes;
            let summary = if selected.is_empty() {
                "none".to_string()
            } else {
                selected
                    .iter()
                    .map(|s| s.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            let mut toggled = None;
            egui::ComboBox::from_id_salt("star-selector")
                .selected_text(summary)
                .width(200.0)
                .show_ui(ui, |ui: &mut Ui| {
                    for size in StarSize::SELECTABLE {
                        let mut checked = selected.contains(&size);
                        if ui.checkbox(&mut checked, size.label()).changed() {
                            toggled = Some(size);
                        }
                    }
                });
            if let Some(size) = toggled {
                state.toggle_star_size(size);
            }
        });

        ui.add_space(40.0);

        if ui.button("Apply").clicked() {
            state.apply();
        }
    });

    state.set_radius_range(range);
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
            if ui.button("Export visible…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} planets loaded, {} visible",
            state.catalog.len(),
            state.visible_rows(ChartSlot::Celestial).len()
        ));

        ui.separator();

        if ui.selectable_label(state.show_records, "Records").clicked() {
            state.show_records = !state.show_records;
        }

        if state.debug {
            ui.separator();
            ui.label(
                RichText::new(format!(
                    "source: {} | dropped: {} | apply clicks: {}",
                    state.catalog.source,
                    state.catalog.dropped,
                    state.controller.apply_clicks()
                ))
                .weak(),
            );
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Records table – rows behind the celestial chart
// ---------------------------------------------------------------------------

const RECORD_COLUMNS: [&str; 12] = [
    "KOI", "RPLANET", "TPLANET", "RSTAR", "A", "RA", "DEC", "PER", "StarSize", "temp", "gravity",
    "status",
];

pub fn records_table(ui: &mut Ui, state: &AppState) {
    let rows = state.visible_rows(ChartSlot::Celestial);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0), RECORD_COLUMNS.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in RECORD_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let Some(planet) = state.catalog.get(rows[row.index()]) else {
                    return;
                };
                let r = &planet.record;
                let f = &planet.features;
                let cells = [
                    r.koi.map(|k| format!("{k:.2}")).unwrap_or_default(),
                    fmt_value(r.rplanet),
                    fmt_value(r.tplanet),
                    fmt_value(r.rstar),
                    fmt_value(r.a),
                    fmt_value(r.ra),
                    fmt_value(r.dec),
                    fmt_value(r.per),
                    f.star_size.to_string(),
                    f.temp.to_string(),
                    f.gravity.to_string(),
                    f.status.to_string(),
                ];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        format!("{v:.3}")
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open catalogue snapshot")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(catalog) => {
                log::info!("Loaded {} planets from {}", catalog.len(), path.display());
                state.set_catalog(catalog);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export visible planets")
        .set_file_name("kepler_visible.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        let rows = state.visible_rows(ChartSlot::Celestial);
        match crate::data::export::export_csv(&path, &state.catalog, rows) {
            Ok(n) => state.status_message = Some(format!("Exported {n} rows")),
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
