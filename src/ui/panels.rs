use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::format_price;
use crate::report::delivery;
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Top bar – menu and filter inputs
// ---------------------------------------------------------------------------

/// Render the menu, the three filter fields and the result counter.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(format!("{} prices loaded", state.catalog.len()));

        if let Some(status) = &state.status_message {
            ui.separator();
            match status {
                Status::Info(msg) => ui.label(RichText::new(msg).color(Color32::LIGHT_BLUE)),
                Status::Error(msg) => ui.label(RichText::new(msg).color(Color32::RED)),
            };
        }
    });

    ui.add_space(4.0);

    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        changed |= ui
            .add(
                egui::TextEdit::singleline(&mut state.criteria.text)
                    .hint_text("Search product")
                    .desired_width(260.0),
            )
            .changed();

        changed |= ui
            .add(
                egui::TextEdit::singleline(&mut state.criteria.city)
                    .hint_text("City")
                    .desired_width(160.0),
            )
            .changed();
        ui.menu_button("▾", |ui: &mut Ui| {
            ScrollArea::vertical()
                .max_height(240.0)
                .show(ui, |ui: &mut Ui| {
                    for city in state.catalog.cities() {
                        if ui.button(city).clicked() {
                            state.criteria.city = city.clone();
                            changed = true;
                            ui.close_menu();
                        }
                    }
                });
        });

        changed |= ui
            .add(
                egui::TextEdit::singleline(&mut state.criteria.state)
                    .hint_text("State")
                    .desired_width(60.0),
            )
            .changed();
        ui.menu_button("▾", |ui: &mut Ui| {
            for uf in state.catalog.states() {
                if ui.button(uf).clicked() {
                    state.criteria.state = uf.clone();
                    changed = true;
                    ui.close_menu();
                }
            }
        });

        if ui.small_button("Clear filters").clicked() {
            state.criteria.text.clear();
            state.criteria.city.clear();
            state.criteria.state.clear();
            changed = true;
        }
    });

    if changed {
        state.refilter();
    }

    ui.label(RichText::new(state.summary()).italics().color(Color32::GRAY));
    ui.add_space(2.0);
}

// ---------------------------------------------------------------------------
// Right side panel – selection and export
// ---------------------------------------------------------------------------

/// Render the shopping list being built and the export buttons.
pub fn selection_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Shopping list");
    ui.label(format!("{} items selected", state.selection.len()));
    ui.separator();

    ui.horizontal_wrapped(|ui: &mut Ui| {
        if ui.button("Save PDF…").clicked() {
            if let Some(path) = save_file_dialog(state) {
                if state.save_report(&path) {
                    ui.ctx()
                        .open_url(egui::OpenUrl::new_tab(delivery::file_url(&path)));
                }
            }
        }
        if ui.button("Open in browser").clicked() {
            if let Some(uri) = state.report_data_uri() {
                ui.ctx().open_url(egui::OpenUrl::new_tab(uri));
            }
        }
        if ui.button("Clear").clicked() {
            state.selection.clear();
        }
    });
    ui.separator();

    let mut removed: Option<usize> = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for &idx in state.selection.indices() {
                let Some(rec) = state.catalog.get(idx) else {
                    continue;
                };
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("✕").clicked() {
                        removed = Some(idx);
                    }
                    ui.label(format!(
                        "{} {} – R$ {}",
                        rec.product,
                        rec.unit,
                        format_price(rec.price)
                    ));
                });
                if !rec.place.is_empty() {
                    ui.label(RichText::new(&rec.place).small().color(Color32::GRAY));
                }
            }
        });

    if let Some(idx) = removed {
        state.selection.remove(idx);
    }
}

// ---------------------------------------------------------------------------
// Bottom bar – rotating best-deal banner
// ---------------------------------------------------------------------------

pub fn banner(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| match state.banner_line() {
        Some(line) => {
            ui.label(RichText::new(line).strong());
        }
        None => {
            ui.label(RichText::new("No offers to highlight").weak());
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Ask where to save the report, starting in the configured export directory
/// with a timestamped name. `None` when nothing is selected or the dialog is
/// cancelled.
pub fn save_file_dialog(state: &mut AppState) -> Option<PathBuf> {
    if !state.require_selection() {
        return None;
    }
    rfd::FileDialog::new()
        .set_title("Save shopping list")
        .set_directory(&state.config.export_dir)
        .set_file_name(delivery::export_file_name(chrono::Local::now()))
        .add_filter("PDF", &["pdf"])
        .save_file()
}

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open price list")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(catalog) => {
                log::info!(
                    "Opened {} with {} records",
                    path.display(),
                    catalog.len()
                );
                state.config.data_file = path;
                state.set_catalog(catalog);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }
}
