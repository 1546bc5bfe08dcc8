use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::format_price;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Price table (central panel)
// ---------------------------------------------------------------------------

const HEADERS: [&str; 8] = ["", "Product", "Brand", "Unit", "Price", "Place", "City", "State"];

/// Render the filtered offers, cheapest first, with a selection checkbox per row.
pub fn price_table(ui: &mut Ui, state: &mut AppState) {
    if state.catalog.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No prices loaded  (File → Open…)");
        });
        return;
    }
    if state.visible_indices.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(state.summary());
        });
        return;
    }

    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
    let visible = &state.visible_indices;
    let catalog = &state.catalog;
    let selection = &state.selection;
    let mut toggled: Option<usize> = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto())
        .column(Column::initial(180.0).at_least(80.0))
        .column(Column::initial(110.0))
        .column(Column::auto())
        .column(Column::auto().at_least(70.0))
        .column(Column::initial(150.0))
        .column(Column::initial(120.0))
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, visible.len(), |mut row| {
                let idx = visible[row.index()];
                let Some(rec) = catalog.get(idx) else {
                    return;
                };
                let mut checked = selection.contains(idx);
                row.col(|ui: &mut Ui| {
                    if ui.checkbox(&mut checked, "").changed() {
                        toggled = Some(idx);
                    }
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.product);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.brand);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.unit);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("R$ {}", format_price(rec.price)));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.place);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.city);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.state);
                });
            });
        });

    if let Some(idx) = toggled {
        state.toggle_selected(idx);
    }
}
