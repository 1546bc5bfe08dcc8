use std::time::Instant;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BestPriceApp {
    pub state: AppState,
}

impl BestPriceApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for BestPriceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Banner rotation runs off the repaint clock ----
        let now = Instant::now();
        self.state.tick_banner(now);
        ctx.request_repaint_after(self.state.carousel.time_to_next(now));

        // ---- Top panel: menu bar and filters ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: best-deal banner ----
        egui::TopBottomPanel::bottom("banner").show(ctx, |ui| {
            panels::banner(ui, &self.state);
        });

        // ---- Right side panel: selection and export ----
        egui::SidePanel::right("selection_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::selection_panel(ui, &mut self.state);
            });

        // ---- Central panel: price table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::price_table(ui, &mut self.state);
        });
    }
}
