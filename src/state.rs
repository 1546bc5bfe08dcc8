use std::path::Path;
use std::time::Instant;

use crate::carousel::Carousel;
use crate::config::AppConfig;
use crate::data::filter::{filtered_indices, query, result_summary, FilterCriteria};
use crate::data::model::{format_price, Catalog, PriceRecord, Selection};
use crate::report::{self, delivery, ReportError};

/// How many of the cheapest visible offers the banner cycles through.
pub const FEATURED_COUNT: usize = 5;

/// Transient message shown in the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Loaded price list; replaced only by opening another file.
    pub catalog: Catalog,

    /// Current text / city / state filter.
    pub criteria: FilterCriteria,

    /// Catalog indices passing the current filter, cheapest first.
    pub visible_indices: Vec<usize>,

    /// Rows ticked for export.
    pub selection: Selection,

    /// Status / error message shown in the UI.
    pub status_message: Option<Status>,

    /// Banner rotation.
    pub carousel: Carousel,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: Catalog) -> Self {
        let criteria = FilterCriteria::new("", &*config.default_city, &*config.default_state);
        let carousel = Carousel::new(config.rotation_interval(), Instant::now());
        let mut state = Self {
            config,
            catalog,
            criteria,
            visible_indices: Vec::new(),
            selection: Selection::default(),
            status_message: None,
            carousel,
        };
        state.refilter();
        state
    }

    /// Swap in a newly loaded catalog. The old selection refers to the old
    /// catalog, so it is dropped.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.selection.clear();
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.catalog, &self.criteria);
    }

    /// "N results found" / "No product found".
    pub fn summary(&self) -> String {
        result_summary(self.visible_indices.len())
    }

    pub fn toggle_selected(&mut self, index: usize) {
        self.selection.toggle(index);
    }

    pub fn selected_records(&self) -> Vec<&PriceRecord> {
        self.selection.resolve(&self.catalog)
    }

    /// The cheapest offers for the current criteria, for the banner.
    pub fn featured(&self) -> Vec<&PriceRecord> {
        let mut offers = query(&self.catalog, &self.criteria);
        offers.truncate(FEATURED_COUNT);
        offers
    }

    /// Banner text for the current carousel slot.
    pub fn banner_line(&self) -> Option<String> {
        let featured = self.featured();
        let slot = self.carousel.current(featured.len())?;
        let rec = featured[slot];
        Some(format!(
            "Best deal: {} {} at {} ({}) - R$ {}",
            rec.product,
            rec.unit,
            rec.place,
            rec.city,
            format_price(rec.price)
        ))
    }

    /// Advance the banner; returns `true` if it moved.
    pub fn tick_banner(&mut self, now: Instant) -> bool {
        let len = self.featured().len();
        self.carousel.tick(now, len)
    }

    /// `false` (with a notice) when there is nothing to export.
    pub fn require_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            self.report_failed(&ReportError::EmptySelection);
            return false;
        }
        true
    }

    /// Render the current selection.
    pub fn render_selection(&self) -> Result<Vec<u8>, ReportError> {
        if self.selection.is_empty() {
            return Err(ReportError::EmptySelection);
        }
        report::render(self.selected_records())
    }

    /// Render and write the report to `target`.
    ///
    /// Failures are recorded in `status_message`; returns whether the file
    /// was written.
    pub fn save_report(&mut self, target: &Path) -> bool {
        let result = self.render_selection().and_then(|bytes| {
            delivery::save_to_path(&bytes, target).map_err(ReportError::from)
        });
        match result {
            Ok(()) => {
                self.status_message = Some(Status::Info(format!("Saved {}", target.display())));
                true
            }
            Err(e) => {
                self.report_failed(&e);
                false
            }
        }
    }

    /// Render as a `data:` URI for opening in a browser.
    pub fn report_data_uri(&mut self) -> Option<String> {
        match self.render_selection() {
            Ok(bytes) => {
                self.status_message = None;
                Some(delivery::data_uri(&bytes))
            }
            Err(e) => {
                self.report_failed(&e);
                None
            }
        }
    }

    fn report_failed(&mut self, err: &ReportError) {
        match err {
            ReportError::EmptySelection => {
                self.status_message = Some(Status::Info(err.to_string()));
            }
            _ => {
                log::error!("Failed to generate report: {err}");
                self.status_message = Some(Status::Error(format!("Error: {err}")));
            }
        }
    }
}
