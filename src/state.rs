use std::collections::BTreeSet;

use crate::controller::{ChartSlot, Controller, Event};
use crate::data::filter::RadiusRange;
use crate::data::model::{Catalog, StarSize};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// The read-only table every view is computed from.
    pub catalog: Catalog,

    /// Control values and the latest output of each chart.
    pub controller: Controller,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the records table is shown below the charts.
    pub show_records: bool,

    /// Diagnostics line in the top bar.
    pub debug: bool,
}

impl AppState {
    pub fn new(catalog: Catalog, debug: bool) -> Self {
        let controller = Controller::new(&catalog);
        Self {
            catalog,
            controller,
            status_message: None,
            show_records: false,
            debug,
        }
    }

    /// Replace the catalogue and reset every control to its initial value.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.controller = Controller::new(&catalog);
        self.catalog = catalog;
        self.status_message = None;
    }

    /// Forward a UI event to the controller.
    pub fn dispatch(&mut self, event: Event) -> Vec<ChartSlot> {
        self.controller.dispatch(&self.catalog, event)
    }

    pub fn set_radius_range(&mut self, range: RadiusRange) {
        if self.controller.inputs().radius != range {
            self.dispatch(Event::RangeChanged(range));
        }
    }

    /// Toggle one star size in the selector.
    pub fn toggle_star_size(&mut self, size: StarSize) {
        let mut selected: BTreeSet<StarSize> = self.controller.inputs().star_sizes.clone();
        if !selected.remove(&size) {
            selected.insert(size);
        }
        self.dispatch(Event::StarSizesChanged(selected));
    }

    pub fn apply(&mut self) {
        self.dispatch(Event::ApplyClicked);
    }

    /// Rows currently behind a chart (empty before the first render).
    pub fn visible_rows(&self, slot: ChartSlot) -> &[usize] {
        self.controller
            .output(slot)
            .map(|out| out.rows.as_slice())
            .unwrap_or(&[])
    }
}
