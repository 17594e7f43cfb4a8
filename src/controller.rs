use std::collections::{BTreeMap, BTreeSet};

use crate::chart::{self, ScatterChart};
use crate::data::filter::{filtered_indices, FilterParams, RadiusRange};
use crate::data::model::{Catalog, StarSize};

// ---------------------------------------------------------------------------
// Inputs, triggers and output slots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    RangeSlider,
    StarSelector,
    ApplyButton,
}

/// Which property of a control fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Value,
    Clicks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChartSlot {
    DistTemp,
    Celestial,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 2] = [ChartSlot::DistTemp, ChartSlot::Celestial];

    pub fn id(self) -> &'static str {
        match self {
            ChartSlot::DistTemp => "dist-temp-chart",
            ChartSlot::Celestial => "celestial-chart",
        }
    }
}

/// A user action reported by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RangeChanged(RadiusRange),
    StarSizesChanged(BTreeSet<StarSize>),
    ApplyClicked,
}

impl Event {
    pub fn source(&self) -> (Control, Trigger) {
        match self {
            Event::RangeChanged(_) => (Control::RangeSlider, Trigger::Value),
            Event::StarSizesChanged(_) => (Control::StarSelector, Trigger::Value),
            Event::ApplyClicked => (Control::ApplyButton, Trigger::Clicks),
        }
    }
}

// ---------------------------------------------------------------------------
// Registration table
// ---------------------------------------------------------------------------

pub type Render = fn(&Catalog, &[usize]) -> ScatterChart;

/// `(control, trigger)` re-renders `output` with the current control values.
#[derive(Clone, Copy)]
pub struct Binding {
    pub control: Control,
    pub trigger: Trigger,
    pub output: ChartSlot,
    pub render: Render,
}

/// The distance/temperature chart waits for Apply; the celestial chart
/// follows the slider and the selector directly.
pub const BINDINGS: &[Binding] = &[
    Binding {
        control: Control::ApplyButton,
        trigger: Trigger::Clicks,
        output: ChartSlot::DistTemp,
        render: chart::distance_temperature,
    },
    Binding {
        control: Control::RangeSlider,
        trigger: Trigger::Value,
        output: ChartSlot::Celestial,
        render: chart::celestial,
    },
    Binding {
        control: Control::StarSelector,
        trigger: Trigger::Value,
        output: ChartSlot::Celestial,
        render: chart::celestial,
    },
];

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Latest output of one chart slot.
#[derive(Debug, Clone)]
pub struct SlotOutput {
    pub chart: ScatterChart,
    /// Catalogue rows the chart was built from.
    pub rows: Vec<usize>,
}

/// Control state plus the latest chart per slot.
pub struct Controller {
    bindings: &'static [Binding],
    inputs: FilterParams,
    apply_clicks: u32,
    outputs: BTreeMap<ChartSlot, SlotOutput>,
}

impl Controller {
    /// Initial control values and one render of every bound slot.
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_bindings(catalog, BINDINGS)
    }

    pub fn with_bindings(catalog: &Catalog, bindings: &'static [Binding]) -> Self {
        let mut controller = Controller {
            bindings,
            inputs: FilterParams::initial(catalog),
            apply_clicks: 0,
            outputs: BTreeMap::new(),
        };

        let rows = filtered_indices(catalog, &controller.inputs);
        for slot in ChartSlot::ALL {
            if let Some(binding) = bindings.iter().find(|b| b.output == slot) {
                let chart = (binding.render)(catalog, &rows);
                controller.outputs.insert(
                    slot,
                    SlotOutput {
                        chart,
                        rows: rows.clone(),
                    },
                );
            }
        }
        controller
    }

    pub fn inputs(&self) -> &FilterParams {
        &self.inputs
    }

    pub fn apply_clicks(&self) -> u32 {
        self.apply_clicks
    }

    pub fn output(&self, slot: ChartSlot) -> Option<&SlotOutput> {
        self.outputs.get(&slot)
    }

    /// Record the event's new control value, then run every binding for its
    /// source. Returns the slots that were re-rendered.
    pub fn dispatch(&mut self, catalog: &Catalog, event: Event) -> Vec<ChartSlot> {
        let (control, trigger) = event.source();

        match event {
            Event::RangeChanged(range) => self.inputs.radius = range,
            Event::StarSizesChanged(sizes) => self.inputs.star_sizes = sizes,
            Event::ApplyClicked => self.apply_clicks += 1,
        }

        let bindings = self.bindings;
        let mut rows: Option<Vec<usize>> = None;
        let mut updated = Vec::new();

        for binding in bindings
            .iter()
            .filter(|b| b.control == control && b.trigger == trigger)
        {
            if updated.contains(&binding.output) {
                continue;
            }
            let subset = rows.get_or_insert_with(|| filtered_indices(catalog, &self.inputs));
            let chart = (binding.render)(catalog, subset);
            self.outputs.insert(
                binding.output,
                SlotOutput {
                    chart,
                    rows: subset.clone(),
                },
            );
            updated.push(binding.output);
        }

        log::debug!(
            "{control:?}/{trigger:?} -> {updated:?} ({} rows)",
            rows.as_ref().map_or(0, Vec::len)
        );
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn catalog() -> Catalog {
        Catalog::from_records(
            vec![
                Record::sample(0.5, 0.5, 300.0),
                Record::sample(1.5, 1.0, 300.0),
                Record::sample(2.5, 1.0, 300.0),
                Record::sample(6.0, 2.0, 300.0),
                Record::sample(9.0, 2.0, 300.0),
            ],
            "test",
        )
    }

    fn rows(c: &Controller, slot: ChartSlot) -> Vec<usize> {
        c.output(slot).unwrap().rows.clone()
    }

    #[test]
    fn test_initial_render_fills_both_slots() {
        let cat = catalog();
        let c = Controller::new(&cat);
        assert_eq!(rows(&c, ChartSlot::DistTemp), vec![1, 2, 3]);
        assert_eq!(rows(&c, ChartSlot::Celestial), vec![1, 2, 3]);
        assert_eq!(c.output(ChartSlot::DistTemp).unwrap().chart.x_label, "TPLANET");
        assert_eq!(c.output(ChartSlot::Celestial).unwrap().chart.x_label, "RA");
        assert_eq!(c.apply_clicks(), 0);
    }

    #[test]
    fn test_slider_updates_only_celestial() {
        let cat = catalog();
        let mut c = Controller::new(&cat);
        let updated = c.dispatch(&cat, Event::RangeChanged(RadiusRange { min: 1.0, max: 3.0 }));
        assert_eq!(updated, vec![ChartSlot::Celestial]);
        assert_eq!(rows(&c, ChartSlot::Celestial), vec![1, 2]);
        assert_eq!(rows(&c, ChartSlot::DistTemp), vec![1, 2, 3]);
    }

    #[test]
    fn test_selector_updates_only_celestial() {
        let cat = catalog();
        let mut c = Controller::new(&cat);
        let sizes = [StarSize::Bigger].into_iter().collect();
        let updated = c.dispatch(&cat, Event::StarSizesChanged(sizes));
        assert_eq!(updated, vec![ChartSlot::Celestial]);
        assert_eq!(rows(&c, ChartSlot::Celestial), vec![3]);
        assert_eq!(rows(&c, ChartSlot::DistTemp), vec![1, 2, 3]);
    }

    #[test]
    fn test_apply_uses_values_captured_at_press_time() {
        let cat = catalog();
        let mut c = Controller::new(&cat);
        c.dispatch(&cat, Event::RangeChanged(RadiusRange { min: 0.0, max: 10.0 }));
        c.dispatch(&cat, Event::StarSizesChanged([StarSize::Similar].into_iter().collect()));

        let updated = c.dispatch(&cat, Event::ApplyClicked);
        assert_eq!(updated, vec![ChartSlot::DistTemp]);
        assert_eq!(rows(&c, ChartSlot::DistTemp), vec![1, 2]);
        assert_eq!(c.apply_clicks(), 1);

        // later control changes leave the gated chart alone until the next press
        c.dispatch(&cat, Event::StarSizesChanged(StarSize::SELECTABLE.into_iter().collect()));
        assert_eq!(rows(&c, ChartSlot::DistTemp), vec![1, 2]);
        assert_eq!(rows(&c, ChartSlot::Celestial), vec![0, 1, 2, 3, 4]);

        c.dispatch(&cat, Event::ApplyClicked);
        assert_eq!(rows(&c, ChartSlot::DistTemp), vec![0, 1, 2, 3, 4]);
        assert_eq!(c.apply_clicks(), 2);
    }

    #[test]
    fn test_empty_selection_empties_chart() {
        let cat = catalog();
        let mut c = Controller::new(&cat);
        c.dispatch(&cat, Event::StarSizesChanged(BTreeSet::new()));
        let out = c.output(ChartSlot::Celestial).unwrap();
        assert!(out.rows.is_empty());
        assert_eq!(out.chart.point_count(), 0);
    }

    #[test]
    fn test_shared_slot_rendered_once_per_event() {
        static DOUBLE: &[Binding] = &[
            Binding {
                control: Control::RangeSlider,
                trigger: Trigger::Value,
                output: ChartSlot::Celestial,
                render: chart::celestial,
            },
            Binding {
                control: Control::RangeSlider,
                trigger: Trigger::Value,
                output: ChartSlot::Celestial,
                render: chart::distance_temperature,
            },
        ];
        let cat = catalog();
        let mut c = Controller::with_bindings(&cat, DOUBLE);
        assert!(c.output(ChartSlot::DistTemp).is_none());
        let updated = c.dispatch(&cat, Event::RangeChanged(RadiusRange { min: 0.0, max: 2.0 }));
        assert_eq!(updated, vec![ChartSlot::Celestial]);
        assert_eq!(c.output(ChartSlot::Celestial).unwrap().chart.x_label, "RA");
    }

    #[test]
    fn test_event_sources_match_bindings() {
        for event in [
            Event::RangeChanged(RadiusRange { min: 0.0, max: 1.0 }),
            Event::StarSizesChanged(BTreeSet::new()),
            Event::ApplyClicked,
        ] {
            let (control, trigger) = event.source();
            assert!(BINDINGS
                .iter()
                .any(|b| b.control == control && b.trigger == trigger));
        }
    }
}
