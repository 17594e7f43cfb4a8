use std::collections::BTreeSet;

use super::model::{Catalog, StarSize};

// ---------------------------------------------------------------------------
// Filter predicate: planet radius window + selected star sizes
// ---------------------------------------------------------------------------

/// Open interval on `RPLANET`: both ends are excluded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusRange {
    pub min: f64,
    pub max: f64,
}

impl RadiusRange {
    pub fn contains(&self, rplanet: f64) -> bool {
        rplanet > self.min && rplanet < self.max
    }

    /// The range after the lower thumb moved to `min`; it stops at `max`.
    pub fn with_min(self, min: f64) -> Self {
        RadiusRange {
            min: min.min(self.max),
            max: self.max,
        }
    }

    /// The range after the upper thumb moved to `max`; it stops at `min`.
    pub fn with_max(self, max: f64) -> Self {
        RadiusRange {
            min: self.min,
            max: max.max(self.min),
        }
    }
}

/// Control values the filter is evaluated with.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    pub radius: RadiusRange,
    pub star_sizes: BTreeSet<StarSize>,
}

impl FilterParams {
    /// Slider spanning the whole radius range, every star size selected.
    pub fn initial(catalog: &Catalog) -> Self {
        let (min, max) = catalog.radius_bounds().unwrap_or((0.0, 0.0));
        FilterParams {
            radius: RadiusRange { min, max },
            star_sizes: StarSize::SELECTABLE.into_iter().collect(),
        }
    }
}

/// Return indices of planets passing both predicates.
///
/// A planet passes when `min < RPLANET < max` and its star size is in
/// `star_sizes`. An empty selection therefore returns nothing.
pub fn filtered_indices(catalog: &Catalog, params: &FilterParams) -> Vec<usize> {
    catalog
        .planets()
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            params.radius.contains(p.record.rplanet)
                && params.star_sizes.contains(&p.features.star_size)
        })
        .map(|(i, _)| i)
        .collect()
}
