use super::model::{Level, Record, StarSize, Status};

// ---------------------------------------------------------------------------
// Bucketing: fixed edges, right-closed intervals
// ---------------------------------------------------------------------------

/// Named numeric ranges `(edges[i], edges[i + 1]]`, one label per interval.
pub struct Bins<T: 'static> {
    edges: &'static [f64],
    labels: &'static [T],
}

impl<T: Copy> Bins<T> {
    /// Label of the interval containing `value`, or `None` when the value is
    /// at/below the lowest edge, above the highest, or NaN.
    pub fn classify(&self, value: f64) -> Option<T> {
        self.edges
            .windows(2)
            .zip(self.labels)
            .find(|(w, _)| value > w[0] && value <= w[1])
            .map(|(_, label)| *label)
    }
}

/// `RSTAR` in solar radii.
pub const STAR_SIZE_BINS: Bins<StarSize> = Bins {
    edges: &[0.0, 0.8, 1.2, 100.0],
    labels: &[StarSize::Small, StarSize::Similar, StarSize::Bigger],
};

/// `TPLANET` in kelvin.
pub const TEMP_BINS: Bins<Level> = Bins {
    edges: &[0.0, 200.0, 400.0, 500.0, 5000.0],
    labels: &[Level::Low, Level::Optimal, Level::High, Level::Extreme],
};

/// `RPLANET` in Earth radii.
pub const GRAVITY_BINS: Bins<Level> = Bins {
    edges: &[0.0, 0.5, 2.0, 4.0, 100.0],
    labels: &[Level::Low, Level::Optimal, Level::High, Level::Extreme],
};

pub fn star_size(rstar: f64) -> StarSize {
    STAR_SIZE_BINS.classify(rstar).unwrap_or(StarSize::Unknown)
}

pub fn temp_level(tplanet: f64) -> Level {
    TEMP_BINS.classify(tplanet).unwrap_or(Level::Unknown)
}

pub fn gravity_level(rplanet: f64) -> Level {
    GRAVITY_BINS.classify(rplanet).unwrap_or(Level::Unknown)
}

// ---------------------------------------------------------------------------
// Status rules
// ---------------------------------------------------------------------------

/// Combine temperature and gravity into a habitability status.
///
/// Rules run in a fixed order and a later rule only fills a status that is
/// still unset:
/// 1. optimal temp and optimal gravity → promising
/// 2. optimal temp and low/high gravity → chalenging
/// 3. optimal gravity and low/high temp → chalenging
/// 4. anything left → extreme
pub fn status(temp: Level, gravity: Level) -> Status {
    let mut status = None;

    if temp == Level::Optimal && gravity == Level::Optimal {
        status = Some(Status::Promising);
    }
    if status.is_none() && temp == Level::Optimal && matches!(gravity, Level::Low | Level::High) {
        status = Some(Status::Challenging);
    }
    if status.is_none() && gravity == Level::Optimal && matches!(temp, Level::Low | Level::High) {
        status = Some(Status::Challenging);
    }

    status.unwrap_or(Status::Extreme)
}

// ---------------------------------------------------------------------------
// Derived columns of one record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub star_size: StarSize,
    pub temp: Level,
    pub gravity: Level,
    pub status: Status,
}

impl Features {
    pub fn derive(record: &Record) -> Self {
        let temp = temp_level(record.tplanet);
        let gravity = gravity_level(record.rplanet);
        Features {
            star_size: star_size(record.rstar),
            temp,
            gravity,
            status: status(temp, gravity),
        }
    }
}
