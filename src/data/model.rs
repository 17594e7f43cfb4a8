use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::derive::Features;

// ---------------------------------------------------------------------------
// Categorical columns
// ---------------------------------------------------------------------------

/// Star radius bucket (`StarSize` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StarSize {
    Small,
    Similar,
    Bigger,
    /// Radius outside every bin or missing.
    Unknown,
}

impl StarSize {
    /// The options offered by the star-size selector.
    pub const SELECTABLE: [StarSize; 3] = [StarSize::Small, StarSize::Similar, StarSize::Bigger];

    pub const ALL: [StarSize; 4] = [
        StarSize::Small,
        StarSize::Similar,
        StarSize::Bigger,
        StarSize::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StarSize::Small => "small",
            StarSize::Similar => "similar",
            StarSize::Bigger => "bigger",
            StarSize::Unknown => "unknown",
        }
    }
}

/// Four-level bucket shared by the `temp` and `gravity` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Optimal,
    High,
    Extreme,
    Unknown,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Optimal => "optimal",
            Level::High => "high",
            Level::Extreme => "extreme",
            Level::Unknown => "unknown",
        }
    }
}

/// Coarse habitability label derived from the temperature and gravity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Status {
    #[serde(rename = "promising")]
    Promising,
    /// Serialized with the catalogue's historical spelling.
    #[serde(rename = "chalenging")]
    Challenging,
    #[serde(rename = "extreme")]
    Extreme,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Promising, Status::Challenging, Status::Extreme];

    pub fn label(self) -> &'static str {
        match self {
            Status::Promising => "promising",
            Status::Challenging => "chalenging",
            Status::Extreme => "extreme",
        }
    }
}

impl fmt::Display for StarSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the catalogue feed
// ---------------------------------------------------------------------------

/// One catalogued planet/star pair, as served by the Kepler feed.
///
/// Numeric columns that are `null` or absent read as NaN, so every
/// comparison against them is false.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "KOI", default)]
    pub koi: Option<f64>,
    #[serde(rename = "RPLANET", default = "nan", deserialize_with = "nan_if_null")]
    pub rplanet: f64,
    #[serde(rename = "TPLANET", default = "nan", deserialize_with = "nan_if_null")]
    pub tplanet: f64,
    #[serde(rename = "RSTAR", default = "nan", deserialize_with = "nan_if_null")]
    pub rstar: f64,
    #[serde(rename = "A", default = "nan", deserialize_with = "nan_if_null")]
    pub a: f64,
    #[serde(rename = "RA", default = "nan", deserialize_with = "nan_if_null")]
    pub ra: f64,
    #[serde(rename = "DEC", default = "nan", deserialize_with = "nan_if_null")]
    pub dec: f64,
    #[serde(rename = "PER", default = "nan", deserialize_with = "nan_if_null")]
    pub per: f64,
}

fn nan() -> f64 {
    f64::NAN
}

fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[cfg(test)]
impl Record {
    /// A record with the three bucketed columns set and plausible filler
    /// for the rest.
    pub(crate) fn sample(rplanet: f64, rstar: f64, tplanet: f64) -> Self {
        Record {
            koi: None,
            rplanet,
            tplanet,
            rstar,
            a: 0.1,
            ra: 290.0,
            dec: 44.0,
            per: 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Planet / Catalog – the derived, read-only table
// ---------------------------------------------------------------------------

/// A retained record together with its derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub record: Record,
    pub features: Features,
}

/// The full table: records with `PER > 0` and their derived features.
#[derive(Debug, Clone)]
pub struct Catalog {
    planets: Vec<Planet>,
    /// Rows discarded for a non-positive or missing period.
    pub dropped: usize,
    /// Where the rows came from (URL or file path), for display.
    pub source: String,
}

impl Catalog {
    /// Drop rows violating `PER > 0`, then derive the categorical columns.
    pub fn from_records(records: Vec<Record>, source: impl Into<String>) -> Self {
        let total = records.len();
        let planets: Vec<Planet> = records
            .into_iter()
            .filter(|r| r.per > 0.0)
            .map(|record| Planet {
                features: Features::derive(&record),
                record,
            })
            .collect();
        let dropped = total - planets.len();
        let source = source.into();

        log::info!(
            "Catalogue from {source}: {} rows kept, {dropped} dropped (PER <= 0)",
            planets.len()
        );

        Catalog {
            planets,
            dropped,
            source,
        }
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn get(&self, index: usize) -> Option<&Planet> {
        self.planets.get(index)
    }

    /// Number of retained rows.
    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    /// Smallest and largest finite `RPLANET`, if any.
    pub fn radius_bounds(&self) -> Option<(f64, f64)> {
        self.planets
            .iter()
            .map(|p| p.record.rplanet)
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
