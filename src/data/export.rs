use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::{Catalog, Level, StarSize, Status};

/// One output row: the feed columns followed by the derived ones.
#[derive(Debug, Serialize)]
struct ExportRow {
    #[serde(rename = "KOI")]
    koi: Option<f64>,
    #[serde(rename = "RPLANET")]
    rplanet: f64,
    #[serde(rename = "TPLANET")]
    tplanet: f64,
    #[serde(rename = "RSTAR")]
    rstar: f64,
    #[serde(rename = "A")]
    a: f64,
    #[serde(rename = "RA")]
    ra: f64,
    #[serde(rename = "DEC")]
    dec: f64,
    #[serde(rename = "PER")]
    per: f64,
    #[serde(rename = "StarSize")]
    star_size: StarSize,
    temp: Level,
    gravity: Level,
    status: Status,
}

/// Write the given catalogue rows to a CSV file. Returns the row count.
pub fn export_csv(path: &Path, catalog: &Catalog, indices: &[usize]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut written = 0;
    for planet in indices.iter().filter_map(|&i| catalog.get(i)) {
        let r = &planet.record;
        let f = &planet.features;
        writer
            .serialize(ExportRow {
                koi: r.koi,
                rplanet: r.rplanet,
                tplanet: r.tplanet,
                rstar: r.rstar,
                a: r.a,
                ra: r.ra,
                dec: r.dec,
                per: r.per,
                star_size: f.star_size,
                temp: f.temp,
                gravity: f.gravity,
                status: f.status,
            })
            .with_context(|| format!("writing row {written}"))?;
        written += 1;
    }
    writer.flush().context("flushing CSV")?;

    log::info!("Exported {written} rows to {}", path.display());
    Ok(written)
}
