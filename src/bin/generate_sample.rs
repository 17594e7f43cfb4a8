use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Rows in the generated catalogue.
const N_PLANETS: usize = 600;

/// Every n-th row gets a non-positive period, like the glitches in the live feed.
const BAD_PERIOD_EVERY: usize = 97;

/// SplitMix64; reproducible output for a fixed seed.
struct SampleRng(u64);

impl SampleRng {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// `median * exp(sigma * z)` with `z` standard normal (Box-Muller).
    fn log_normal(&mut self, median: f64, sigma: f64) -> f64 {
        let u1 = self.next_f64().max(f64::MIN_POSITIVE);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        median * (sigma * z).exp()
    }
}

/// One synthetic planet/star pair.
struct Row {
    koi: f64,
    rplanet: f64,
    tplanet: f64,
    rstar: f64,
    a: f64,
    ra: f64,
    dec: f64,
    per: f64,
}

fn generate_row(i: usize, rng: &mut SampleRng) -> Row {
    let rstar = rng.log_normal(1.0, 0.35).clamp(0.2, 20.0);
    let per = rng.log_normal(15.0, 1.2).clamp(0.5, 1500.0);
    // Kepler's third law for a roughly solar-mass host, period in days → AU
    let a = (per / 365.25).powf(2.0 / 3.0);
    // Equilibrium temperature scales with sqrt(R*/a); 278 K at 1 AU around the Sun
    let tplanet = 278.0 * rstar.sqrt() / a.sqrt() * rng.uniform(0.9, 1.1);
    let rplanet = rng.log_normal(2.2, 0.8).clamp(0.3, 30.0);

    Row {
        koi: (i + 1) as f64 + 0.01,
        rplanet,
        tplanet,
        rstar,
        a,
        // Kepler field of view
        ra: rng.uniform(280.0, 302.0),
        dec: rng.uniform(36.5, 52.5),
        per: if i % BAD_PERIOD_EVERY == BAD_PERIOD_EVERY - 1 {
            -1.0
        } else {
            per
        },
    }
}

fn main() -> Result<()> {
    let mut rng = SampleRng(42);
    let rows: Vec<Row> = (0..N_PLANETS).map(|i| generate_row(i, &mut rng)).collect();

    let column = |f: fn(&Row) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from_iter_values(rows.iter().map(f)))
    };

    let names = ["KOI", "RPLANET", "TPLANET", "RSTAR", "A", "RA", "DEC", "PER"];
    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|n| Field::new(*n, DataType::Float64, false))
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            column(|r| r.koi),
            column(|r| r.rplanet),
            column(|r| r.tplanet),
            column(|r| r.rstar),
            column(|r| r.a),
            column(|r| r.ra),
            column(|r| r.dec),
            column(|r| r.per),
        ],
    )
    .context("Failed to create RecordBatch")?;

    // Write Parquet
    let output_path = "sample_catalog.parquet";
    let file = std::fs::File::create(output_path).context("Failed to create output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("Failed to create writer")?;
    writer.write(&batch).context("Failed to write batch")?;
    writer.close().context("Failed to close writer")?;

    println!(
        "Wrote {N_PLANETS} planets ({} with a bad period) to {output_path}",
        N_PLANETS / BAD_PERIOD_EVERY
    );
    println!("Open it with File → Open… or KEPLER_DASH_SOURCE={output_path}");
    Ok(())
}
