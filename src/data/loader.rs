use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use reqwest::blocking::Client;
use serde_json::Value as JsonValue;

use super::model::{Catalog, Record};

/// Kepler catalogue endpoint of the asterank API.
pub const KEPLER_ENDPOINT: &str = "http://asterank.com/api/kepler";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the catalogue from a URL (`http://` / `https://`) or a local file.
pub fn load_source(source: &str) -> Result<Catalog> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_catalog(source)
    } else {
        load_file(Path::new(source))
    }
}

/// Fetch the catalogue with a single GET request.
///
/// The response body must be a JSON array of flat records.
pub fn fetch_catalog(url: &str) -> Result<Catalog> {
    let client = Client::builder()
        .user_agent(concat!("kepler-dash/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")?;

    log::info!("Fetching catalogue from {url}");
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("Catalogue request to {url} failed"))?;

    let text = response.text().context("Failed to read response body")?;
    let records = parse_json(&text)?;

    Ok(Catalog::from_records(records, url))
}

/// Load a catalogue snapshot from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – the feed's own shape: `[{ "RPLANET": 1.2, "PER": 3.5, ... }, ...]`
/// * `.csv`     – header row with the same upper-case column names
/// * `.parquet` – one numeric column per field
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)?
        }
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    Ok(Catalog::from_records(records, path.display().to_string()))
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

fn parse_json(text: &str) -> Result<Vec<Record>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let JsonValue::Array(rows) = root else {
        bail!("Expected top-level JSON array");
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            if !row.is_object() {
                bail!("Row {i} is not a JSON object");
            }
            serde_json::from_value(row).with_context(|| format!("Row {i}: invalid record"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Header names follow the feed (`RPLANET`, `TPLANET`, ...); empty cells and
/// absent columns read as NaN.
fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    reader
        .deserialize::<Record>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a Parquet snapshot.
///
/// Each record field is looked up by its feed name. Int/float columns of
/// 32 or 64 bits are accepted; nulls and absent columns read as NaN.
fn load_parquet(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let koi = numeric_column(&batch, "KOI")?;
        let rplanet = numeric_column(&batch, "RPLANET")?;
        let tplanet = numeric_column(&batch, "TPLANET")?;
        let rstar = numeric_column(&batch, "RSTAR")?;
        let a = numeric_column(&batch, "A")?;
        let ra = numeric_column(&batch, "RA")?;
        let dec = numeric_column(&batch, "DEC")?;
        let per = numeric_column(&batch, "PER")?;

        for row in 0..batch.num_rows() {
            let value = |col: Option<&ArrayRef>| {
                col.and_then(|c| extract_f64(c, row)).unwrap_or(f64::NAN)
            };
            records.push(Record {
                koi: koi.and_then(|c| extract_f64(c, row)),
                rplanet: value(rplanet),
                tplanet: value(tplanet),
                rstar: value(rstar),
                a: value(a),
                ra: value(ra),
                dec: value(dec),
                per: value(per),
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Look up a column by name; `None` when the file does not carry it.
fn numeric_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<Option<&'a ArrayRef>> {
    let Ok(idx) = batch.schema().index_of(name) else {
        return Ok(None);
    };
    let col = batch.column(idx);
    check_numeric(col.data_type()).with_context(|| format!("Parquet column '{name}'"))?;
    Ok(Some(col))
}

fn check_numeric(data_type: &DataType) -> Result<()> {
    match data_type {
        DataType::Float64 | DataType::Float32 | DataType::Int64 | DataType::Int32 => Ok(()),
        other => bail!("expected a numeric column, got {other:?}"),
    }
}

/// Read one cell of a numeric Arrow column as `f64`; `None` for nulls.
fn extract_f64(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Float64Array>() {
        Some(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        Some(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Some(arr.value(row) as f64)
    } else {
        any.downcast_ref::<Int32Array>()
            .map(|arr| arr.value(row) as f64)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::thread;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::model::{StarSize, Status};

    const FEED: &str = r#"[
        {"KOI": 1.01, "RPLANET": 1.5, "TPLANET": 300, "RSTAR": 1.0, "A": 0.9,
         "RA": 291.9, "DEC": 48.1, "PER": 120.5, "TSTAR": 5700, "MSTAR": 1.0},
        {"KOI": 2.01, "RPLANET": 16.4, "TPLANET": 2025, "RSTAR": 1.99, "A": 0.04,
         "RA": 286.8, "DEC": 49.3, "PER": 2.2},
        {"KOI": 3.01, "RPLANET": 4.8, "TPLANET": null, "RSTAR": 0.7, "A": 0.05,
         "RA": 297.7, "DEC": 48.0, "PER": -1},
        {"RPLANET": 0.4, "RSTAR": 0.6, "PER": 5.0}
    ]"#;

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    /// Answer exactly one HTTP request with `status` and `body`, returning
    /// the URL to request.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral");
        let addr = listener.local_addr().expect("local addr");

        thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut line = String::new();
            while reader.read_line(&mut line).expect("read request") > 0 {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .expect("write response");
        });

        format!("http://{addr}/api/kepler")
    }

    #[test]
    fn test_fetch_catalog_drops_bad_period() {
        let url = serve_once(
            "200 OK",
            r#"[{"RPLANET":1.5,"RSTAR":1.0,"TPLANET":300,"PER":3},{"PER":0}]"#,
        );
        let catalog = load_source(&url).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.dropped, 1);
        assert_eq!(catalog.source, url);
        assert_eq!(catalog.planets()[0].features.status, Status::Promising);
    }

    #[test]
    fn test_fetch_catalog_server_error() {
        let url = serve_once("500 Internal Server Error", "");
        let err = fetch_catalog(&url).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains(&format!("Catalogue request to {url} failed")), "{msg}");
    }

    #[test]
    fn test_fetch_catalog_rejects_object_body() {
        let url = serve_once("200 OK", r#"{"error": "rate limited"}"#);
        let err = fetch_catalog(&url).unwrap_err();
        assert!(format!("{err:#}").contains("top-level JSON array"));
    }

    #[test]
    fn test_parse_json_feed() {
        let records = parse_json(FEED).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].koi, Some(1.01));
        assert_eq!(records[0].tplanet, 300.0);
        assert!(records[2].tplanet.is_nan());
        assert!(records[3].tplanet.is_nan());
        assert!(records[3].a.is_nan());
        assert_eq!(records[3].koi, None);
    }

    #[test]
    fn test_json_rejects_non_array() {
        let err = parse_json(r#"{"RPLANET": 1.0}"#).unwrap_err();
        assert!(format!("{err:#}").contains("top-level JSON array"));
    }

    #[test]
    fn test_json_bad_row_names_index() {
        let err = parse_json(r#"[{"PER": 1.0}, {"PER": "soon"}]"#).unwrap_err();
        assert!(format!("{err:#}").contains("Row 1"));
        let err = parse_json(r#"[{"PER": 1.0}, 7]"#).unwrap_err();
        assert!(format!("{err:#}").contains("Row 1 is not a JSON object"));
    }

    #[test]
    fn test_load_json_file_enforces_period() {
        let file = temp_file(".json", FEED);
        let catalog = load_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.dropped, 1);
        assert!(catalog.planets().iter().all(|p| p.record.per > 0.0));
        assert_eq!(catalog.planets()[0].features.status, Status::Promising);
        assert_eq!(catalog.planets()[1].features.star_size, StarSize::Bigger);
    }

    #[test]
    fn test_load_source_treats_non_url_as_path() {
        let file = temp_file(".json", FEED);
        let source = file.path().display().to_string();
        let catalog = load_source(&source).unwrap();
        assert_eq!(catalog.source, source);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_load_csv_with_missing_cells() {
        let file = temp_file(
            ".csv",
            "KOI,RPLANET,TPLANET,RSTAR,A,RA,DEC,PER\n\
             1.01,1.5,300,1.0,0.9,291.9,48.1,120.5\n\
             2.01,0.3,,0.5,0.02,290.0,45.0,1.1\n\
             3.01,2.0,350,1.1,0.2,291.0,46.0,0\n",
        );
        let catalog = load_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.dropped, 1);
        assert!(catalog.planets()[1].record.tplanet.is_nan());
        assert_eq!(catalog.planets()[1].features.star_size, StarSize::Small);
    }

    #[test]
    fn test_load_parquet() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("RPLANET", DataType::Float64, true),
            Field::new("RSTAR", DataType::Float32, false),
            Field::new("TPLANET", DataType::Int64, false),
            Field::new("PER", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![Some(1.5), None, Some(3.0)])),
                Arc::new(Float32Array::from(vec![1.0, 0.5, 2.0])),
                Arc::new(Int64Array::from(vec![300, 250, 800])),
                Arc::new(Float64Array::from(vec![10.0, 4.0, -2.0])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let catalog = load_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.dropped, 1);
        let first = &catalog.planets()[0];
        assert_eq!(first.record.tplanet, 300.0);
        assert_eq!(first.features.status, Status::Promising);
        assert!(catalog.planets()[1].record.rplanet.is_nan());
        assert!(first.record.ra.is_nan());
    }

    #[test]
    fn test_unsupported_extension() {
        let file = temp_file(".txt", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
