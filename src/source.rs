//! Record providers.
//!
//! Aggregation never reaches for a global dataset; callers hand it whatever
//! a [`RecordSource`] produced. Files (CSV or JSON, optionally gzipped),
//! HTTP endpoints and in-memory vectors are supported.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::record::ShipmentRecord;

/// Supplies the shipment records for one dashboard build.
pub trait RecordSource {
    /// Human-readable location, used in logs and error messages.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Vec<ShipmentRecord>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    /// Detects the format from a path or URL suffix, ignoring a trailing
    /// `.gz`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);

        if name.ends_with(".csv") {
            Some(Format::Csv)
        } else if name.ends_with(".json") {
            Some(Format::Json)
        } else {
            None
        }
    }
}

/// Parses records from any reader in the given format.
pub fn parse_records<R: Read>(reader: R, format: Format) -> Result<Vec<ShipmentRecord>> {
    match format {
        Format::Csv => {
            let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
            let mut records = Vec::new();

            for (idx, result) in rdr.deserialize().enumerate() {
                let record: ShipmentRecord =
                    result.with_context(|| format!("invalid CSV record at row {}", idx + 1))?;
                records.push(record);
            }

            Ok(records)
        }
        Format::Json => Ok(serde_json::from_reader(reader)?),
    }
}

/// Reads records from a local `.csv` / `.json` file, optionally `.gz`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_gzip(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
    }
}

impl RecordSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<ShipmentRecord>> {
        let name = self.path.to_string_lossy();
        let Some(format) = Format::from_name(&name) else {
            bail!("unsupported file type for {name}, expected .csv or .json (optionally .gz)");
        };

        let file = File::open(&self.path).with_context(|| format!("failed to open {name}"))?;
        let reader = BufReader::new(file);

        debug!(path = %name, ?format, gzip = self.is_gzip(), "Reading records from file");

        let records = if self.is_gzip() {
            parse_records(GzDecoder::new(reader), format)
        } else {
            parse_records(reader, format)
        };

        records.with_context(|| format!("failed to parse {name}"))
    }
}

/// Fetches records from an HTTP endpoint with a blocking GET.
///
/// The body is read as CSV when the URL ends in `.csv` or the server says
/// `text/csv`; JSON otherwise.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl RecordSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn load(&self) -> Result<Vec<ShipmentRecord>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let response = client
            .get(&self.url)
            .send()
            .with_context(|| format!("request to {} failed", self.url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!(status_error(&self.url, status, &body));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        let format = response_format(content_type, response.url().path());

        let bytes = response.bytes()?;
        debug!(bytes = bytes.len(), ?format, "Record payload received");

        parse_records(&bytes[..], format)
            .with_context(|| format!("failed to parse response from {}", self.url))
    }
}

/// Chooses how to parse an HTTP body: a `text/csv` content type wins, then
/// the URL path suffix, then JSON.
pub fn response_format(content_type: Option<&str>, path: &str) -> Format {
    let is_csv_body = content_type.is_some_and(|ct| {
        ct.trim_start()
            .to_ascii_lowercase()
            .starts_with("text/csv")
    });

    if is_csv_body {
        Format::Csv
    } else {
        Format::from_name(path).unwrap_or(Format::Json)
    }
}

fn status_error(url: &str, status: reqwest::StatusCode, body: &str) -> String {
    format!("{url} returned status {status}: {body}")
}

/// Serves a fixed, owned set of records.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<ShipmentRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<ShipmentRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.len())
    }

    fn load(&self) -> Result<Vec<ShipmentRecord>> {
        Ok(self.records.clone())
    }
}

/// Picks the source for a CLI location: URLs go over HTTP, anything else is
/// a file path.
pub fn source_for(location: &str) -> Box<dyn RecordSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(Path::new(location)))
    }
}

/// Loads and validates the records of `source`.
#[tracing::instrument(skip(source), fields(source = %source.describe()))]
pub fn load_dataset(source: &dyn RecordSource) -> Result<Dataset> {
    let records = source.load()?;
    let dataset = Dataset::ingest(records)
        .with_context(|| format!("invalid records in {}", source.describe()))?;

    info!(
        records = dataset.len(),
        unknown_statuses = dataset.unknown_statuses().total(),
        "Records loaded"
    );
    Ok(dataset)
}
