use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};

use super::error::DataError;
use super::model::{Instrument, SessionRecord, SessionTable};
use crate::config::{self, DASHBOARD};

const SESSION_DATE: &str = "session_date";
const DAY_OF_WEEK: &str = "day_of_week";
/// Derived from `session_date`; a stored copy in the file is ignored.
const DATE: &str = "date";

/// Legacy header → canonical header. Applied only when the canonical name is absent.
const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("odr_to_rdr_model", "podr_to_rdr_model"),
    ("day_type", "full_day_type"),
];

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Something that can produce the session table for an instrument.
pub trait DatasetSource {
    /// Human readable location, used in log lines and error context.
    fn location(&self, instrument: Instrument) -> String;

    fn fetch(&self, instrument: Instrument) -> Result<SessionTable>;
}

/// Fetches `{base_url}/{symbol}_Full_Day_...csv` over HTTPS.
pub struct HttpSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DASHBOARD.dataset.http_timeout_secs))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

impl DatasetSource for HttpSource {
    fn location(&self, instrument: Instrument) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            config::dataset_filename(instrument.as_ref())
        )
    }

    fn fetch(&self, instrument: Instrument) -> Result<SessionTable> {
        let url = self.location(instrument);
        let body = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("non-success status from {url}"))?
            .bytes()
            .with_context(|| format!("reading body of {url}"))?;

        parse_csv(body.as_ref()).with_context(|| format!("parsing {url}"))
    }
}

/// Reads the same file layout from a local directory.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, instrument: Instrument) -> PathBuf {
        self.dir
            .join(config::dataset_filename(instrument.as_ref()))
    }
}

impl DatasetSource for DirectorySource {
    fn location(&self, instrument: Instrument) -> String {
        self.path_for(instrument).display().to_string()
    }

    fn fetch(&self, instrument: Instrument) -> Result<SessionTable> {
        load_file(&self.path_for(instrument))
    }
}

/// Pick the source from the environment: a local directory if
/// `DAILY_CYCLES_DATA_DIR` is set, otherwise the remote host.
pub fn source_from_env() -> Result<Box<dyn DatasetSource>> {
    match config::data_dir() {
        Some(dir) => {
            log::info!("Reading datasets from local directory {}", dir.display());
            Ok(Box::new(DirectorySource::new(dir)))
        }
        None => Ok(Box::new(HttpSource::new(config::base_url())?)),
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Load a dataset CSV from disk.
pub fn load_file(path: &Path) -> Result<SessionTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    parse_csv(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse a session CSV.
///
/// Required: a `session_date` column. `day_of_week` is parsed when present
/// and derived from the date when blank or unrecognised. Every other column is kept as a
/// nullable categorical string; blank and `NaN` cells become null while the
/// literal `None` is preserved.
pub fn parse_csv<R: Read>(reader: R) -> Result<SessionTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = normalize_headers(
        reader
            .headers()
            .context("reading CSV headers")?
            .iter()
            .map(|h| h.to_string())
            .collect(),
    );

    let date_idx = headers
        .iter()
        .position(|h| h == SESSION_DATE)
        .ok_or_else(|| DataError::MissingColumn(SESSION_DATE.to_string()))?;
    let dow_idx = headers.iter().position(|h| h == DAY_OF_WEEK);

    let categorical: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !matches!(h.as_str(), SESSION_DATE | DAY_OF_WEEK | DATE) && !h.is_empty())
        .map(|(i, h)| (i, h.clone()))
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let raw_date = record.get(date_idx).unwrap_or("");
        let session_date = parse_session_date(raw_date).ok_or_else(|| DataError::InvalidDate {
            row: row_no,
            value: raw_date.to_string(),
        })?;

        let day_of_week = match dow_idx.and_then(|i| record.get(i)).and_then(cell_value) {
            Some(raw) => Weekday::from_str(&raw).unwrap_or_else(|_| {
                log::warn!("CSV row {row_no}: unknown weekday '{raw}', using {session_date}");
                session_date.weekday()
            }),
            None => session_date.weekday(),
        };

        let fields: BTreeMap<String, Option<String>> = categorical
            .iter()
            .map(|(i, name)| (name.clone(), record.get(*i).and_then(cell_value)))
            .collect();

        rows.push(SessionRecord {
            session_date,
            day_of_week,
            fields,
        });
    }

    let columns = categorical.into_iter().map(|(_, name)| name).collect();
    Ok(SessionTable::new(columns, rows))
}

fn normalize_headers(mut headers: Vec<String>) -> Vec<String> {
    for (alias, canonical) in COLUMN_ALIASES {
        if headers.iter().any(|h| h == canonical) {
            continue;
        }
        if let Some(h) = headers.iter_mut().find(|h| h.as_str() == *alias) {
            log::debug!("Renaming column '{alias}' to '{canonical}'");
            *h = canonical.to_string();
        }
    }
    headers
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component, or `MM/DD/YYYY`.
fn parse_session_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(prefix) = s.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(d);
        }
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}

fn cell_value(s: &str) -> Option<String> {
    let s = s.trim();
    match s {
        "" | "nan" | "NaN" | "NaT" | "null" | "NULL" => None,
        other => Some(other.to_string()),
    }
}
