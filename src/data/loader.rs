use std::cell::OnceCell;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::model::{is_country_code, Dataset, Record, Table};

/// Columns the loader needs; any other column in the file is ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "iso_code",
    "location",
    "date",
    "total_cases",
    "new_cases",
    "total_deaths",
    "new_deaths",
    "total_vaccinations",
];

/// Accepted date layouts, tried in order after RFC 3339. Slash dates are
/// month-first.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y-%m-%d %H:%M:%S"];

/// Cell contents read as a missing value, on top of the empty cell.
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Anything that prevents the dataset from loading. Always fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: '{value}' is not a recognised date")]
    InvalidDate { row: usize, value: String },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file)
}

/// Parse OWID-style CSV from any reader, keeping only country rows.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(LoadError::MissingColumn(*missing));
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (i, row) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = row?;
        if !is_country_code(&raw.iso_code) {
            skipped += 1;
            continue;
        }
        records.push(raw.into_record(i + 1)?);
    }

    log::debug!(
        "Parsed {} country rows, skipped {skipped} aggregate rows",
        records.len()
    );
    Ok(Dataset::from_records(records))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(value, fmt).ok().or_else(|| {
            chrono::NaiveDateTime::parse_from_str(value, fmt)
                .ok()
                .map(|dt| dt.date())
        })
    })
}

/// Numeric cell: empty, an NA token, or a non-finite number is `None`.
fn metric_cell<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let cell = raw.trim();
    if cell.is_empty() || NA_TOKENS.contains(&cell) {
        return Ok(None);
    }
    let value: f64 = cell
        .parse()
        .map_err(|_| serde::de::Error::custom(format!("'{cell}' is not a number")))?;
    Ok(value.is_finite().then_some(value))
}

// -- Row model --

/// One CSV row as it appears on disk, before date coercion.
#[derive(Debug, Deserialize)]
struct RawRecord {
    iso_code: String,
    location: String,
    date: String,
    #[serde(deserialize_with = "metric_cell")]
    total_cases: Option<f64>,
    #[serde(deserialize_with = "metric_cell")]
    new_cases: Option<f64>,
    #[serde(deserialize_with = "metric_cell")]
    total_deaths: Option<f64>,
    #[serde(deserialize_with = "metric_cell")]
    new_deaths: Option<f64>,
    #[serde(deserialize_with = "metric_cell")]
    total_vaccinations: Option<f64>,
}

impl RawRecord {
    fn into_record(self, row: usize) -> Result<Record, LoadError> {
        let date = parse_date(&self.date).ok_or_else(|| LoadError::InvalidDate {
            row,
            value: self.date.clone(),
        })?;
        Ok(Record {
            entity_code: self.iso_code,
            entity_name: self.location,
            date,
            total_cases: self.total_cases,
            new_cases: self.new_cases,
            total_deaths: self.total_deaths,
            new_deaths: self.new_deaths,
            total_vaccinations: self.total_vaccinations,
        })
    }
}

// ---------------------------------------------------------------------------
// Process-wide cache
// ---------------------------------------------------------------------------

/// Write-once holder for the dataset: the file is parsed on the first
/// [`DatasetCache::load`] and every later call returns the same allocation.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached dataset, loading it on first access.
    pub fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(dataset) = self.cell.get() {
            return Ok(Arc::clone(dataset));
        }

        let dataset = load_file(&self.path)?;
        match dataset.date_bounds() {
            Some((min, max)) => log::info!(
                "Loaded {} rows for {} countries ({min} – {max}) from {}",
                dataset.len(),
                dataset.entity_names().len(),
                self.path.display()
            ),
            None => log::warn!("{} contains no country rows", self.path.display()),
        }

        Ok(Arc::clone(self.cell.get_or_init(|| Arc::new(dataset))))
    }
}
