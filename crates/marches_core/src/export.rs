//! Export of the full collection as a pretty-printed JSON file.

use chrono::{NaiveDate, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

use crate::model::marche::Marche;

/// Export failure: serialization or the file write itself.
#[derive(Debug)]
pub enum ExportError {
    Serialize(serde_json::Error),
    Io(io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize export: {err}"),
            Self::Io(err) => write!(f, "failed to write export file: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<io::Error> for ExportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Serializes the full collection as pretty-printed UTF-8 JSON.
pub fn export_json(marches: &[Marche]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(marches)?)
}

/// File name for an export taken on the given calendar date:
/// `marches_publics_<ISO-date>.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("marches_publics_{}.json", date.format("%Y-%m-%d"))
}

/// File name for an export taken today (UTC).
pub fn default_export_file_name() -> String {
    export_file_name(Utc::now().date_naive())
}

/// Writes the collection export to the given path.
pub fn export_to_file(path: impl AsRef<Path>, marches: &[Marche]) -> Result<(), ExportError> {
    let json = export_json(marches)?;
    fs::write(path, json)?;
    Ok(())
}
