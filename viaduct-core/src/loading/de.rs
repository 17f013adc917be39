use std::fs::File;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::Error;

/// Timestamp format used throughout the dataset, e.g. `2024-03-01 08:00:00`.
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Read a whole CSV file into typed rows.
///
/// Unlike a best-effort feed importer, a row that fails to deserialize
/// aborts the load: constraint checking downstream is only meaningful if
/// nothing was dropped on the way in.
pub(super) fn read_csv_file<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: for<'de> Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("failed to open file '{}': {e}", path.display()),
        )
    })?;
    let mut rows = Vec::new();
    for row in csv::Reader::from_reader(file).deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

pub(super) fn deserialize_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(serde::de::Error::custom)
}

/// An empty field means the vehicle has not arrived yet.
pub(super) fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.is_empty() {
        Ok(None)
    } else {
        NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
