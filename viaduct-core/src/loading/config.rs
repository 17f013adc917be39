use std::path::PathBuf;

use crate::Error;

/// Location of the CSV dataset to load.
///
/// The directory is expected to contain `lines.csv`, `stops.csv`,
/// `line_stops.csv`, `trips.csv` and `stop_events.csv`.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub data_dir: PathBuf,
}

impl DatasetConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !self.data_dir.is_dir() {
            return Err(Error::InvalidData(format!(
                "dataset directory not found: {}",
                self.data_dir.display()
            )));
        }
        Ok(())
    }

    pub(crate) fn file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}
