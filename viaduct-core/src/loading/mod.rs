//! This module is responsible for loading a CSV transit dataset
//! and building a populated [`TransitStore`](crate::TransitStore).

mod config;
mod de;
mod loader;
mod raw_types;

pub use config::DatasetConfig;
pub use loader::load_dataset;

pub(crate) use de::DATETIME_FORMAT;
