//! Query parameter resolution: defaults, then the TOML config file,
//! then individual command-line overrides.

use std::fs;
use std::path::Path;

use viaduct_core::Error;
use viaduct_core::query::QueryParams;

use crate::Args;

pub(crate) fn resolve_params(args: &Args) -> Result<QueryParams, Error> {
    let mut params = match &args.config {
        Some(path) => read_config(path)?,
        None => QueryParams::default(),
    };

    if let Some(line) = &args.line {
        params.line_name = line.clone();
    }
    if let Some(trip) = &args.trip {
        params.trip_id = trip.clone();
    }
    if !args.stops.is_empty() {
        params.target_stops = args.stops.clone();
    }
    Ok(params)
}

fn read_config(path: &Path) -> Result<QueryParams, Error> {
    let raw = fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("failed to read config '{}': {e}", path.display()),
        )
    })?;
    toml::from_str(&raw)
        .map_err(|e| Error::InvalidData(format!("config '{}': {e}", path.display())))
}
