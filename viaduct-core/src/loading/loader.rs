use log::{info, warn};

use super::config::DatasetConfig;
use super::de::read_csv_file;
use super::raw_types::{RawLine, RawLineStop, RawStop, RawStopEvent, RawTrip};
use crate::Error;
use crate::model::TripId;
use crate::store::TransitStore;

/// Load a CSV dataset directory into a fresh store.
///
/// Rows that would repeat an already-loaded unique key are skipped with a
/// warning, matching the idempotent loading behaviour of the reference
/// dataset; every other constraint violation aborts the load.
///
/// # Errors
///
/// Returns an error if the directory or a file is missing, a row fails to
/// deserialize, or an inserted row violates a non-duplicate constraint.
pub fn load_dataset(config: &DatasetConfig) -> Result<TransitStore, Error> {
    config.validate()?;
    let mut store = TransitStore::new();

    let mut total = 0usize;
    total += load_lines(&mut store, read_csv_file(&config.file("lines.csv"))?)?;
    total += load_stops(&mut store, read_csv_file(&config.file("stops.csv"))?)?;
    total += load_line_stops(&mut store, read_csv_file(&config.file("line_stops.csv"))?)?;
    total += load_trips(&mut store, read_csv_file(&config.file("trips.csv"))?)?;
    total += load_stop_events(&mut store, read_csv_file(&config.file("stop_events.csv"))?)?;

    info!(
        "dataset loaded: {} rows ({} lines, {} stops, {} memberships, {} trips, {} stop events)",
        total,
        store.line_count(),
        store.stop_count(),
        store.line_stop_count(),
        store.trip_count(),
        store.stop_event_count()
    );
    Ok(store)
}

fn load_lines(store: &mut TransitStore, rows: Vec<RawLine>) -> Result<usize, Error> {
    let mut loaded = 0;
    for row in rows {
        if store.line_by_name(&row.line_name).is_some() {
            warn!("skipping duplicate line '{}'", row.line_name);
            continue;
        }
        store.add_line(&row.line_name, row.vehicle_type.parse()?)?;
        loaded += 1;
    }
    info!("loaded {loaded} rows from lines.csv");
    Ok(loaded)
}

fn load_stops(store: &mut TransitStore, rows: Vec<RawStop>) -> Result<usize, Error> {
    let mut loaded = 0;
    for row in rows {
        if store.stop_by_name(&row.stop_name).is_some() {
            warn!("skipping duplicate stop '{}'", row.stop_name);
            continue;
        }
        store.add_stop(&row.stop_name, row.latitude, row.longitude)?;
        loaded += 1;
    }
    info!("loaded {loaded} rows from stops.csv");
    Ok(loaded)
}

fn load_line_stops(store: &mut TransitStore, rows: Vec<RawLineStop>) -> Result<usize, Error> {
    let mut loaded = 0;
    for row in rows {
        let line_id = store
            .line_by_name(&row.line_name)
            .ok_or_else(|| Error::reference(format!("line '{}'", row.line_name)))?
            .id;
        let stop_id = store
            .stop_by_name(&row.stop_name)
            .ok_or_else(|| Error::reference(format!("stop '{}'", row.stop_name)))?
            .id;
        if store.has_line_stop(line_id, stop_id) {
            warn!(
                "skipping duplicate membership of '{}' on '{}'",
                row.stop_name, row.line_name
            );
            continue;
        }
        let sequence = non_negative(row.sequence, "sequence")?;
        let time_offset = non_negative(row.time_offset, "time_offset")?;
        store.add_line_stop(line_id, stop_id, sequence, time_offset)?;
        loaded += 1;
    }
    info!("loaded {loaded} rows from line_stops.csv");
    Ok(loaded)
}

fn load_trips(store: &mut TransitStore, rows: Vec<RawTrip>) -> Result<usize, Error> {
    let mut loaded = 0;
    for row in rows {
        let line_id = store
            .line_by_name(&row.line_name)
            .ok_or_else(|| Error::reference(format!("line '{}'", row.line_name)))?
            .id;
        if store.has_scheduled_run(line_id, row.scheduled_departure, &row.vehicle_id) {
            warn!("skipping duplicate scheduled run for trip '{}'", row.trip_id);
            continue;
        }
        store.add_trip(
            TripId::new(row.trip_id),
            line_id,
            row.scheduled_departure,
            &row.vehicle_id,
        )?;
        loaded += 1;
    }
    info!("loaded {loaded} rows from trips.csv");
    Ok(loaded)
}

fn load_stop_events(store: &mut TransitStore, rows: Vec<RawStopEvent>) -> Result<usize, Error> {
    let mut loaded = 0;
    for row in rows {
        let trip_id = TripId::new(row.trip_id);
        if store.trip(&trip_id).is_none() {
            return Err(Error::reference(format!("trip '{trip_id}'")));
        }
        let stop_id = store
            .stop_by_name(&row.stop_name)
            .ok_or_else(|| Error::reference(format!("stop '{}'", row.stop_name)))?
            .id;
        if store.has_stop_event(&trip_id, stop_id) {
            warn!(
                "skipping duplicate stop event for trip '{trip_id}' at '{}'",
                row.stop_name
            );
            continue;
        }
        let passengers_on = non_negative(row.passengers_on, "passengers_on")?;
        let passengers_off = non_negative(row.passengers_off, "passengers_off")?;
        store.add_stop_event(
            &trip_id,
            stop_id,
            row.scheduled,
            row.actual,
            passengers_on,
            passengers_off,
        )?;
        loaded += 1;
    }
    info!("loaded {loaded} rows from stop_events.csv");
    Ok(loaded)
}

fn non_negative(value: i64, field: &str) -> Result<u32, Error> {
    u32::try_from(value)
        .map_err(|_| Error::validation(format!("{field} must be non-negative, got {value}")))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    fn write_dataset(dir: &Path) {
        fs::write(
            dir.join("lines.csv"),
            "line_name,vehicle_type\nRoute 20,bus\nExpo Line,rail\n",
        )
        .unwrap();
        fs::write(
            dir.join("stops.csv"),
            "stop_name,latitude,longitude\n\
             Wilshire / Veteran,34.0605,-118.4485\n\
             Le Conte / Broxton,34.0633,-118.4470\n\
             Expo / Sepulveda,34.0366,-118.4291\n",
        )
        .unwrap();
        fs::write(
            dir.join("line_stops.csv"),
            "line_name,stop_name,sequence,time_offset\n\
             Route 20,Wilshire / Veteran,1,0\n\
             Route 20,Le Conte / Broxton,2,7\n\
             Expo Line,Expo / Sepulveda,1,0\n",
        )
        .unwrap();
        fs::write(
            dir.join("trips.csv"),
            "trip_id,line_name,scheduled_departure,vehicle_id\n\
             T0001,Route 20,2024-03-01 07:15:00,V100\n\
             T0002,Expo Line,2024-03-01 08:40:00,V200\n",
        )
        .unwrap();
        fs::write(
            dir.join("stop_events.csv"),
            "trip_id,stop_name,scheduled,actual,passengers_on,passengers_off\n\
             T0001,Wilshire / Veteran,2024-03-01 07:15:00,2024-03-01 07:18:30,12,0\n\
             T0001,Le Conte / Broxton,2024-03-01 07:22:00,,4,6\n",
        )
        .unwrap();
    }

    #[test]
    fn loads_a_complete_dataset() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());

        let store = load_dataset(&DatasetConfig::new(dir.path())).unwrap();
        assert_eq!(store.line_count(), 2);
        assert_eq!(store.stop_count(), 3);
        assert_eq!(store.line_stop_count(), 3);
        assert_eq!(store.trip_count(), 2);
        assert_eq!(store.stop_event_count(), 2);

        // An empty `actual` column stays unrecorded.
        let pending = store
            .stop_events()
            .find(|event| event.actual_time.is_none())
            .unwrap();
        assert_eq!(pending.passengers_on, 4);
    }

    #[test]
    fn duplicate_rows_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        fs::write(
            dir.path().join("lines.csv"),
            "line_name,vehicle_type\nRoute 20,bus\nExpo Line,rail\nRoute 20,bus\n",
        )
        .unwrap();

        let store = load_dataset(&DatasetConfig::new(dir.path())).unwrap();
        assert_eq!(store.line_count(), 2);
    }

    #[test]
    fn negative_passenger_count_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        fs::write(
            dir.path().join("stop_events.csv"),
            "trip_id,stop_name,scheduled,actual,passengers_on,passengers_off\n\
             T0001,Wilshire / Veteran,2024-03-01 07:15:00,,-3,0\n",
        )
        .unwrap();

        let err = load_dataset(&DatasetConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn membership_of_unknown_stop_fails_with_reference() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        fs::write(
            dir.path().join("line_stops.csv"),
            "line_name,stop_name,sequence,time_offset\nRoute 20,Nowhere,1,0\n",
        )
        .unwrap();

        let err = load_dataset(&DatasetConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, Error::Reference(_)));
    }

    #[test]
    fn missing_dataset_directory_is_reported() {
        let err = load_dataset(&DatasetConfig::new("/nonexistent/dataset")).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
