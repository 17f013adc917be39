//! Shared fixtures for unit tests.

use chrono::NaiveDateTime;

use crate::model::{TripId, VehicleType};
use crate::store::TransitStore;

pub(crate) fn dt(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// Line "Red" with stops A(1), B(2), C(3), line "Blue" with B(1), and
/// trip T0001 on Red carrying events at A (5 boardings, on time) and
/// B (3 boardings, 3 minutes late).
pub(crate) fn sample_store() -> TransitStore {
    let mut store = TransitStore::new();
    let red = store.add_line("Red", VehicleType::Rail).unwrap();
    let blue = store.add_line("Blue", VehicleType::Bus).unwrap();
    let a = store.add_stop("A", 34.06, -118.45).unwrap();
    let b = store.add_stop("B", 34.07, -118.44).unwrap();
    let c = store.add_stop("C", 34.08, -118.43).unwrap();

    store.add_line_stop(red, a, 1, 0).unwrap();
    store.add_line_stop(red, b, 2, 6).unwrap();
    store.add_line_stop(red, c, 3, 12).unwrap();
    store.add_line_stop(blue, b, 1, 0).unwrap();

    let trip = TripId::new("T0001");
    store
        .add_trip(trip.clone(), red, dt("2024-03-01 08:00:00"), "V100")
        .unwrap();
    store
        .add_stop_event(
            &trip,
            a,
            dt("2024-03-01 08:00:00"),
            Some(dt("2024-03-01 08:00:00")),
            5,
            0,
        )
        .unwrap();
    store
        .add_stop_event(
            &trip,
            b,
            dt("2024-03-01 08:06:00"),
            Some(dt("2024-03-01 08:09:00")),
            3,
            2,
        )
        .unwrap();
    store
}
