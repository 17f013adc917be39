//! Fixed catalog of analytical queries over the transit store.
//!
//! The catalog is the read-only surface of the system: ten named queries
//! (Q1–Q10) answering route, schedule, ridership and delay questions with
//! joins and aggregation only. It is deliberately not a query planner;
//! each query is a function, and [`run_query`] dispatches by name.

mod delays;
mod network;
mod params;
mod report;
mod ridership;
mod schedule;

pub use params::QueryParams;
pub use report::{QueryId, QueryReport};

use crate::Error;
use crate::store::TransitStore;

/// Run a single named query.
///
/// # Errors
///
/// `NotFound` if a targeted line or trip does not exist, `Validation` if
/// the parameters are unusable for the query.
pub fn run_query(
    store: &TransitStore,
    query: QueryId,
    params: &QueryParams,
) -> Result<QueryReport, Error> {
    match query {
        QueryId::Q1 => network::stops_on_line(store, params),
        QueryId::Q2 => schedule::trips_in_window(store, params),
        QueryId::Q3 => network::transfer_stops(store, params),
        QueryId::Q4 => network::trip_route(store, params),
        QueryId::Q5 => network::lines_serving_all(store, params),
        QueryId::Q6 => ridership::average_boardings_by_line(store),
        QueryId::Q7 => ridership::busiest_stops(store, params),
        QueryId::Q8 => delays::delays_by_line(store, params),
        QueryId::Q9 => delays::delayed_trips(store, params),
        QueryId::Q10 => ridership::above_average_stops(store),
    }
}

/// Run the whole catalog in order.
pub fn run_all(store: &TransitStore, params: &QueryParams) -> Result<Vec<QueryReport>, Error> {
    QueryId::ALL
        .iter()
        .map(|&query| run_query(store, query, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TripId, VehicleType};
    use crate::test_fixtures::{dt, sample_store};

    fn params() -> QueryParams {
        QueryParams {
            line_name: "Red".to_string(),
            trip_id: "T0001".to_string(),
            target_stops: vec!["A".to_string(), "C".to_string()],
            ..QueryParams::default()
        }
    }

    #[test]
    fn q1_lists_stops_in_sequence_order() {
        let report = run_query(&sample_store(), QueryId::Q1, &params()).unwrap();
        let names: Vec<&str> = report
            .results
            .iter()
            .map(|row| row["stop_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(report.count, 3);
    }

    #[test]
    fn q1_unknown_line_is_not_found() {
        let mut p = params();
        p.line_name = "Ghost Line".to_string();
        let err = run_query(&sample_store(), QueryId::Q1, &p).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn q2_filters_on_departure_window() {
        let mut store = sample_store();
        let red = store.line_by_name("Red").unwrap().id;
        // Outside the default 07:00-09:00 window.
        store
            .add_trip(TripId::new("T0002"), red, dt("2024-03-01 11:30:00"), "V101")
            .unwrap();

        let report = run_query(&store, QueryId::Q2, &params()).unwrap();
        assert_eq!(report.count, 1);
        assert_eq!(report.results[0]["trip_id"], "T0001");
        assert_eq!(
            report.results[0]["scheduled_departure"],
            "2024-03-01 08:00:00"
        );
    }

    #[test]
    fn q3_finds_the_shared_stop() {
        let report = run_query(&sample_store(), QueryId::Q3, &params()).unwrap();
        assert_eq!(report.count, 1);
        assert_eq!(report.results[0]["stop_name"], "B");
        assert_eq!(report.results[0]["line_count"], 2);
    }

    #[test]
    fn q4_reconstructs_the_visited_route_in_order() {
        let report = run_query(&sample_store(), QueryId::Q4, &params()).unwrap();
        let names: Vec<&str> = report
            .results
            .iter()
            .map(|row| row["stop_name"].as_str().unwrap())
            .collect();
        // The trip recorded events at A and B only.
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn q5_requires_every_target_stop() {
        let store = sample_store();

        // Red serves both A and C; Blue serves neither in full.
        let report = run_query(&store, QueryId::Q5, &params()).unwrap();
        let names: Vec<&str> = report
            .results
            .iter()
            .map(|row| row["line_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Red"]);

        // An unknown stop name can never be contained.
        let mut p = params();
        p.target_stops = vec!["A".to_string(), "Nowhere".to_string()];
        let report = run_query(&store, QueryId::Q5, &p).unwrap();
        assert_eq!(report.count, 0);
    }

    #[test]
    fn q5_rejects_an_empty_target_set() {
        let mut p = params();
        p.target_stops.clear();
        let err = run_query(&sample_store(), QueryId::Q5, &p).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn q6_averages_boardings_per_line() {
        let report = run_query(&sample_store(), QueryId::Q6, &params()).unwrap();
        assert_eq!(report.count, 1);
        assert_eq!(report.results[0]["line_name"], "Red");
        // (5 + 3) boardings over 2 events.
        assert_eq!(report.results[0]["avg_passengers"], 4.0);
    }

    #[test]
    fn q7_ranks_stops_by_total_activity() {
        let report = run_query(&sample_store(), QueryId::Q7, &params()).unwrap();
        // A and B both total 5 (5+0 and 3+2); the tie resolves by name.
        assert_eq!(report.results[0]["stop_name"], "A");
        assert_eq!(report.results[0]["total_activity"], 5);
        assert_eq!(report.results[1]["stop_name"], "B");
        assert_eq!(report.results[1]["total_activity"], 5);
    }

    #[test]
    fn q8_counts_delays_beyond_the_threshold() {
        let report = run_query(&sample_store(), QueryId::Q8, &params()).unwrap();
        // Only the event at B is 3 minutes late; the threshold is 2.
        assert_eq!(report.count, 1);
        assert_eq!(report.results[0]["line_name"], "Red");
        assert_eq!(report.results[0]["delay_count"], 1);
    }

    #[test]
    fn q9_needs_enough_delayed_stops() {
        let store = sample_store();
        let report = run_query(&store, QueryId::Q9, &params()).unwrap();
        // T0001 has one delayed stop, below the default minimum of 3.
        assert_eq!(report.count, 0);

        let mut p = params();
        p.min_delayed_stops = 1;
        let report = run_query(&store, QueryId::Q9, &p).unwrap();
        assert_eq!(report.results[0]["trip_id"], "T0001");
        assert_eq!(report.results[0]["delayed_stop_count"], 1);
    }

    #[test]
    fn q10_keeps_stops_above_the_average() {
        let mut store = sample_store();
        let red = store.line_by_name("Red").unwrap().id;
        let c = store.stop_by_name("C").unwrap().id;
        let trip = TripId::new("T0002");
        store
            .add_trip(trip.clone(), red, dt("2024-03-01 09:00:00"), "V101")
            .unwrap();
        store
            .add_stop_event(&trip, c, dt("2024-03-01 09:12:00"), None, 1, 0)
            .unwrap();

        // Boardings: A 5, B 3, C 1; average 3. Only A clears it.
        let report = run_query(&store, QueryId::Q10, &params()).unwrap();
        assert_eq!(report.count, 1);
        assert_eq!(report.results[0]["stop_name"], "A");
        assert_eq!(report.results[0]["total_boardings"], 5);
    }

    #[test]
    fn q10_on_an_empty_store_returns_nothing() {
        let mut store = crate::store::TransitStore::new();
        store.add_line("Red", VehicleType::Rail).unwrap();
        let report = run_query(&store, QueryId::Q10, &params()).unwrap();
        assert_eq!(report.count, 0);
    }

    #[test]
    fn run_all_covers_the_whole_catalog() {
        let reports = run_all(&sample_store(), &params()).unwrap();
        assert_eq!(reports.len(), 10);
        let ids: Vec<QueryId> = reports.iter().map(|r| r.query).collect();
        assert_eq!(ids, QueryId::ALL.to_vec());
    }
}
