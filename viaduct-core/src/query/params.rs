use chrono::NaiveTime;
use serde::Deserialize;

/// Parameters for the named queries.
///
/// Defaults mirror the canned runs against the reference dataset; each
/// field is independent, so a config file or CLI flag can override one
/// without restating the rest.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryParams {
    /// Line whose stops Q1 lists.
    pub line_name: String,
    /// Trip whose route Q4 reconstructs.
    pub trip_id: String,
    /// Stop names that Q5 requires a line to serve in full.
    pub target_stops: Vec<String>,
    /// Inclusive departure window for Q2.
    pub window_start: NaiveTime,
    pub window_end: NaiveTime,
    /// Minimum distinct lines for Q3 to call a stop a transfer stop.
    pub min_line_count: usize,
    /// Minutes behind schedule before Q8/Q9 count an event as delayed.
    pub delay_threshold_minutes: i64,
    /// Minimum delayed events for Q9 to flag a trip.
    pub min_delayed_stops: usize,
    /// Row cap for Q7.
    pub busiest_limit: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            line_name: "Route 20".to_string(),
            trip_id: "T0001".to_string(),
            target_stops: vec![
                "Wilshire / Veteran".to_string(),
                "Le Conte / Broxton".to_string(),
            ],
            window_start: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            window_end: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            min_line_count: 2,
            delay_threshold_minutes: 2,
            min_delayed_stops: 3,
            busiest_limit: 10,
        }
    }
}
