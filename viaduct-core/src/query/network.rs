//! Queries over line topology: orderings, transfer stops and
//! stop-set containment.

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use serde_json::json;

use super::params::QueryParams;
use super::report::{QueryId, QueryReport};
use crate::Error;
use crate::model::{LineStop, StopId, TripId};
use crate::store::TransitStore;

/// Q1: stops on a line, ordered by sequence number.
pub(super) fn stops_on_line(
    store: &TransitStore,
    params: &QueryParams,
) -> Result<QueryReport, Error> {
    let line = store
        .line_by_name(&params.line_name)
        .ok_or_else(|| Error::not_found(format!("line '{}'", params.line_name)))?;

    let results = store
        .line_stops_for(line.id)
        .into_iter()
        .filter_map(|member| {
            store.stop(member.stop_id).map(|stop| {
                json!({
                    "stop_name": stop.name,
                    "sequence": member.sequence_number,
                    "time_offset": member.time_offset_minutes,
                })
            })
        })
        .collect();

    Ok(QueryReport::new(
        QueryId::Q1,
        vec!["stop_name", "sequence", "time_offset"],
        results,
    ))
}

/// Q3: stops served by at least `min_line_count` distinct lines,
/// busiest first.
pub(super) fn transfer_stops(
    store: &TransitStore,
    params: &QueryParams,
) -> Result<QueryReport, Error> {
    let mut rows: Vec<(String, usize)> = store
        .line_stops()
        .map(|member| (member.stop_id, member.line_id))
        .into_group_map()
        .into_iter()
        .filter_map(|(stop_id, lines)| {
            let line_count = lines.iter().unique().count();
            if line_count < params.min_line_count {
                return None;
            }
            store
                .stop(stop_id)
                .map(|stop| (stop.name.clone(), line_count))
        })
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let results = rows
        .into_iter()
        .map(|(stop_name, line_count)| json!({ "stop_name": stop_name, "line_count": line_count }))
        .collect();
    Ok(QueryReport::new(
        QueryId::Q3,
        vec!["stop_name", "line_count"],
        results,
    ))
}

/// Q4: the route a trip actually travelled, reconstructed by joining its
/// stop events back onto the line's ordered memberships.
pub(super) fn trip_route(store: &TransitStore, params: &QueryParams) -> Result<QueryReport, Error> {
    let trip_id = TripId::new(params.trip_id.as_str());
    let trip = store
        .trip(&trip_id)
        .ok_or_else(|| Error::not_found(format!("trip '{trip_id}'")))?;

    let memberships: HashMap<StopId, &LineStop> = store
        .line_stops_for(trip.line_id)
        .into_iter()
        .map(|member| (member.stop_id, member))
        .collect();

    let mut visited: Vec<&LineStop> = store
        .stop_events()
        .filter(|event| event.trip_id == trip_id)
        .filter_map(|event| memberships.get(&event.stop_id).copied())
        .collect();
    visited.sort_by_key(|member| member.sequence_number);

    let results = visited
        .into_iter()
        .filter_map(|member| {
            store.stop(member.stop_id).map(|stop| {
                json!({
                    "stop_name": stop.name,
                    "sequence": member.sequence_number,
                    "time_offset": member.time_offset_minutes,
                })
            })
        })
        .collect();
    Ok(QueryReport::new(
        QueryId::Q4,
        vec!["stop_name", "sequence", "time_offset"],
        results,
    ))
}

/// Q5: lines whose memberships contain every stop in the target set.
///
/// Set containment via grouped distinct counting: a line qualifies when
/// the number of distinct target stops it serves equals the size of the
/// target set. An unknown target name therefore disqualifies every line.
pub(super) fn lines_serving_all(
    store: &TransitStore,
    params: &QueryParams,
) -> Result<QueryReport, Error> {
    if params.target_stops.is_empty() {
        return Err(Error::validation(
            "Q5 requires at least one target stop".to_string(),
        ));
    }

    let requested: HashSet<&str> = params.target_stops.iter().map(String::as_str).collect();
    let target_ids: HashSet<StopId> = requested
        .iter()
        .filter_map(|name| store.stop_by_name(name))
        .map(|stop| stop.id)
        .collect();

    let mut names: Vec<String> = store
        .line_stops()
        .filter(|member| target_ids.contains(&member.stop_id))
        .map(|member| (member.line_id, member.stop_id))
        .into_group_map()
        .into_iter()
        .filter(|(_, served)| served.iter().unique().count() == requested.len())
        .filter_map(|(line_id, _)| store.line(line_id).map(|line| line.name.clone()))
        .collect();
    names.sort();

    let results = names
        .into_iter()
        .map(|line_name| json!({ "line_name": line_name }))
        .collect();
    Ok(QueryReport::new(QueryId::Q5, vec!["line_name"], results))
}
