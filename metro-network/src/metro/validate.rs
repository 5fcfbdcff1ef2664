//! Precondition checks run before the topology is mutated.
//!
//! Every creation request passes all of its checks before anything is
//! written, so a rejected request never leaves a half-built station behind.

use std::collections::HashMap;

use crate::domain::{LineColor, SegmentDuration};

use super::error::MetroError;
use super::line::Line;
use super::station::{LineId, Station, StationId};

/// Reject a color that is already taken by another line.
pub(crate) fn check_line_not_exists(
    lines_by_color: &HashMap<LineColor, LineId>,
    color: &LineColor,
) -> Result<(), MetroError> {
    if lines_by_color.contains_key(color) {
        return Err(MetroError::LineAlreadyExists(color.clone()));
    }
    Ok(())
}

/// Reject a blank name or one already used anywhere in the network.
pub(crate) fn check_station_not_exists(
    stations_by_name: &HashMap<String, StationId>,
    name: &str,
) -> Result<(), MetroError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MetroError::BlankStationName);
    }
    if stations_by_name.contains_key(name) {
        return Err(MetroError::StationAlreadyExists(name.to_string()));
    }
    Ok(())
}

/// Parse segment duration text, rejecting malformed or non-positive values.
pub(crate) fn check_duration(text: &str) -> Result<SegmentDuration, MetroError> {
    SegmentDuration::parse(text).map_err(|source| MetroError::InvalidDuration {
        text: text.to_string(),
        source,
    })
}

/// Reject creating a first station on a line that already has one.
pub(crate) fn check_line_is_empty(line: &Line) -> Result<(), MetroError> {
    if !line.is_empty() {
        return Err(MetroError::LineNotEmpty(line.color().clone()));
    }
    Ok(())
}

/// Reject extending a line from a station that already has a successor.
pub(crate) fn check_previous_station_is_last_in_line(
    previous: &Station,
) -> Result<(), MetroError> {
    if !previous.is_last_in_line() {
        return Err(MetroError::NotLastStation(previous.name().to_string()));
    }
    Ok(())
}

/// Reject a query whose start and finish are the same station.
pub(crate) fn check_not_the_same_stations(
    start: &Station,
    finish: &Station,
) -> Result<(), MetroError> {
    if start.id() == finish.id() {
        return Err(MetroError::SameStation(start.name().to_string()));
    }
    Ok(())
}
