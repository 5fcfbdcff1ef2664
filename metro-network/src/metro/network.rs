//! The finished network and its stage-count queries.

use std::collections::HashMap;
use std::fmt;

use chrono::Duration;
use tracing::{debug, trace};

use crate::domain::LineColor;

use super::builder::MetroBuilder;
use super::error::MetroError;
use super::line::Line;
use super::station::{LineId, Station, StationId, Transfer};
use super::validate::check_not_the_same_stations;

/// Direction of travel along a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// On-line travel accumulated by a walk: segments passed and their time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ride {
    stages: usize,
    time: Duration,
}

impl Ride {
    fn none() -> Self {
        Self {
            stages: 0,
            time: Duration::zero(),
        }
    }

    fn then(self, other: Ride) -> Ride {
        Ride {
            stages: self.stages + other.stages,
            time: self.time + other.time,
        }
    }
}

/// A metro network: all lines of one city, their stations and transfers.
///
/// A `Metro` is produced by [`MetroBuilder::build`] and only answers
/// queries, so once built it can be shared freely between readers.
///
/// Stations are kept in a single arena and addressed by [`StationId`];
/// lines hold the ordered handles of their stations.
#[derive(Debug, Clone)]
pub struct Metro {
    pub(crate) city: String,
    pub(crate) lines: Vec<Line>,
    pub(crate) stations: Vec<Station>,
    pub(crate) lines_by_color: HashMap<LineColor, LineId>,
    pub(crate) stations_by_name: HashMap<String, StationId>,
    pub(crate) transfers: Vec<Transfer>,
}

impl Metro {
    pub(crate) fn new(city: String) -> Self {
        Self {
            city,
            lines: Vec::new(),
            stations: Vec::new(),
            lines_by_color: HashMap::new(),
            stations_by_name: HashMap::new(),
            transfers: Vec::new(),
        }
    }

    /// Start building a network for `city`.
    pub fn builder(city: impl Into<String>) -> MetroBuilder {
        MetroBuilder::new(city)
    }

    /// Returns the city this network serves.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns all lines in creation order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the line with the given handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this network.
    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.0]
    }

    /// Returns the station with the given handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this network.
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.0]
    }

    /// Returns the number of stations across all lines.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Returns the line a station belongs to.
    pub fn line_of(&self, station: &Station) -> &Line {
        self.line(station.line())
    }

    /// Resolve a line by its color.
    pub fn find_line_by_color(&self, color: &str) -> Result<&Line, MetroError> {
        self.line_id(color).map(|id| self.line(id))
    }

    /// Resolve a station by its name, ignoring surrounding whitespace.
    pub fn get_station_by_name(&self, name: &str) -> Result<&Station, MetroError> {
        self.station_id(name).map(|id| self.station(id))
    }

    /// Returns every recorded transfer.
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Returns the stations on other lines reachable from `station` by transfer.
    pub fn transfers_of(&self, station: StationId) -> impl Iterator<Item = &Station> + '_ {
        self.transfers
            .iter()
            .filter_map(move |t| t.other_end(station))
            .map(move |id| self.station(id))
    }

    /// Returns true if `station` has at least one transfer.
    pub fn is_transfer_station(&self, station: StationId) -> bool {
        self.transfers.iter().any(|t| t.other_end(station).is_some())
    }

    /// Find the first station on `line`, in line order, with a transfer to `target`.
    pub fn find_transfer_station(&self, line: LineId, target: LineId) -> Option<StationId> {
        self.line(line)
            .stations()
            .iter()
            .copied()
            .find(|&id| self.transfers_of(id).any(|other| other.line() == target))
    }

    /// Count the stages travelled between two stations.
    ///
    /// Stations on the same line are counted along the line. For stations
    /// on different lines, each line must have a transfer station towards
    /// the other; the result is the stages from the start to its transfer
    /// station plus the stages from the finish to its transfer station. The
    /// transfer itself is not a stage.
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_network::metro::Metro;
    ///
    /// let mut builder = Metro::builder("Perm");
    /// builder.create_line("Red").unwrap();
    /// builder.create_first_station("Red", "A", &[]).unwrap();
    /// builder.create_last_station("Red", "B", "1M", &[]).unwrap();
    /// builder.create_last_station("Red", "C", "2M", &[]).unwrap();
    /// let metro = builder.build();
    ///
    /// assert_eq!(metro.count_stages("A", "C").unwrap(), 2);
    /// assert_eq!(metro.count_stages("C", "A").unwrap(), 2);
    /// assert!(metro.count_stages("A", "A").is_err());
    /// ```
    pub fn count_stages(&self, start: &str, finish: &str) -> Result<usize, MetroError> {
        let ride = self.ride(start, finish)?;
        debug!(start, finish, stages = ride.stages, "counted stages");
        Ok(ride.stages)
    }

    /// Sum the segment durations travelled between two stations.
    ///
    /// Follows the same route as [`Metro::count_stages`]; time spent
    /// changing lines is not included.
    pub fn travel_time(&self, start: &str, finish: &str) -> Result<Duration, MetroError> {
        self.ride(start, finish).map(|ride| ride.time)
    }

    fn ride(&self, start: &str, finish: &str) -> Result<Ride, MetroError> {
        let start = self.get_station_by_name(start)?;
        let finish = self.get_station_by_name(finish)?;
        check_not_the_same_stations(start, finish)?;

        if start.line() == finish.line() {
            return self.ride_on_line(start.id(), finish.id());
        }

        let start_transfer = self.find_transfer_station(start.line(), finish.line());
        let finish_transfer = self.find_transfer_station(finish.line(), start.line());
        let (Some(start_transfer), Some(finish_transfer)) = (start_transfer, finish_transfer)
        else {
            return Err(MetroError::NoTransferRoute(
                self.line_of(start).color().clone(),
                self.line_of(finish).color().clone(),
            ));
        };

        trace!(
            start = %start,
            via = %self.station(start_transfer),
            to = %self.station(finish_transfer),
            finish = %finish,
            "routing across lines"
        );

        let to_transfer = self.ride_on_line(start.id(), start_transfer)?;
        let from_transfer = self.ride_on_line(finish_transfer, finish.id())?;
        Ok(to_transfer.then(from_transfer))
    }

    /// Ride along one line, trying forward first and then backward.
    fn ride_on_line(&self, start: StationId, finish: StationId) -> Result<Ride, MetroError> {
        if start == finish {
            return Ok(Ride::none());
        }

        if let Some(ride) = self.walk(start, finish, Direction::Forward)? {
            return Ok(ride);
        }
        if let Some(ride) = self.walk(start, finish, Direction::Backward)? {
            return Ok(ride);
        }

        Err(MetroError::StationsNotConnected(
            self.station(start).name().to_string(),
            self.station(finish).name().to_string(),
        ))
    }

    /// Follow links in one direction until `finish`, the end of the line, or a cycle.
    ///
    /// Returns `Ok(None)` if the line ends without reaching `finish`.
    fn walk(
        &self,
        start: StationId,
        finish: StationId,
        direction: Direction,
    ) -> Result<Option<Ride>, MetroError> {
        // A simple path can never take more steps than there are stations.
        let limit = self.stations.len();
        let mut current = self.station(start);
        let mut ride = Ride::none();

        loop {
            let link = match direction {
                Direction::Forward => current.next_station(),
                Direction::Backward => current.prev_station(),
            };
            let Some(step) = link.and_then(|id| self.stations.get(id.0)) else {
                return Ok(None);
            };

            // Durations live on the station before the gap in forward order.
            let segment = match direction {
                Direction::Forward => current.time_to_next_station(),
                Direction::Backward => step.time_to_next_station(),
            };
            ride.stages += 1;
            if let Some(segment) = segment {
                ride.time = ride.time + segment.as_duration();
            }

            if step.id() == finish {
                return Ok(Some(ride));
            }
            if step.id() == start || ride.stages > limit {
                return Err(MetroError::CyclicTopology(
                    self.line(self.station(start).line()).color().clone(),
                ));
            }

            trace!(station = %step, stages = ride.stages, ?direction, "walking line");
            current = step;
        }
    }

    pub(crate) fn line_id(&self, color: &str) -> Result<LineId, MetroError> {
        LineColor::parse(color)
            .ok()
            .and_then(|color| self.lines_by_color.get(&color).copied())
            .ok_or_else(|| MetroError::LineNotExists(color.trim().to_string()))
    }

    pub(crate) fn station_id(&self, name: &str) -> Result<StationId, MetroError> {
        let name = name.trim();
        self.stations_by_name
            .get(name)
            .copied()
            .ok_or_else(|| MetroError::StationNotFound(name.to_string()))
    }
}

impl fmt::Display for Metro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.city)?;
        for line in &self.lines {
            write!(f, "  {}:", line.color())?;
            for &id in line.stations() {
                let station = self.station(id);
                write!(f, " {}", station.name())?;

                let transfers: Vec<String> = self
                    .transfers_of(id)
                    .map(|other| format!("{} {}", self.line_of(other).color(), other.name()))
                    .collect();
                if !transfers.is_empty() {
                    write!(f, " [{}]", transfers.join(", "))?;
                }
                if let (Some(_), Some(time)) =
                    (station.next_station(), station.time_to_next_station())
                {
                    write!(f, " -{time}-")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
