//! Metro lines.

use tracing::debug;

use crate::domain::{LineColor, SegmentDuration};

use super::error::MetroError;
use super::station::{LineId, Station, StationId};
use super::validate::{check_line_is_empty, check_previous_station_is_last_in_line};

/// An ordered, simple path of stations sharing one color.
///
/// A line only ever grows at its tail: the first station is created on an
/// empty line, and every later station is linked after the current last
/// one. This keeps the path free of branches and cycles.
#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) id: LineId,
    pub(crate) color: LineColor,
    pub(crate) stations: Vec<StationId>,
}

impl Line {
    pub(crate) fn new(id: LineId, color: LineColor) -> Self {
        Self {
            id,
            color,
            stations: Vec::new(),
        }
    }

    /// Returns this line's handle.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Returns the color identifying this line.
    pub fn color(&self) -> &LineColor {
        &self.color
    }

    /// Returns the stations in line order.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Returns the first station, if any.
    pub fn first(&self) -> Option<StationId> {
        self.stations.first().copied()
    }

    /// Returns the last station, if any.
    pub fn last(&self) -> Option<StationId> {
        self.stations.last().copied()
    }

    /// Returns the number of stations on the line.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if the line has no stations yet.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Returns true if `station` belongs to this line.
    pub fn contains(&self, station: StationId) -> bool {
        self.stations.contains(&station)
    }

    /// Append the first station of an empty line.
    ///
    /// The name must already have been checked for uniqueness by the caller.
    pub(crate) fn create_first_station(
        &mut self,
        arena: &mut Vec<Station>,
        name: &str,
    ) -> Result<StationId, MetroError> {
        check_line_is_empty(self)?;

        let id = StationId(arena.len());
        arena.push(Station::new(id, name.to_string(), self.id));
        self.stations.push(id);

        debug!(line = %self.color, station = name, "created first station");
        Ok(id)
    }

    /// Append a station after the current last station.
    ///
    /// `time_to_station` becomes the duration of the new segment and is
    /// stored on the previous station.
    pub(crate) fn create_last_station(
        &mut self,
        arena: &mut Vec<Station>,
        name: &str,
        time_to_station: SegmentDuration,
    ) -> Result<StationId, MetroError> {
        let prev_id = self
            .last()
            .ok_or_else(|| MetroError::EmptyLine(self.color.clone()))?;
        check_previous_station_is_last_in_line(&arena[prev_id.0])?;

        let id = StationId(arena.len());
        let mut station = Station::new(id, name.to_string(), self.id);
        station.prev = Some(prev_id);
        arena.push(station);

        let prev = &mut arena[prev_id.0];
        prev.next = Some(id);
        prev.time_to_next = Some(time_to_station);
        self.stations.push(id);

        debug!(
            line = %self.color,
            station = name,
            after = %arena[prev_id.0].name,
            duration = %time_to_station,
            "created last station"
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Line {
        Line::new(LineId(0), LineColor::parse("Red").unwrap())
    }

    fn dur(s: &str) -> SegmentDuration {
        SegmentDuration::parse(s).unwrap()
    }

    #[test]
    fn first_station_on_empty_line() {
        let mut line = red();
        let mut arena = Vec::new();

        let id = line.create_first_station(&mut arena, "Sportivnaya").unwrap();

        assert_eq!(line.len(), 1);
        assert_eq!(line.first(), Some(id));
        assert_eq!(line.last(), Some(id));
        assert_eq!(arena[id.0].name(), "Sportivnaya");
        assert_eq!(arena[id.0].line(), LineId(0));
    }

    #[test]
    fn first_station_on_non_empty_line_fails() {
        let mut line = red();
        let mut arena = Vec::new();
        line.create_first_station(&mut arena, "A").unwrap();

        let err = line.create_first_station(&mut arena, "B").unwrap_err();
        assert_eq!(err, MetroError::LineNotEmpty(line.color().clone()));
        assert_eq!(line.len(), 1);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn last_station_links_both_ways() {
        let mut line = red();
        let mut arena = Vec::new();
        let a = line.create_first_station(&mut arena, "A").unwrap();
        let b = line.create_last_station(&mut arena, "B", dur("2M21S")).unwrap();

        assert_eq!(arena[a.0].next_station(), Some(b));
        assert_eq!(arena[b.0].prev_station(), Some(a));
        assert_eq!(arena[a.0].time_to_next_station(), Some(dur("2M21S")));
        assert!(arena[b.0].time_to_next_station().is_none());
        assert_eq!(line.stations(), &[a, b]);
    }

    #[test]
    fn last_station_on_empty_line_fails() {
        let mut line = red();
        let mut arena = Vec::new();

        let err = line
            .create_last_station(&mut arena, "A", dur("1M"))
            .unwrap_err();
        assert_eq!(err, MetroError::EmptyLine(line.color().clone()));
        assert!(arena.is_empty());
    }

    #[test]
    fn last_station_requires_open_tail() {
        let mut line = red();
        let mut arena = Vec::new();
        let a = line.create_first_station(&mut arena, "A").unwrap();
        // Corrupt the tail so it already points somewhere.
        arena[a.0].next = Some(StationId(42));

        let err = line
            .create_last_station(&mut arena, "B", dur("1M"))
            .unwrap_err();
        assert_eq!(err, MetroError::NotLastStation("A".into()));
        assert_eq!(line.len(), 1);
        assert_eq!(arena.len(), 1);
    }
}
