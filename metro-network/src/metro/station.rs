//! Stations and the handles that address them.

use std::fmt;

use crate::domain::SegmentDuration;

/// Index of a station in the network's station arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub(crate) usize);

/// Index of a line in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub(crate) usize);

/// A node of the network.
///
/// Each station sits on exactly one line. Its neighbours on that line are
/// held as handles into the same arena, and the travel time of the segment
/// towards the next station is stored on this (the "from") side.
#[derive(Debug, Clone)]
pub struct Station {
    pub(crate) id: StationId,
    pub(crate) name: String,
    pub(crate) line: LineId,
    pub(crate) prev: Option<StationId>,
    pub(crate) next: Option<StationId>,
    pub(crate) time_to_next: Option<SegmentDuration>,
}

impl Station {
    pub(crate) fn new(id: StationId, name: String, line: LineId) -> Self {
        Self {
            id,
            name,
            line,
            prev: None,
            next: None,
            time_to_next: None,
        }
    }

    /// Returns this station's handle.
    pub fn id(&self) -> StationId {
        self.id
    }

    /// Returns the station name, unique across the network.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the line this station belongs to.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// Returns the previous station on the line, if any.
    pub fn prev_station(&self) -> Option<StationId> {
        self.prev
    }

    /// Returns the next station on the line, if any.
    pub fn next_station(&self) -> Option<StationId> {
        self.next
    }

    /// Returns the travel time to the next station, if there is one.
    pub fn time_to_next_station(&self) -> Option<SegmentDuration> {
        self.time_to_next
    }

    /// Returns true if this station is the open end of its line.
    pub fn is_last_in_line(&self) -> bool {
        self.next.is_none()
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A passage between stations on two different lines.
///
/// Recorded once per pair and usable in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transfer {
    pub(crate) from: StationId,
    pub(crate) to: StationId,
}

impl Transfer {
    /// Returns the station the transfer was declared on.
    pub fn from(&self) -> StationId {
        self.from
    }

    /// Returns the station the transfer leads to.
    pub fn to(&self) -> StationId {
        self.to
    }

    /// Returns the other end of the transfer, if `station` is one of its ends.
    pub fn other_end(&self, station: StationId) -> Option<StationId> {
        if self.from == station {
            Some(self.to)
        } else if self.to == station {
            Some(self.from)
        } else {
            None
        }
    }

    /// Returns true if this transfer joins stations `a` and `b`, in either orientation.
    pub fn joins(&self, a: StationId, b: StationId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}
