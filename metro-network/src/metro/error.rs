//! Topology error types.

use crate::domain::{DurationError, InvalidLineColor, LineColor};

/// Broad category of a [`MetroError`].
///
/// Lets callers tell bad input apart from conflicting state, unreachable
/// routes and corrupted topology without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A construction request conflicts with the current topology.
    Precondition,
    /// A named line or station does not exist.
    Lookup,
    /// A query between two valid stations has no answer.
    Routing,
    /// The topology itself is malformed.
    Invariant,
}

/// Errors from building or querying a metro network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetroError {
    /// A line with this color already exists
    #[error("line already exists: {0}")]
    LineAlreadyExists(LineColor),

    /// No line has this color
    #[error("line with this color does not exist: {0}")]
    LineNotExists(String),

    /// The line color could not be parsed
    #[error(transparent)]
    InvalidLineColor(#[from] InvalidLineColor),

    /// Some line already has a station with this name
    #[error("station with this name already exists: {0}")]
    StationAlreadyExists(String),

    /// Station names must not be blank
    #[error("station name must not be blank")]
    BlankStationName,

    /// No station has this name
    #[error("station does not exist: {0}")]
    StationNotFound(String),

    /// The segment duration text was rejected
    #[error("{source} (got {text:?})")]
    InvalidDuration {
        text: String,
        #[source]
        source: DurationError,
    },

    /// The line already has a first station
    #[error("line {0} already has stations, cannot create first station")]
    LineNotEmpty(LineColor),

    /// The line has no station to extend from
    #[error("line {0} has no stations, create the first station before extending it")]
    EmptyLine(LineColor),

    /// The station to extend from is not the end of its line
    #[error("station {0} is not the last in its line")]
    NotLastStation(String),

    /// Start and finish are the same station
    #[error("start and finish are the same station: {0}")]
    SameStation(String),

    /// A transfer between two stations of one line was requested
    #[error("stations {0} and {1} are on the same line, cannot transfer between them")]
    SameLineTransfer(String, String),

    /// Neither line has a transfer station towards the other
    #[error("no transfer route between lines {0} and {1}")]
    NoTransferRoute(LineColor, LineColor),

    /// Walking the line in both directions never reached the target
    #[error("stations {0} and {1} are not connected")]
    StationsNotConnected(String, String),

    /// Walking the line came back around on itself
    #[error("line {0} contains a cycle")]
    CyclicTopology(LineColor),
}

impl MetroError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MetroError::LineAlreadyExists(_)
            | MetroError::InvalidLineColor(_)
            | MetroError::StationAlreadyExists(_)
            | MetroError::BlankStationName
            | MetroError::InvalidDuration { .. }
            | MetroError::LineNotEmpty(_)
            | MetroError::EmptyLine(_)
            | MetroError::NotLastStation(_)
            | MetroError::SameLineTransfer(_, _) => ErrorKind::Precondition,
            MetroError::LineNotExists(_) | MetroError::StationNotFound(_) => ErrorKind::Lookup,
            MetroError::SameStation(_)
            | MetroError::NoTransferRoute(_, _)
            | MetroError::StationsNotConnected(_, _) => ErrorKind::Routing,
            MetroError::CyclicTopology(_) => ErrorKind::Invariant,
        }
    }
}
