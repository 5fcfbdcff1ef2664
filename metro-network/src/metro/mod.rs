//! Metro network topology.
//!
//! Lines are simple paths of stations that only ever grow at their tail.
//! Lines connect to each other solely through explicit transfers between
//! stations. A [`MetroBuilder`] assembles the topology, validating each
//! request before applying it, and yields an immutable [`Metro`] that
//! answers stage-count queries.

mod builder;
mod error;
mod line;
mod network;
mod station;
mod validate;


pub use builder::MetroBuilder;
pub use error::{ErrorKind, MetroError};
pub use line::Line;
pub use network::Metro;
pub use station::{LineId, Station, StationId, Transfer};
