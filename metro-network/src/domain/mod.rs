//! Domain types for the metro network.
//!
//! These are the validated value types the topology is built from. All
//! types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod duration;
mod line_color;

pub use duration::{DurationError, SegmentDuration};
pub use line_color::{InvalidLineColor, LineColor};
