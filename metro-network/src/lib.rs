//! Metro network topology engine.
//!
//! Models a city's metro: lines of ordered stations, transfers between
//! lines, and travel times between neighbouring stations. Answers "how
//! many stages from here to there?", which the station cashiers use to
//! price tickets.

pub mod cashier;
pub mod domain;
pub mod layout;
pub mod metro;
