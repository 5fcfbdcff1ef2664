//! Point of sale for a station.
//!
//! A [`Cashier`] prices tickets by the number of stages between two
//! stations, sells and refreshes [`Subscription`]s, and keeps a daily
//! revenue ledger. The topology is reached only through [`StageCounter`],
//! so the ledger can be exercised without a real network.

mod config;
mod error;
mod ledger;
mod subscription;

pub use config::TariffConfig;
pub use error::CashierError;
pub use ledger::Cashier;
pub use subscription::{Subscription, SubscriptionRegistry};

use crate::metro::{Metro, MetroBuilder, MetroError};

/// Source of stage counts for pricing tickets.
pub trait StageCounter {
    /// Count the stages travelled between two named stations.
    fn count_stages(&self, start: &str, finish: &str) -> Result<usize, MetroError>;
}

impl StageCounter for Metro {
    fn count_stages(&self, start: &str, finish: &str) -> Result<usize, MetroError> {
        Metro::count_stages(self, start, finish)
    }
}

impl StageCounter for MetroBuilder {
    fn count_stages(&self, start: &str, finish: &str) -> Result<usize, MetroError> {
        self.metro().count_stages(start, finish)
    }
}
