//! Per-station revenue ledger.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::StageCounter;
use super::config::TariffConfig;
use super::error::CashierError;
use super::subscription::{Subscription, SubscriptionRegistry};

/// The cashier of one station.
///
/// Every sale is recorded against its date. Failed sales record nothing.
#[derive(Debug, Clone)]
pub struct Cashier {
    station: String,
    tariff: TariffConfig,
    sales: BTreeMap<NaiveDate, Decimal>,
}

impl Cashier {
    /// Create a cashier for `station` charging `tariff`.
    pub fn new(station: impl Into<String>, tariff: TariffConfig) -> Self {
        Self {
            station: station.into(),
            tariff,
            sales: BTreeMap::new(),
        }
    }

    /// Returns the station this cashier works at.
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Returns the tariff in use.
    pub fn tariff(&self) -> &TariffConfig {
        &self.tariff
    }

    /// Sell a single ticket between two stations, returning its price.
    pub fn sell_ticket<C: StageCounter>(
        &mut self,
        counter: &C,
        start: &str,
        finish: &str,
        date: NaiveDate,
    ) -> Result<Decimal, CashierError> {
        let stages = counter.count_stages(start, finish)?;
        let price = self.tariff.ticket_price(stages);
        self.record(date, price);

        debug!(
            station = %self.station,
            start,
            finish,
            stages,
            %price,
            "sold ticket"
        );
        Ok(price)
    }

    /// Sell a new subscription starting on `date`, valid for the tariff's
    /// `subscription_validity_days`.
    pub fn sell_subscription(
        &mut self,
        registry: &mut SubscriptionRegistry,
        date: NaiveDate,
    ) -> Result<Subscription, CashierError> {
        let subscription = registry.issue(date, self.tariff.subscription_validity_days)?;
        self.record(date, self.tariff.subscription_price);
        Ok(subscription)
    }

    /// Refresh an existing subscription so it restarts on `date` under the
    /// current tariff.
    pub fn refresh_subscription(
        &mut self,
        registry: &mut SubscriptionRegistry,
        number: &str,
        date: NaiveDate,
    ) -> Result<Subscription, CashierError> {
        let subscription = registry.refresh(number, date, self.tariff.subscription_validity_days)?;
        self.record(date, self.tariff.subscription_price);
        Ok(subscription)
    }

    /// Returns the revenue taken on `date`.
    pub fn revenue_on(&self, date: NaiveDate) -> Decimal {
        self.sales.get(&date).copied().unwrap_or(Decimal::ZERO)
    }

    /// Returns the revenue across all dates.
    pub fn total_revenue(&self) -> Decimal {
        self.sales.values().copied().sum()
    }

    /// Returns the daily revenue in date order.
    pub fn sales(&self) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
        self.sales.iter().map(|(date, amount)| (*date, *amount))
    }

    fn record(&mut self, date: NaiveDate, amount: Decimal) {
        *self.sales.entry(date).or_insert(Decimal::ZERO) += amount;
    }
}
