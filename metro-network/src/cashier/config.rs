//! Tariff configuration for the point of sale.

use rust_decimal::Decimal;

/// Prices charged by a cashier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TariffConfig {
    /// Flat fee added to every ticket.
    pub ticket_fee: Decimal,

    /// Price of each stage travelled.
    pub price_per_stage: Decimal,

    /// Price of a new or refreshed subscription.
    pub subscription_price: Decimal,

    /// Number of days a subscription stays valid, counting its start date.
    pub subscription_validity_days: u32,
}

impl TariffConfig {
    /// Create a new tariff with the given parameters.
    pub fn new(
        ticket_fee: Decimal,
        price_per_stage: Decimal,
        subscription_price: Decimal,
        subscription_validity_days: u32,
    ) -> Self {
        Self {
            ticket_fee,
            price_per_stage,
            subscription_price,
            subscription_validity_days,
        }
    }

    /// Price of a ticket covering `stages` stages.
    pub fn ticket_price(&self, stages: usize) -> Decimal {
        self.price_per_stage * Decimal::from(stages as u64) + self.ticket_fee
    }
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            ticket_fee: Decimal::from(20),
            price_per_stage: Decimal::from(5),
            subscription_price: Decimal::from(3_000),
            subscription_validity_days: 30,
        }
    }
}
