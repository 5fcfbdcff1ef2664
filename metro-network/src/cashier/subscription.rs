//! Subscriptions and their numbering.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use tracing::debug;

use super::error::CashierError;

/// A travel subscription valid for a fixed number of days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    number: String,
    start_date: NaiveDate,
    validity_days: u32,
}

impl Subscription {
    /// Returns the subscription number.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the date the subscription (last) started.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the first date on which the subscription is no longer valid.
    pub fn expires_on(&self) -> NaiveDate {
        self.start_date
            .checked_add_days(Days::new(u64::from(self.validity_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns true if the subscription can be used on `date`.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date < self.expires_on()
    }
}

/// Highest number a registry can issue.
const MAX_NUMBER: u32 = 9_999;

/// Issues subscriptions with sequential numbers and tracks them by number.
///
/// Numbers are four zero-padded digits: `0000`, `0001`, and so on up to
/// `9999`. Issuing beyond that fails rather than widening the number.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionRegistry {
    next_number: u32,
    subscriptions: BTreeMap<String, Subscription>,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new subscription starting on `start_date`, valid for `validity_days`.
    pub fn issue(
        &mut self,
        start_date: NaiveDate,
        validity_days: u32,
    ) -> Result<Subscription, CashierError> {
        if self.next_number > MAX_NUMBER {
            return Err(CashierError::SubscriptionNumbersExhausted);
        }
        let number = format!("{:04}", self.next_number);
        self.next_number += 1;

        let subscription = Subscription {
            number: number.clone(),
            start_date,
            validity_days,
        };
        self.subscriptions.insert(number, subscription.clone());

        debug!(number = %subscription.number, %start_date, validity_days, "issued subscription");
        Ok(subscription)
    }

    /// Restart an existing subscription on `date`, valid for `validity_days`.
    pub fn refresh(
        &mut self,
        number: &str,
        date: NaiveDate,
        validity_days: u32,
    ) -> Result<Subscription, CashierError> {
        let subscription = self
            .subscriptions
            .get_mut(number)
            .ok_or_else(|| CashierError::SubscriptionNotFound(number.to_string()))?;
        subscription.start_date = date;
        subscription.validity_days = validity_days;

        debug!(number, %date, validity_days, "refreshed subscription");
        Ok(subscription.clone())
    }

    /// Look up a subscription by number.
    pub fn get(&self, number: &str) -> Option<&Subscription> {
        self.subscriptions.get(number)
    }

    /// Returns the number of subscriptions issued.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns true if no subscription has been issued.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
