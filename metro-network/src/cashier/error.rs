//! Point-of-sale error types.

use crate::metro::MetroError;

/// Errors from selling tickets and subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CashierError {
    /// The ticket could not be priced
    #[error("cannot price ticket: {0}")]
    Route(#[from] MetroError),

    /// No subscription has this number
    #[error("subscription does not exist: {0}")]
    SubscriptionNotFound(String),

    /// Every four-digit subscription number has been issued
    #[error("no subscription numbers left to issue")]
    SubscriptionNumbersExhausted,
}
