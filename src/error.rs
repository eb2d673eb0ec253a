//! Error types for payoff planning.
//!
//! Validation problems are reported before any simulation starts. A plan that
//! never pays off is not an error: it comes back as `Outcome::Capped`.

use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Malformed input that blocks plan generation until corrected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The debt list was empty.
    #[error("Add at least one debt to build a payoff plan")]
    NoDebts,

    /// Every debt in the list already has a zero balance.
    #[error("Every debt is already paid off")]
    NoOutstandingDebts,

    /// A debt has a blank name.
    #[error("Debt {id}: name cannot be empty")]
    EmptyName {
        /// Identifier of the offending debt.
        id: String,
    },

    /// Two debts share the same identifier.
    #[error("Debt id {id} is used more than once")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },

    /// A debt balance is below zero.
    #[error("Debt {id}: balance cannot be negative (got {value})")]
    NegativeBalance {
        /// Identifier of the offending debt.
        id: String,
        /// The rejected balance.
        value: Decimal,
    },

    /// An annual rate handed to the rate converter is below zero.
    #[error("Annual rate cannot be negative (got {value}%)")]
    NegativeRate {
        /// The rejected rate, in percent.
        value: Decimal,
    },

    /// An annual rate too large to convert to a monthly rate.
    #[error("Annual rate {value}% is out of range")]
    RateOutOfRange {
        /// The rejected rate, in percent.
        value: Decimal,
    },

    /// A debt carries a negative annual rate.
    #[error("Debt {id}: annual rate cannot be negative (got {value}%)")]
    NegativeDebtRate {
        /// Identifier of the offending debt.
        id: String,
        /// The rejected rate, in percent.
        value: Decimal,
    },

    /// A debt minimum payment is zero or negative.
    #[error("Debt {id}: minimum payment must be greater than zero (got {value})")]
    NonPositiveMinPayment {
        /// Identifier of the offending debt.
        id: String,
        /// The rejected minimum payment.
        value: Decimal,
    },

    /// A strategy name that matches no known ordering policy.
    #[error("Unknown strategy '{name}', expected avalanche or snowball")]
    UnknownStrategy {
        /// The text that failed to parse.
        name: String,
    },

    /// The global extra payment is below zero.
    #[error("Extra payment cannot be negative (got {value})")]
    NegativeExtraPayment {
        /// The rejected amount.
        value: Decimal,
    },
}

/// Failure of a planning call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Input was rejected before simulating.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A balance grew past what a decimal can hold.
    #[error("Balance overflowed in month {month}; the plan cannot be paid off")]
    Overflow {
        /// Month in which the overflow happened.
        month: u32,
    },
}
