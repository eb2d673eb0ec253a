//! Plain data exchanged with callers: debts in, schedules and comparisons out.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CURRENCY_DECIMAL_PLACES;
use crate::error::ValidationError;

/// An outstanding balance entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    /// Caller-assigned identifier, unique within a plan.
    pub id: String,
    /// Display name, e.g. "Visa card".
    pub name: String,
    /// Amount currently owed.
    pub balance: Decimal,
    /// Effective annual interest rate as a percentage (e.g., 24 for 24% E.A.).
    pub annual_rate: Decimal,
    /// Payment due every month while the debt is open.
    pub min_payment: Decimal,
}

impl Debt {
    /// Builds a debt from its form fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        balance: Decimal,
        annual_rate: Decimal,
        min_payment: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            annual_rate,
            min_payment,
        }
    }
}

/// Which debt receives discretionary money first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest annual rate first.
    #[default]
    Avalanche,
    /// Lowest remaining balance first.
    Snowball,
}

impl Strategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Strategy; 2] = [Strategy::Avalanche, Strategy::Snowball];

    /// Lowercase name, as serialized and parsed.
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownStrategy { name: s.to_string() })
    }
}

/// Everything needed to simulate one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Debts to pay down, in the order the user entered them.
    pub debts: Vec<Debt>,
    /// Discretionary money added on top of the minimums every month.
    pub extra_payment: Decimal,
    /// Ordering used for the extra-payment pass.
    pub strategy: Strategy,
}

/// How a simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every debt reached zero.
    PaidOff,
    /// The month ceiling was hit with balances still owed.
    Capped,
}

/// One debt's share of a simulated month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtPayment {
    /// Identifier of the debt this line belongs to.
    pub debt_id: String,
    /// Interest accrued this month.
    pub interest: Decimal,
    /// Amount covered by the minimum-payment pass.
    pub minimum_paid: Decimal,
    /// Amount received from the extra-payment pass.
    pub extra_paid: Decimal,
    /// Balance left at the end of the month, zero once within epsilon.
    pub balance: Decimal,
}

/// Ledger line for a single simulated month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// 1-based month number.
    pub month: u32,
    /// Minimum and extra payments made this month.
    pub principal_paid: Decimal,
    /// Interest accrued across all debts this month.
    pub interest_paid: Decimal,
    /// Sum of all balances after this month's payments.
    pub remaining_balance: Decimal,
    /// Per-debt breakdown in input order, for debts open at the start of the month.
    pub allocations: Vec<DebtPayment>,
}

/// The month a debt was retired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtPayoff {
    /// Identifier of the retired debt.
    pub debt_id: String,
    /// Display name of the retired debt.
    pub name: String,
    /// Month in which the balance reached zero.
    pub month: u32,
}

/// Result of a single simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlanResult {
    /// Whether the plan finished or hit the month ceiling.
    pub outcome: Outcome,
    /// Ordering used for the extra-payment pass.
    pub strategy: Strategy,
    /// Discretionary amount added every month.
    pub extra_payment: Decimal,
    /// Number of simulated months, equal to `schedule.len()`.
    pub months: u32,
    /// Interest accrued over the whole schedule.
    pub total_interest_paid: Decimal,
    /// Principal plus interest paid over the whole schedule.
    pub total_paid: Decimal,
    /// One ledger line per simulated month.
    pub schedule: Vec<MonthlyRecord>,
    /// Retirement order; debts still owed when capped are absent.
    pub payoffs: Vec<DebtPayoff>,
}

impl PaymentPlanResult {
    /// True only when every debt reached zero.
    pub fn is_paid_off(&self) -> bool {
        self.outcome == Outcome::PaidOff
    }

    /// Month in which the given debt was retired, if it was.
    pub fn payoff_month(&self, debt_id: &str) -> Option<u32> {
        self.payoffs
            .iter()
            .find(|payoff| payoff.debt_id == debt_id)
            .map(|payoff| payoff.month)
    }

    /// Copy rounded to whole currency units (cents).
    pub fn for_display(&self) -> Self {
        self.rounded(CURRENCY_DECIMAL_PLACES)
    }

    /// Copy with every money amount rounded to `dp` decimal places, for display.
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            extra_payment: self.extra_payment.round_dp(dp),
            total_interest_paid: self.total_interest_paid.round_dp(dp),
            total_paid: self.total_paid.round_dp(dp),
            schedule: self.schedule.iter().map(|record| record.rounded(dp)).collect(),
            ..self.clone()
        }
    }
}

impl MonthlyRecord {
    fn rounded(&self, dp: u32) -> Self {
        Self {
            month: self.month,
            principal_paid: self.principal_paid.round_dp(dp),
            interest_paid: self.interest_paid.round_dp(dp),
            remaining_balance: self.remaining_balance.round_dp(dp),
            allocations: self
                .allocations
                .iter()
                .map(|payment| DebtPayment {
                    debt_id: payment.debt_id.clone(),
                    interest: payment.interest.round_dp(dp),
                    minimum_paid: payment.minimum_paid.round_dp(dp),
                    extra_paid: payment.extra_paid.round_dp(dp),
                    balance: payment.balance.round_dp(dp),
                })
                .collect(),
        }
    }
}

/// A chosen plan measured against the zero-extra avalanche baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Run with the caller's strategy and extra payment.
    pub plan: PaymentPlanResult,
    /// Zero-extra avalanche run.
    pub baseline: PaymentPlanResult,
    /// `baseline.months - plan.months`; negative when the plan is slower.
    pub months_saved: i64,
    /// `baseline.total_interest_paid - plan.total_interest_paid`; may be negative.
    pub interest_saved: Decimal,
}

impl ComparisonResult {
    /// Copy rounded to whole currency units (cents).
    pub fn for_display(&self) -> Self {
        self.rounded(CURRENCY_DECIMAL_PLACES)
    }

    /// Copy with both runs and the savings rounded to `dp` decimal places.
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            plan: self.plan.rounded(dp),
            baseline: self.baseline.rounded(dp),
            months_saved: self.months_saved,
            interest_saved: self.interest_saved.round_dp(dp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("avalanche", Strategy::Avalanche)]
    #[case("Snowball", Strategy::Snowball)]
    #[case("  AVALANCHE ", Strategy::Avalanche)]
    fn test_strategy_parses_case_insensitively(#[case] text: &str, #[case] expected: Strategy) {
        assert_eq!(text.parse::<Strategy>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let err = "hybrid".parse::<Strategy>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownStrategy {
                name: "hybrid".into()
            }
        );
    }

    #[test]
    fn test_strategy_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Strategy::Snowball).unwrap(), "\"snowball\"");
        assert_eq!(Strategy::Avalanche.to_string(), "avalanche");
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Outcome::PaidOff).unwrap(), "\"paid_off\"");
    }

    #[test]
    fn test_rounded_keeps_structure_and_rounds_money() {
        let result = PaymentPlanResult {
            outcome: Outcome::PaidOff,
            strategy: Strategy::Avalanche,
            extra_payment: dec!(10),
            months: 1,
            total_interest_paid: dec!(1.23456),
            total_paid: dec!(101.23456),
            schedule: vec![MonthlyRecord {
                month: 1,
                principal_paid: dec!(100),
                interest_paid: dec!(1.23456),
                remaining_balance: dec!(0),
                allocations: vec![DebtPayment {
                    debt_id: "a".into(),
                    interest: dec!(1.23456),
                    minimum_paid: dec!(50.005),
                    extra_paid: dec!(49.995),
                    balance: dec!(0),
                }],
            }],
            payoffs: vec![DebtPayoff {
                debt_id: "a".into(),
                name: "Card".into(),
                month: 1,
            }],
        };

        let rounded = result.for_display();

        assert_eq!(rounded.total_interest_paid, dec!(1.23));
        assert_eq!(rounded.schedule[0].interest_paid, dec!(1.23));
        assert_eq!(rounded.schedule[0].allocations[0].minimum_paid, dec!(50.00));
        assert_eq!(rounded.payoffs, result.payoffs);
        assert_eq!(result.total_interest_paid, dec!(1.23456));
    }
}
