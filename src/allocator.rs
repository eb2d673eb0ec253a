//! Ordering policies and the extra-payment waterfall.
//!
//! The working debts live in an arena kept in input order. Each allocation
//! sorts a fresh list of indices into that arena, so the arena itself is
//! never reordered. Sorting is stable: debts that compare equal keep their
//! input order.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::rate::monthly_rate_from_annual;
use crate::types::{Debt, Strategy};

/// Simulation-owned copy of a debt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDebt {
    /// Identifier copied from the caller's debt.
    pub id: String,
    /// Display name copied from the caller's debt.
    pub name: String,
    /// Effective annual rate in percent, used by avalanche ordering.
    pub annual_rate: Decimal,
    /// Periodic rate derived from `annual_rate`.
    pub monthly_rate: Decimal,
    /// Payment due every month while the debt is open.
    pub min_payment: Decimal,
    /// Amount still owed; the only field the simulation mutates.
    pub balance: Decimal,
}

impl WorkingDebt {
    /// Copies a caller debt and converts its rate.
    pub fn from_debt(debt: &Debt) -> Result<Self, ValidationError> {
        Ok(Self {
            id: debt.id.clone(),
            name: debt.name.clone(),
            annual_rate: debt.annual_rate,
            monthly_rate: monthly_rate_from_annual(debt.annual_rate)?,
            min_payment: debt.min_payment,
            balance: debt.balance,
        })
    }
}

/// Decides which open debt receives extra money first.
pub trait PayoffPolicy: Send + Sync {
    /// Lowercase strategy name, matching `Strategy`'s serialized form.
    fn name(&self) -> &'static str;

    /// `Ordering::Less` means `a` is paid before `b`.
    fn compare(&self, a: &WorkingDebt, b: &WorkingDebt) -> Ordering;
}

/// Avalanche: highest annual rate first.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestRateFirst;

impl PayoffPolicy for HighestRateFirst {
    fn name(&self) -> &'static str {
        "avalanche"
    }

    fn compare(&self, a: &WorkingDebt, b: &WorkingDebt) -> Ordering {
        b.annual_rate.cmp(&a.annual_rate)
    }
}

/// Snowball: lowest current balance first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestBalanceFirst;

impl PayoffPolicy for LowestBalanceFirst {
    fn name(&self) -> &'static str {
        "snowball"
    }

    fn compare(&self, a: &WorkingDebt, b: &WorkingDebt) -> Ordering {
        a.balance.cmp(&b.balance)
    }
}

impl Strategy {
    /// Looks up the ordering policy for this strategy.
    pub fn policy(self) -> &'static dyn PayoffPolicy {
        match self {
            Strategy::Avalanche => &HighestRateFirst,
            Strategy::Snowball => &LowestBalanceFirst,
        }
    }
}

/// Money handed out by one extra-payment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    /// `(arena index, amount)` in the order the payments were made.
    pub payments: Vec<(usize, Decimal)>,
    /// Extra left over once every open debt was cleared.
    pub unallocated: Decimal,
}

/// Indices of debts with a positive balance, sorted by `policy`.
pub fn payment_order(debts: &[WorkingDebt], policy: &dyn PayoffPolicy) -> Vec<usize> {
    let mut view: Vec<usize> = debts
        .iter()
        .enumerate()
        .filter(|(_, debt)| debt.balance > Decimal::ZERO)
        .map(|(index, _)| index)
        .collect();
    view.sort_by(|&a, &b| policy.compare(&debts[a], &debts[b]));
    view
}

/// Pours `available` over the open debts in policy order, each debt taking at
/// most its balance, until the money or the debts run out.
pub fn allocate_extra(
    debts: &mut [WorkingDebt],
    available: Decimal,
    policy: &dyn PayoffPolicy,
) -> Allocation {
    let mut remaining = available;
    let mut payments = Vec::new();

    for index in payment_order(debts, policy) {
        if remaining <= Decimal::ZERO {
            break;
        }
        let debt = &mut debts[index];
        let payment = debt.balance.min(remaining);
        debt.balance -= payment;
        remaining -= payment;
        payments.push((index, payment));
    }

    Allocation {
        payments,
        unallocated: remaining.max(Decimal::ZERO),
    }
}
