//! Month-by-month amortization of a set of debts.
//!
//! Each simulated month runs interest accrual, the minimum-payment pass and
//! the extra-payment pass, then records a ledger line and retires paid debts.
//! Minimums freed by a debt closing during the minimum pass are added to that
//! same month's extra pool. The run stops once every debt is retired
//! (`Outcome::PaidOff`) or the month counter passes the ceiling
//! (`Outcome::Capped`). Every sum is checked, so a balance outside decimal
//! range ends the run with `PlanError::Overflow` instead of a panic.
//!
//! All arithmetic keeps full `Decimal` precision; rounding is left to
//! `PaymentPlanResult::rounded`.

use rust_decimal::Decimal;

use crate::allocator::{WorkingDebt, allocate_extra};
use crate::config::SimulationConfig;
use crate::error::{PlanError, PlanResult};
use crate::types::{
    Debt, DebtPayment, DebtPayoff, MonthlyRecord, Outcome, PaymentPlanResult, Strategy,
};

/// Simulates paying off `debts` with the default limits.
///
/// The caller is expected to pass validated debts with positive balances and
/// minimum payments (see `validation`). The input slice is never modified.
///
/// # Errors
///
/// Returns `PlanError::Validation` if a rate cannot be converted and
/// `PlanError::Overflow` if a runaway balance exceeds decimal range.
pub fn simulate(
    debts: &[Debt],
    extra_payment: Decimal,
    strategy: Strategy,
) -> PlanResult<PaymentPlanResult> {
    simulate_with_config(debts, extra_payment, strategy, &SimulationConfig::default())
}

/// Same as `simulate` with caller-supplied limits.
pub fn simulate_with_config(
    debts: &[Debt],
    extra_payment: Decimal,
    strategy: Strategy,
    config: &SimulationConfig,
) -> PlanResult<PaymentPlanResult> {
    tracing::debug!(
        %strategy,
        debts = debts.len(),
        %extra_payment,
        "Starting payoff simulation"
    );

    let mut state = SimulationState::new(debts)?;
    let outcome = loop {
        state.step(extra_payment, strategy, config)?;

        if state.open_count() == 0 {
            break Outcome::PaidOff;
        }
        if state.month > config.max_months {
            break Outcome::Capped;
        }
    };

    if outcome == Outcome::Capped {
        tracing::warn!(
            %strategy,
            months = state.month,
            remaining = %state.last_remaining_balance(),
            "Payoff simulation hit the month ceiling with balances still owed"
        );
    }
    tracing::debug!(
        %strategy,
        months = state.month,
        ?outcome,
        total_interest = %state.total_interest,
        "Finished payoff simulation"
    );

    state.finish(outcome, strategy, extra_payment)
}

/// Working copy of the debts plus the ledger built so far.
struct SimulationState {
    debts: Vec<WorkingDebt>,
    open: Vec<bool>,
    month: u32,
    total_interest: Decimal,
    total_principal: Decimal,
    schedule: Vec<MonthlyRecord>,
    payoffs: Vec<DebtPayoff>,
}

#[derive(Default, Clone, Copy)]
struct MonthLine {
    interest: Decimal,
    minimum: Decimal,
    extra: Decimal,
}

impl SimulationState {
    fn new(debts: &[Debt]) -> PlanResult<Self> {
        let debts = debts
            .iter()
            .map(WorkingDebt::from_debt)
            .collect::<Result<Vec<_>, _>>()?;
        let open = debts.iter().map(|debt| debt.balance > Decimal::ZERO).collect();

        Ok(Self {
            debts,
            open,
            month: 0,
            total_interest: Decimal::ZERO,
            total_principal: Decimal::ZERO,
            schedule: Vec::new(),
            payoffs: Vec::new(),
        })
    }

    fn open_count(&self) -> usize {
        self.open.iter().filter(|open| **open).count()
    }

    fn open_indices(&self) -> Vec<usize> {
        (0..self.debts.len()).filter(|&index| self.open[index]).collect()
    }

    fn remaining_balance(&self, epsilon: Decimal) -> Option<Decimal> {
        self.open_indices()
            .into_iter()
            .map(|index| floor_to_zero(self.debts[index].balance, epsilon))
            .try_fold(Decimal::ZERO, |total, balance| total.checked_add(balance))
    }

    fn last_remaining_balance(&self) -> Decimal {
        self.schedule
            .last()
            .map(|record| record.remaining_balance)
            .unwrap_or_default()
    }

    fn step(
        &mut self,
        extra_payment: Decimal,
        strategy: Strategy,
        config: &SimulationConfig,
    ) -> PlanResult<()> {
        self.month += 1;
        let month = self.month;
        let overflow = || PlanError::Overflow { month };

        let open = self.open_indices();
        let mut lines = vec![MonthLine::default(); self.debts.len()];
        let mut interest_paid = Decimal::ZERO;
        let mut principal_paid = Decimal::ZERO;

        for &index in &open {
            let debt = &mut self.debts[index];
            if debt.balance <= Decimal::ZERO {
                continue;
            }
            let interest = debt
                .balance
                .checked_mul(debt.monthly_rate)
                .ok_or_else(overflow)?;
            debt.balance = debt.balance.checked_add(interest).ok_or_else(overflow)?;
            lines[index].interest = interest;
            interest_paid = interest_paid.checked_add(interest).ok_or_else(overflow)?;
        }
        self.total_interest = self
            .total_interest
            .checked_add(interest_paid)
            .ok_or_else(overflow)?;

        let mut freed_minimums = Decimal::ZERO;
        for &index in &open {
            let debt = &mut self.debts[index];
            let payment = debt.balance.min(debt.min_payment);
            debt.balance -= payment;
            lines[index].minimum = payment;
            principal_paid = principal_paid.checked_add(payment).ok_or_else(overflow)?;
            if payment < debt.min_payment {
                freed_minimums = freed_minimums
                    .checked_add(debt.min_payment - payment)
                    .ok_or_else(overflow)?;
            }
        }

        let available = extra_payment
            .checked_add(freed_minimums)
            .ok_or_else(overflow)?;
        let allocation = allocate_extra(&mut self.debts, available, strategy.policy());
        for &(index, payment) in &allocation.payments {
            lines[index].extra = payment;
            principal_paid = principal_paid.checked_add(payment).ok_or_else(overflow)?;
        }
        self.total_principal = self
            .total_principal
            .checked_add(principal_paid)
            .ok_or_else(overflow)?;

        let allocations: Vec<DebtPayment> = open
            .iter()
            .map(|&index| DebtPayment {
                debt_id: self.debts[index].id.clone(),
                interest: lines[index].interest,
                minimum_paid: lines[index].minimum,
                extra_paid: lines[index].extra,
                balance: floor_to_zero(self.debts[index].balance, config.balance_epsilon),
            })
            .collect();
        let remaining_balance = self
            .remaining_balance(config.balance_epsilon)
            .ok_or_else(overflow)?;

        tracing::trace!(
            month,
            %interest_paid,
            %principal_paid,
            %freed_minimums,
            unallocated = %allocation.unallocated,
            %remaining_balance,
            "Simulated month"
        );

        self.schedule.push(MonthlyRecord {
            month,
            principal_paid,
            interest_paid,
            remaining_balance,
            allocations,
        });

        for &index in &open {
            let debt = &mut self.debts[index];
            if debt.balance <= config.balance_epsilon {
                debt.balance = Decimal::ZERO;
                self.open[index] = false;
                self.payoffs.push(DebtPayoff {
                    debt_id: debt.id.clone(),
                    name: debt.name.clone(),
                    month,
                });
            }
        }

        Ok(())
    }

    fn finish(
        self,
        outcome: Outcome,
        strategy: Strategy,
        extra_payment: Decimal,
    ) -> PlanResult<PaymentPlanResult> {
        let total_paid = self
            .total_principal
            .checked_add(self.total_interest)
            .ok_or(PlanError::Overflow { month: self.month })?;

        Ok(PaymentPlanResult {
            outcome,
            strategy,
            extra_payment,
            months: self.month,
            total_interest_paid: self.total_interest,
            total_paid,
            schedule: self.schedule,
            payoffs: self.payoffs,
        })
    }
}

fn floor_to_zero(balance: Decimal, epsilon: Decimal) -> Decimal {
    if balance <= epsilon {
        Decimal::ZERO
    } else {
        balance
    }
}
