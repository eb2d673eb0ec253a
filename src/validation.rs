//! Input checks run before any simulation.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::{Debt, PlanRequest};

/// Collects every problem in the debt list, in input order, so a form can
/// flag all offending rows at once.
pub fn validate_debts(debts: &[Debt]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if debts.is_empty() {
        errors.push(ValidationError::NoDebts);
        return errors;
    }

    let mut seen = HashSet::new();
    for debt in debts {
        let id = || debt.id.clone();

        if !seen.insert(debt.id.as_str()) {
            errors.push(ValidationError::DuplicateId { id: id() });
        }
        if debt.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { id: id() });
        }
        if debt.balance < Decimal::ZERO {
            errors.push(ValidationError::NegativeBalance {
                id: id(),
                value: debt.balance,
            });
        }
        if debt.annual_rate < Decimal::ZERO {
            errors.push(ValidationError::NegativeDebtRate {
                id: id(),
                value: debt.annual_rate,
            });
        }
        if debt.min_payment <= Decimal::ZERO {
            errors.push(ValidationError::NonPositiveMinPayment {
                id: id(),
                value: debt.min_payment,
            });
        }
    }

    errors
}

/// Rejects a negative global extra payment.
pub fn validate_extra_payment(extra_payment: Decimal) -> Result<(), ValidationError> {
    if extra_payment < Decimal::ZERO {
        return Err(ValidationError::NegativeExtraPayment {
            value: extra_payment,
        });
    }
    Ok(())
}

/// Fails with the first problem found in the request.
pub fn validate_request(request: &PlanRequest) -> Result<(), ValidationError> {
    if let Some(first) = validate_debts(&request.debts).into_iter().next() {
        return Err(first);
    }
    validate_extra_payment(request.extra_payment)
}

/// Debts that still owe money. Zero balances are valid input but have
/// nothing to simulate.
pub fn outstanding_debts(debts: &[Debt]) -> Result<Vec<Debt>, ValidationError> {
    let outstanding: Vec<Debt> = debts
        .iter()
        .filter(|debt| debt.balance > Decimal::ZERO)
        .cloned()
        .collect();

    if outstanding.is_empty() {
        return Err(ValidationError::NoOutstandingDebts);
    }
    Ok(outstanding)
}
