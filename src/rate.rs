//! Effective annual rate conversion.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::error::ValidationError;

/// Normalizes an effective annual rate percentage to a monthly periodic rate.
///
/// The monthly rate compounds back to the annual one:
/// `r_m = (1 + annual_rate / 100)^(1/12) - 1`. A zero rate maps to exactly zero.
///
/// # Errors
///
/// Returns `ValidationError::NegativeRate` when `annual_rate` is below zero and
/// `ValidationError::RateOutOfRange` when the power cannot be represented.
pub fn monthly_rate_from_annual(annual_rate: Decimal) -> Result<Decimal, ValidationError> {
    if annual_rate < Decimal::ZERO {
        return Err(ValidationError::NegativeRate { value: annual_rate });
    }
    if annual_rate.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let base = Decimal::ONE + annual_rate / Decimal::ONE_HUNDRED;
    let exponent = Decimal::ONE / dec!(12);

    let power_result = base
        .checked_powd(exponent)
        .ok_or(ValidationError::RateOutOfRange { value: annual_rate })?;

    Ok(power_result - Decimal::ONE)
}
