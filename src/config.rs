//! Simulation limits and numeric granularity.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Hard ceiling on simulated months: a 50-year amortization horizon.
pub const MAX_MONTHS: u32 = 600;

/// Smallest balance still considered owed, one cent. Anything at or below it
/// is treated as paid off and reported as zero.
pub const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Decimal places used when presenting money amounts.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Tunable limits for a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// A run whose month counter passes this value stops with `Outcome::Capped`.
    pub max_months: u32,
    /// Balances at or below this amount are retired.
    pub balance_epsilon: Decimal,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_months: MAX_MONTHS,
            balance_epsilon: BALANCE_EPSILON,
        }
    }
}
