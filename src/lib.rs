//! `debt_payoff` simulates paying down a set of debts month by month.
//!
//! Given balances with differing effective annual rates and minimum payments,
//! an optional extra monthly payment and a prioritization strategy, it builds
//! the amortization schedule, the payoff horizon and the total interest paid,
//! and measures the savings against a baseline plan:
//! - **Avalanche**: extra money goes to the debt with the highest rate first.
//! - **Snowball**: extra money goes to the debt with the lowest balance first.
//!
//! The baseline always pays no discretionary extra and uses avalanche
//! ordering. A plan that cannot be paid off within 50 years comes back with
//! `Outcome::Capped` and must not be shown as a finished schedule.
//!
//! ## Usage
//!
//! ```rust
//! use debt_payoff::{compare_plans, Debt, Outcome, PlanRequest, Strategy};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let request = PlanRequest {
//!         debts: vec![
//!             Debt::new("car", "Car loan", dec!(3_000_000), dec!(10), dec!(100_000)),
//!             Debt::new("card", "Credit card", dec!(500_000), dec!(30), dec!(50_000)),
//!         ],
//!         extra_payment: dec!(300_000),
//!         strategy: Strategy::Avalanche,
//!     };
//!
//!     match compare_plans(&request) {
//!         Ok(comparison) => {
//!             let plan = comparison.for_display().plan;
//!             assert_eq!(plan.outcome, Outcome::PaidOff);
//!             println!("Debt free in {} months", plan.months);
//!             println!("Total interest: {}", plan.total_interest_paid);
//!             println!("Months saved:   {}", comparison.months_saved);
//!             println!("Interest saved: {:.2}", comparison.interest_saved);
//!         }
//!         Err(e) => {
//!             eprintln!("Cannot build a payoff plan: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod allocator;
pub mod comparator;
pub mod config;
pub mod error;
pub mod rate;
pub mod record;
pub mod simulator;
pub mod types;
pub mod validation;

pub use allocator::{PayoffPolicy, allocate_extra};
pub use comparator::{
    compare, compare_plans, compare_plans_with_config, compare_with_config, plan_payoff,
    plan_payoff_with_config,
};
pub use config::{BALANCE_EPSILON, CURRENCY_DECIMAL_PLACES, MAX_MONTHS, SimulationConfig};
pub use error::{PlanError, PlanResult, ValidationError};
pub use rate::monthly_rate_from_annual;
pub use record::PlanRecord;
pub use simulator::{simulate, simulate_with_config};
pub use types::{
    ComparisonResult, Debt, DebtPayment, DebtPayoff, MonthlyRecord, Outcome, PaymentPlanResult,
    PlanRequest, Strategy,
};
pub use validation::{validate_debts, validate_request};
