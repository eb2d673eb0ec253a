//! Chosen plan versus the zero-extra baseline.
//!
//! The baseline always runs Avalanche with no discretionary extra. Minimums
//! freed by a payoff are still redirected inside the baseline, so it measures
//! the effect of the extra payment and strategy, not of redirection.

use rust_decimal::Decimal;

use crate::config::SimulationConfig;
use crate::error::PlanResult;
use crate::simulator::simulate_with_config;
use crate::types::{ComparisonResult, Debt, PaymentPlanResult, PlanRequest, Strategy};
use crate::validation::{outstanding_debts, validate_request};

/// Strategy used for the reference run.
pub const BASELINE_STRATEGY: Strategy = Strategy::Avalanche;

/// Runs the plan and the baseline on the same debts and derives the savings.
///
/// Like the simulator, this expects validated debts with positive balances.
/// Savings are not clamped: a poor strategy can report negative values.
pub fn compare(
    debts: &[Debt],
    extra_payment: Decimal,
    strategy: Strategy,
) -> PlanResult<ComparisonResult> {
    compare_with_config(debts, extra_payment, strategy, &SimulationConfig::default())
}

/// Same as `compare` with caller-supplied limits for both runs.
pub fn compare_with_config(
    debts: &[Debt],
    extra_payment: Decimal,
    strategy: Strategy,
    config: &SimulationConfig,
) -> PlanResult<ComparisonResult> {
    let plan = simulate_with_config(debts, extra_payment, strategy, config)?;
    let baseline = simulate_with_config(debts, Decimal::ZERO, BASELINE_STRATEGY, config)?;

    let months_saved = i64::from(baseline.months) - i64::from(plan.months);
    let interest_saved = baseline.total_interest_paid - plan.total_interest_paid;

    tracing::debug!(
        %strategy,
        months_saved,
        %interest_saved,
        plan_outcome = ?plan.outcome,
        baseline_outcome = ?baseline.outcome,
        "Compared plan against baseline"
    );

    Ok(ComparisonResult {
        plan,
        baseline,
        months_saved,
        interest_saved,
    })
}

/// Validates the request, skips debts that are already paid and compares.
///
/// # Errors
///
/// Returns `PlanError::Validation` for malformed input or when no debt has
/// a balance left, and `PlanError::Overflow` for runaway balances.
pub fn compare_plans(request: &PlanRequest) -> PlanResult<ComparisonResult> {
    compare_plans_with_config(request, &SimulationConfig::default())
}

/// Same as `compare_plans` with caller-supplied limits.
pub fn compare_plans_with_config(
    request: &PlanRequest,
    config: &SimulationConfig,
) -> PlanResult<ComparisonResult> {
    validate_request(request)?;
    let debts = outstanding_debts(&request.debts)?;
    compare_with_config(&debts, request.extra_payment, request.strategy, config)
}

/// Validated single run without the baseline.
pub fn plan_payoff(request: &PlanRequest) -> PlanResult<PaymentPlanResult> {
    plan_payoff_with_config(request, &SimulationConfig::default())
}

/// Same as `plan_payoff` with caller-supplied limits.
pub fn plan_payoff_with_config(
    request: &PlanRequest,
    config: &SimulationConfig,
) -> PlanResult<PaymentPlanResult> {
    validate_request(request)?;
    let debts = outstanding_debts(&request.debts)?;
    simulate_with_config(&debts, request.extra_payment, request.strategy, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PlanError, ValidationError};
    use crate::simulator::simulate;
    use crate::types::Outcome;
    use rust_decimal_macros::dec;

    fn car_and_card() -> Vec<Debt> {
        vec![
            Debt::new("car", "Car loan", dec!(3_000_000), dec!(10), dec!(100_000)),
            Debt::new("card", "Credit card", dec!(500_000), dec!(30), dec!(50_000)),
        ]
    }

    fn three_debts() -> Vec<Debt> {
        vec![
            Debt::new("store", "Store card", dec!(1_000_000), dec!(30), dec!(50_000)),
            Debt::new("phone", "Phone plan", dec!(200_000), dec!(10), dec!(20_000)),
            Debt::new("bank", "Bank loan", dec!(2_000_000), dec!(18), dec!(80_000)),
        ]
    }

    fn request(debts: Vec<Debt>, extra_payment: Decimal, strategy: Strategy) -> PlanRequest {
        PlanRequest {
            debts,
            extra_payment,
            strategy,
        }
    }

    #[test]
    fn test_extra_payment_saves_time_and_interest() {
        let comparison = compare(&car_and_card(), dec!(300_000), Strategy::Avalanche).unwrap();

        assert!(comparison.months_saved >= 0);
        assert!(comparison.interest_saved >= Decimal::ZERO);
        assert_eq!(comparison.baseline.months, 35);
        assert_eq!(comparison.plan.months, 9);
        assert_eq!(comparison.months_saved, 26);
        assert!((comparison.interest_saved - dec!(362_058.60)).abs() < dec!(0.05));
    }

    #[test]
    fn test_baseline_is_zero_extra_avalanche() {
        let comparison = compare(&three_debts(), dec!(100_000), Strategy::Snowball).unwrap();
        let expected = simulate(&three_debts(), Decimal::ZERO, Strategy::Avalanche).unwrap();

        assert_eq!(comparison.baseline, expected);
        assert_eq!(comparison.baseline.strategy, Strategy::Avalanche);
        assert_eq!(comparison.baseline.extra_payment, Decimal::ZERO);
        assert_eq!(comparison.plan.strategy, Strategy::Snowball);
    }

    #[test]
    fn test_baseline_still_redirects_freed_minimums() {
        let debts = vec![
            Debt::new("small", "Small", dec!(30_000), dec!(0), dec!(50_000)),
            Debt::new("big", "Big", dec!(1_000_000), dec!(12), dec!(100_000)),
        ];

        let comparison = compare(&debts, Decimal::ZERO, Strategy::Avalanche).unwrap();

        let big = comparison.baseline.schedule[0]
            .allocations
            .iter()
            .find(|payment| payment.debt_id == "big")
            .unwrap();
        assert_eq!(big.extra_paid, dec!(20_000));
        assert_eq!(comparison.months_saved, 0);
        assert_eq!(comparison.interest_saved, Decimal::ZERO);
    }

    #[test]
    fn test_savings_are_not_clamped() {
        // Clearing the store card in month 1 drops its large minimum from
        // every later month, so the plan ends up slower than the baseline.
        let debts = vec![
            Debt::new("store", "Store card", dec!(1_000), dec!(40), dec!(1_000)),
            Debt::new("phone", "Phone plan", dec!(1_000), dec!(10), dec!(500)),
            Debt::new("gym", "Gym", dec!(1_000), dec!(5), dec!(100)),
        ];

        let comparison = compare(&debts, dec!(100), Strategy::Snowball).unwrap();

        assert_eq!(comparison.plan.payoff_month("store"), Some(1));
        assert_eq!(comparison.baseline.months, 2);
        assert_eq!(comparison.plan.months, 6);
        assert_eq!(comparison.months_saved, -4);
        assert!(comparison.interest_saved < Decimal::ZERO);
        assert!((comparison.interest_saved - dec!(-4.34)).abs() < dec!(0.01));
    }

    #[test]
    fn test_capped_baseline_is_reported_as_capped() {
        let config = SimulationConfig {
            max_months: 20,
            ..SimulationConfig::default()
        };

        let comparison =
            compare_with_config(&car_and_card(), dec!(300_000), Strategy::Avalanche, &config)
                .unwrap();

        assert_eq!(comparison.plan.outcome, Outcome::PaidOff);
        assert_eq!(comparison.baseline.outcome, Outcome::Capped);
        assert_eq!(comparison.baseline.months, 21);
    }

    #[test]
    fn test_identical_inputs_give_byte_identical_output() {
        let first = compare(&three_debts(), dec!(150_000), Strategy::Snowball).unwrap();
        let second = compare(&three_debts(), dec!(150_000), Strategy::Snowball).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_concurrent_runs_match_sequential_runs() {
        let debts = three_debts();
        let sequential_plan = simulate(&debts, dec!(100_000), Strategy::Snowball).unwrap();
        let sequential_baseline = simulate(&debts, Decimal::ZERO, Strategy::Avalanche).unwrap();

        let (plan, baseline) = std::thread::scope(|scope| {
            let plan = scope.spawn(|| simulate(&debts, dec!(100_000), Strategy::Snowball));
            let baseline = scope.spawn(|| simulate(&debts, Decimal::ZERO, Strategy::Avalanche));
            (plan.join().unwrap().unwrap(), baseline.join().unwrap().unwrap())
        });

        assert_eq!(
            serde_json::to_string(&plan).unwrap(),
            serde_json::to_string(&sequential_plan).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&baseline).unwrap(),
            serde_json::to_string(&sequential_baseline).unwrap()
        );
    }

    #[test]
    fn test_compare_plans_rejects_invalid_input() {
        let mut debts = car_and_card();
        debts[1].min_payment = dec!(0);

        let err = compare_plans(&request(debts, dec!(0), Strategy::Avalanche)).unwrap_err();

        assert_eq!(
            err,
            PlanError::Validation(ValidationError::NonPositiveMinPayment {
                id: "card".into(),
                value: dec!(0)
            })
        );
    }

    #[test]
    fn test_compare_plans_skips_paid_debts() {
        let mut debts = car_and_card();
        debts.push(Debt::new("old", "Old loan", dec!(0), dec!(15), dec!(10_000)));

        let comparison =
            compare_plans(&request(debts, dec!(300_000), Strategy::Avalanche)).unwrap();
        let direct = compare(&car_and_card(), dec!(300_000), Strategy::Avalanche).unwrap();

        assert_eq!(comparison, direct);
    }

    #[test]
    fn test_compare_plans_with_nothing_owed() {
        let debts = vec![Debt::new("old", "Old loan", dec!(0), dec!(15), dec!(10_000))];

        let err = plan_payoff(&request(debts, dec!(0), Strategy::Snowball)).unwrap_err();

        assert_eq!(err, PlanError::Validation(ValidationError::NoOutstandingDebts));
    }

    #[test]
    fn test_plan_payoff_runs_requested_strategy() {
        let result =
            plan_payoff(&request(three_debts(), dec!(100_000), Strategy::Snowball)).unwrap();

        assert_eq!(result.strategy, Strategy::Snowball);
        assert_eq!(result.months, 18);
    }
}
