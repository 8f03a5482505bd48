//! Revenue/margin simulator under the linear elasticity approximation.
//!
//! Given a category's elasticity, its baseline revenue, a proposed price
//! change, and an assumed margin rate, projects the new revenue and
//! profit. The arithmetic:
//!
//! - quantity ratio: `1 + elasticity * dp` (dp = price change fraction)
//! - price ratio: `1 + dp`
//! - revenue ratio: quantity ratio × price ratio
//! - cost scales with unit volume, not price, so
//!   `new_cost = baseline_revenue * (1 - margin) * quantity_ratio`
//!
//! The quantity ratio is deliberately NOT clamped at zero: a large price
//! cut against a strongly elastic category can push it negative, which is
//! physically meaningless but preserved so extreme scenarios are visible
//! instead of silently flattened.

use serde::Serialize;

use crate::advice::{classify, Advice};
use crate::elasticity::ElasticityTable;
use crate::error::{PricingError, PricingResult};
use crate::thresholds;

/// What to do when the baseline profit is zero and the profit change
/// ratio is therefore undefined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ZeroProfitPolicy {
    /// Fail with [`PricingError::ZeroBaselineProfit`]. The default: an
    /// undefined ratio should be visible, not guessed at.
    #[default]
    Error,
    /// Report the ratio as 0, matching the legacy dashboard display.
    /// The scan pipeline uses this so zero-revenue categories still
    /// produce an accountable candidate.
    ReportZero,
}

/// One simulation scenario against a loaded table.
#[derive(Clone, Debug)]
pub struct SimulationRequest {
    pub target_category: String,
    /// Price change as a percentage, e.g. `10.0` for +10%. Any finite
    /// value is accepted; the [-30, 30] range is a UI convention only.
    pub price_change_pct: f64,
    /// Margin rate as a fraction strictly inside (0, 1).
    pub margin_rate: f64,
}

/// Projected outcome of a price change. Ephemeral: computed per call,
/// never persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationResult {
    pub expected_revenue: f64,
    pub revenue_change: f64,
    pub revenue_change_ratio: f64,
    pub expected_profit_change: f64,
    pub profit_change_ratio: f64,
    pub is_elastic: bool,
}

/// Check that a margin rate is a fraction strictly inside (0, 1).
/// NaN fails both comparisons and is rejected too.
pub fn validate_margin_rate(margin_rate: f64) -> PricingResult<()> {
    if !(margin_rate > 0.0 && margin_rate < 1.0) {
        return Err(PricingError::InvalidMargin { value: margin_rate });
    }
    Ok(())
}

/// Project revenue and profit for a proposed price change, failing on a
/// zero baseline profit.
pub fn simulate(
    elasticity: f64,
    baseline_revenue: f64,
    price_change_pct: f64,
    margin_rate: f64,
) -> PricingResult<SimulationResult> {
    simulate_with_policy(
        elasticity,
        baseline_revenue,
        price_change_pct,
        margin_rate,
        ZeroProfitPolicy::Error,
    )
}

/// [`simulate`] with an explicit zero-profit policy.
pub fn simulate_with_policy(
    elasticity: f64,
    baseline_revenue: f64,
    price_change_pct: f64,
    margin_rate: f64,
    policy: ZeroProfitPolicy,
) -> PricingResult<SimulationResult> {
    validate_margin_rate(margin_rate)?;

    let dp = price_change_pct / 100.0;
    let new_quantity_ratio = 1.0 + elasticity * dp;
    let new_price_ratio = 1.0 + dp;
    let new_revenue_ratio = new_quantity_ratio * new_price_ratio;

    let expected_revenue = baseline_revenue * new_revenue_ratio;
    let revenue_change = expected_revenue - baseline_revenue;
    let revenue_change_ratio = new_revenue_ratio - 1.0;

    let current_profit = baseline_revenue * margin_rate;
    let cost_base = baseline_revenue * (1.0 - margin_rate);
    let new_cost = cost_base * new_quantity_ratio;
    let expected_profit = expected_revenue - new_cost;
    let expected_profit_change = expected_profit - current_profit;

    let profit_change_ratio = if current_profit != 0.0 {
        expected_profit_change / current_profit
    } else {
        match policy {
            ZeroProfitPolicy::Error => return Err(PricingError::ZeroBaselineProfit),
            ZeroProfitPolicy::ReportZero => 0.0,
        }
    };

    Ok(SimulationResult {
        expected_revenue,
        revenue_change,
        revenue_change_ratio,
        expected_profit_change,
        profit_change_ratio,
        is_elastic: elasticity.abs() > thresholds::ELASTIC_BOUNDARY,
    })
}

/// Resolve a request against the table, simulate, and classify the
/// outcome in one call. This is the entry point the CLI uses.
pub fn simulate_request(
    table: &ElasticityTable,
    request: &SimulationRequest,
) -> PricingResult<(SimulationResult, Advice)> {
    let row = table.get(&request.target_category)?;
    let result = simulate(
        row.mean_elasticity,
        row.category_revenue,
        request.price_change_pct,
        request.margin_rate,
    )?;
    let advice = classify(
        row.mean_elasticity,
        request.price_change_pct,
        result.revenue_change,
        result.profit_change_ratio,
    );
    Ok((result, advice))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elasticity::CategoryElasticity;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn zero_price_change_is_identity() {
        let r = simulate(-2.0, 1000.0, 0.0, 0.25).unwrap();
        assert_close(r.expected_revenue, 1000.0);
        assert_close(r.revenue_change, 0.0);
        assert_close(r.revenue_change_ratio, 0.0);
        assert_close(r.expected_profit_change, 0.0);
        assert_close(r.profit_change_ratio, 0.0);
    }

    #[test]
    fn elastic_price_cut_grows_revenue() {
        // quantity ratio 1.20, price ratio 0.90, revenue ratio 1.08
        let r = simulate(-2.0, 1000.0, -10.0, 0.25).unwrap();
        assert_close(r.expected_revenue, 1080.0);
        assert_close(r.revenue_change, 80.0);
        assert_close(r.revenue_change_ratio, 0.08);
        assert!(r.is_elastic);
    }

    #[test]
    fn inelastic_price_hike_grows_profit() {
        // quantity ratio 0.95, price ratio 1.10, revenue ratio 1.045
        // profit: 250 -> 1045 - 750*0.95 = 332.5, change 82.5, ratio 0.33
        let r = simulate(-0.5, 1000.0, 10.0, 0.25).unwrap();
        assert_close(r.expected_revenue, 1045.0);
        assert_close(r.revenue_change, 45.0);
        assert_close(r.expected_profit_change, 82.5);
        assert_close(r.profit_change_ratio, 0.33);
        assert!(!r.is_elastic);
    }

    #[test]
    fn zero_baseline_fails_under_default_policy() {
        let result = simulate(-2.0, 0.0, -10.0, 0.25);
        assert!(matches!(result, Err(PricingError::ZeroBaselineProfit)));
    }

    #[test]
    fn zero_baseline_reports_zero_under_legacy_policy() {
        let r = simulate_with_policy(-2.0, 0.0, -10.0, 0.25, ZeroProfitPolicy::ReportZero)
            .unwrap();
        assert_close(r.expected_revenue, 0.0);
        assert_close(r.profit_change_ratio, 0.0);
    }

    #[test]
    fn margin_must_be_a_fraction_inside_unit_interval() {
        for bad in [0.0, 1.0, -0.2, 25.0, f64::NAN] {
            let result = simulate(-1.5, 1000.0, 5.0, bad);
            assert!(
                matches!(result, Err(PricingError::InvalidMargin { .. })),
                "margin {bad} should be rejected"
            );
        }
    }

    #[test]
    fn margin_validation_is_exposed_for_callers() {
        assert!(validate_margin_rate(0.25).is_ok());
        assert!(matches!(
            validate_margin_rate(25.0),
            Err(PricingError::InvalidMargin { value }) if value == 25.0
        ));
        assert!(validate_margin_rate(f64::NAN).is_err());
    }

    #[test]
    fn identical_inputs_give_bit_identical_results() {
        let a = simulate(-1.37, 8421.55, 12.5, 0.31).unwrap();
        let b = simulate(-1.37, 8421.55, 12.5, 0.31).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn is_elastic_is_false_at_the_boundary() {
        assert!(!simulate(-1.0, 1000.0, 5.0, 0.25).unwrap().is_elastic);
        assert!(!simulate(1.0, 1000.0, 5.0, 0.25).unwrap().is_elastic);
        assert!(simulate(-1.01, 1000.0, 5.0, 0.25).unwrap().is_elastic);
    }

    #[test]
    fn extreme_inputs_pass_through_unclamped() {
        // elasticity -8 with a -30% cut: quantity ratio 1 + 2.4 = 3.4.
        // elasticity +8 with a -30% cut: quantity ratio 1 - 2.4 = -1.4,
        // which flows through as negative revenue rather than clamping.
        let r = simulate(8.0, 1000.0, -30.0, 0.25).unwrap();
        assert_close(r.expected_revenue, 1000.0 * (-1.4) * 0.7);
        assert!(r.expected_revenue < 0.0);
    }

    #[test]
    fn request_resolves_against_the_table() {
        let table = ElasticityTable::from_rows(vec![CategoryElasticity {
            category: "electronics".into(),
            mean_elasticity: -2.0,
            category_revenue: 1000.0,
            avg_r_squared: Some(0.4),
        }])
        .unwrap();

        let (result, advice) = simulate_request(
            &table,
            &SimulationRequest {
                target_category: "electronics".into(),
                price_change_pct: -10.0,
                margin_rate: 0.25,
            },
        )
        .unwrap();
        assert_close(result.expected_revenue, 1080.0);
        assert_eq!(advice.kind, crate::advice::AdviceKind::PriceCutValid);

        let missing = simulate_request(
            &table,
            &SimulationRequest {
                target_category: "garden_tools".into(),
                price_change_pct: -10.0,
                margin_rate: 0.25,
            },
        );
        assert!(matches!(missing, Err(PricingError::UnknownCategory(_))));
    }
}
