//! End-to-end valuation tests

use creator_valuation::simulation::{analyze_sensitivity, run_monte_carlo, seeded_rng, Perturbation};
use creator_valuation::valuation::{
    compute_break_even_year, compute_npv, summarize_due_diligence, AudienceMetric, DiscountInput,
    DueDiligenceInput, ManualRevenue, TokenSizingRequest, ValuationEngine, ValuationError,
    ValuationInput,
};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn test_manual_revenue_offer() {
    let input = ValuationInput::manual(100_000.0, 10.0, 10.0, 5, 50.0);
    let result = ValuationEngine::default().evaluate(&input).unwrap();

    assert_eq!(result.annual_cash_flow, 10_000.0);
    assert!(close(result.npv, 37_907.87, 0.01));
    assert!(close(result.recommended_offer, 18_953.93, 0.01));
    assert!(close(result.scenarios.high.npv, result.npv * 1.1, 1e-6));
    assert!(close(result.scenarios.low.npv, result.npv * 0.9, 1e-6));
    assert!(result.token_sizing.is_none());
}

#[test]
fn test_audience_revenue_offer() {
    let mut input = ValuationInput::manual(0.0, 10.0, 0.0, 4, 50.0);
    input.manual_revenue = None;
    input.use_public_data = true;
    input.conversion_factor = 0.005;
    input.audience_metrics = vec![
        AudienceMetric::new(10_000.0, 5.0),
        AudienceMetric::new(20_000.0, 2.5).with_weight(0.0),
    ];

    let result = ValuationEngine::default().evaluate(&input).unwrap();
    // 10000 * 0.05 * 0.005
    assert!(close(result.estimated_annual_revenue, 2.5, 1e-9));
    assert!(close(result.npv, 0.25 * 4.0, 1e-9));
}

#[test]
fn test_blank_manual_revenue_falls_back_to_audience() {
    let mut input = ValuationInput::manual(0.0, 100.0, 0.0, 1, 100.0);
    input.manual_revenue = Some(ManualRevenue::Text("  ".to_string()));
    input.use_public_data = true;
    input.conversion_factor = 1.0;
    input.audience_metrics = vec![AudienceMetric::new(1_000.0, 10.0)];

    let result = ValuationEngine::default().evaluate(&input).unwrap();
    assert!(close(result.estimated_annual_revenue, 100.0, 1e-9));
}

#[test]
fn test_token_sizing_prices_at_premium() {
    let mut input = ValuationInput::manual(100_000.0, 10.0, 10.0, 5, 50.0);
    input.token_sizing = Some(TokenSizingRequest {
        target_unit_value: 10.0,
        offering_premium_percent: 20.0,
    });

    let result = ValuationEngine::default().evaluate(&input).unwrap();
    let sizing = result.token_sizing.unwrap();
    assert!(close(sizing.recommended_token_price, 12.0, 1e-12));
    assert!(close(sizing.recommended_supply, result.npv / 10.0, 1e-9));
    assert!(close(
        sizing.token_sale_revenue,
        sizing.recommended_supply * 12.0,
        1e-6
    ));
}

#[test]
fn test_invalid_input_names_field() {
    let mut input = ValuationInput::manual(100_000.0, 10.0, 10.0, 5, 50.0);
    input.manual_revenue = Some(ManualRevenue::Text("lots".to_string()));

    let err = ValuationEngine::default().evaluate(&input).unwrap_err();
    assert!(matches!(err, ValuationError::InvalidInput { .. }));
    assert_eq!(err.field(), "manual_revenue");
}

#[test]
fn test_monte_carlo_without_spread_reproduces_npv() {
    let input = ValuationInput::manual(100_000.0, 10.0, 2.0, 5, 50.0);
    let still = Perturbation {
        discount_rate_std_dev_percent: 0.0,
        revenue_std_dev_percent: 0.0,
    };
    let summary = run_monte_carlo(&input, 10, still, &mut seeded_rng(1)).unwrap();
    let npv = compute_npv(10_000.0, 2.0, 5).unwrap();
    assert!((summary.mean - npv).abs() < 1e-9);
}

#[test]
fn test_due_diligence_matches_npv() {
    let input = DueDiligenceInput {
        annual_net_revenue: 200_000.0,
        revenue_share_percent: 10.0,
        discount: DiscountInput::CapmSum {
            risk_free_rate: 3.0,
            equity_risk_premium: 5.0,
            industry_risk_premium: 2.5,
        },
        time_horizon_years: 5,
        offer_factor_percent: 50.0,
        reference_supply: 1_000_000.0,
    };
    let summary = summarize_due_diligence(&input).unwrap();

    assert!(close(summary.discount_rate_percent, 10.5, 1e-12));
    let npv = compute_npv(20_000.0, 10.5, 5).unwrap();
    assert!(close(summary.npv, npv, 1e-9));
    assert_eq!(summary.cumulative_schedule.len(), 5);
    assert!(close(*summary.cumulative_schedule.last().unwrap(), npv, 1e-6));
}

#[test]
fn test_offer_recovered_after_break_even() {
    let input = ValuationInput::manual(100_000.0, 10.0, 10.0, 5, 50.0);
    let result = ValuationEngine::default().evaluate(&input).unwrap();

    let year = compute_break_even_year(result.recommended_offer, result.annual_cash_flow, 10.0, 10)
        .unwrap()
        .unwrap();
    assert!(year <= input.time_horizon_years);
}

#[test]
fn test_monte_carlo_centers_on_base_npv() {
    let input = ValuationInput::manual(100_000.0, 10.0, 10.0, 5, 50.0);
    let base = ValuationEngine::default().evaluate(&input).unwrap().npv;

    let summary = run_monte_carlo(
        &input,
        5_000,
        Perturbation::default(),
        &mut seeded_rng(7),
    )
    .unwrap();
    assert_eq!(summary.samples.len(), 5_000);
    assert!((summary.mean - base).abs() / base < 0.02);
}

#[test]
fn test_sensitivity_ranks_revenue_drivers() {
    let input = ValuationInput::manual(100_000.0, 10.0, 10.0, 5, 50.0);
    let bars = analyze_sensitivity(&input, 20.0).unwrap();

    assert_eq!(bars.len(), 4);
    for pair in bars.windows(2) {
        assert!(pair[0].swing() >= pair[1].swing());
    }
}
