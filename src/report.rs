//! CLI report formatting
//!
//! Values stay `f64` through the engine; money is rounded to cents only here.

use crate::simulation::{MonteCarloStats, SensitivityBar};
use crate::valuation::{DueDiligenceSummary, FundsRaisedProjection, ValuationResult};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round a currency amount to cents, half away from zero
pub fn to_money(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

fn money(value: f64) -> String {
    match to_money(value) {
        Some(amount) => format!("{:.2}", amount),
        None => "n/a".to_string(),
    }
}

/// Render as a table for CLI output
pub trait TableReport {
    fn format_table(&self) -> String;
}

impl TableReport for ValuationResult {
    fn format_table(&self) -> String {
        let mut out = format!(
            r#"
══════════════════════════════════════════════════════
               OFFER VALUATION
══════════════════════════════════════════════════════

CASH FLOW
───────────────────────────────────────────────────────
Est. Revenue:     {}
Annual Cash Flow: {}
Discount Rate:    {:.2}%

VALUE
───────────────────────────────────────────────────────
NPV:              {}
Offer:            {}

SCENARIOS                NPV            OFFER
───────────────────────────────────────────────────────
High:             {:>14} {:>14}
Medium:           {:>14} {:>14}
Low:              {:>14} {:>14}
"#,
            money(self.estimated_annual_revenue),
            money(self.annual_cash_flow),
            self.discount_rate_percent,
            money(self.npv),
            money(self.recommended_offer),
            money(self.scenarios.high.npv),
            money(self.scenarios.high.offer),
            money(self.scenarios.medium.npv),
            money(self.scenarios.medium.offer),
            money(self.scenarios.low.npv),
            money(self.scenarios.low.offer),
        );

        if let Some(sizing) = &self.token_sizing {
            out.push_str(&format!(
                r#"
TOKENS
───────────────────────────────────────────────────────
Supply:           {:.2}
Token Price:      {}
Share per Token:  {:.6}%
Sale Revenue:     {}
"#,
                sizing.recommended_supply,
                money(sizing.recommended_token_price),
                sizing.percent_revenue_share_per_token,
                money(sizing.token_sale_revenue),
            ));
        }

        out.push_str("══════════════════════════════════════════════════════\n");
        out
    }
}

impl TableReport for FundsRaisedProjection {
    fn format_table(&self) -> String {
        format!(
            r#"
FUNDS RAISED
───────────────────────────────────────────────────────
Market Price:     {}
Total:            {}
Optimistic:       {}
Pessimistic:      {}
"#,
            money(self.optimized_price),
            money(self.total_funds_raised),
            money(self.optimistic),
            money(self.pessimistic),
        )
    }
}

impl TableReport for MonteCarloStats {
    fn format_table(&self) -> String {
        format!(
            r#"
══════════════════════════════════════════════════════
               MONTE CARLO NPV
══════════════════════════════════════════════════════
Iterations:       {}
Mean NPV:         {}
Median NPV:       {}
Std Dev:          {}
Variance:         {:.2}
══════════════════════════════════════════════════════
"#,
            self.iterations,
            money(self.mean),
            money(self.median),
            money(self.std_dev),
            self.variance,
        )
    }
}

impl TableReport for DueDiligenceSummary {
    fn format_table(&self) -> String {
        let yield_text = self
            .cash_yield_percent
            .map(|y| format!("{:.2}%", y))
            .unwrap_or_else(|| "n/a".to_string());
        let schedule: String = self
            .cumulative_schedule
            .iter()
            .enumerate()
            .map(|(i, v)| format!("Year {:<3}         {}\n", i + 1, money(*v)))
            .collect();

        format!(
            r#"
══════════════════════════════════════════════════════
               DUE DILIGENCE
══════════════════════════════════════════════════════
Discount Rate:    {:.2}%
Annual Cash Flow: {}
NPV:              {}
Cash Yield:       {}
Token Price:      {:.4}
Offer Threshold:  {}

CUMULATIVE DISCOUNTED CASH FLOW
───────────────────────────────────────────────────────
{}══════════════════════════════════════════════════════
"#,
            self.discount_rate_percent,
            money(self.annual_cash_flow),
            money(self.npv),
            yield_text,
            self.recommended_token_price,
            money(self.offer_threshold),
            schedule,
        )
    }
}

impl TableReport for [SensitivityBar] {
    fn format_table(&self) -> String {
        let mut out = String::from(
            "\nSENSITIVITY              LOW NPV       HIGH NPV          SWING\n\
             ───────────────────────────────────────────────────────\n",
        );
        for bar in self {
            out.push_str(&format!(
                "{:<16} {:>14} {:>14} {:>14}\n",
                bar.driver.label(),
                money(bar.low_npv),
                money(bar.high_npv),
                money(bar.swing()),
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::{ValuationEngine, ValuationInput};
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_money_rounds_half_up() {
        assert_eq!(to_money(18_953.9338), Some(dec!(18953.93)));
        assert_eq!(to_money(37_907.867), Some(dec!(37907.87)));
        assert_eq!(to_money(0.125), Some(dec!(0.13)));
    }

    #[test]
    fn test_to_money_non_finite() {
        assert_eq!(to_money(f64::NAN), None);
        assert_eq!(money(f64::INFINITY), "n/a");
    }

    #[test]
    fn test_valuation_table_contains_figures() {
        let input = ValuationInput::manual(100_000.0, 10.0, 10.0, 5, 50.0);
        let result = ValuationEngine::default().evaluate(&input).unwrap();
        let table = result.format_table();
        assert!(table.contains("OFFER VALUATION"));
        assert!(table.contains("37907.87"));
        assert!(table.contains("18953.93"));
        assert!(!table.contains("TOKENS"));
    }

    #[test]
    fn test_funds_raised_table_uses_cents() {
        let funds = FundsRaisedProjection {
            optimized_price: 12.5,
            total_funds_raised: 1_000.126,
            optimistic: 1_100.0,
            pessimistic: 900.0,
        };
        let table = funds.format_table();
        assert!(table.contains("FUNDS RAISED"));
        assert!(table.contains("12.50"));
        assert!(table.contains("1000.13"));
        assert!(table.contains("1100.00"));
        assert!(table.contains("900.00"));
    }

    #[test]
    fn test_monte_carlo_table() {
        let stats = MonteCarloStats {
            iterations: 1_000,
            mean: 1_234.5,
            median: 1_200.0,
            variance: 400.0,
            std_dev: 20.0,
        };
        let table = stats.format_table();
        assert!(table.contains("Iterations:       1000"));
        assert!(table.contains("1234.50"));
    }
}
