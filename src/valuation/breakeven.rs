//! Break-even analysis

use super::dcf::discounted_term;
use super::types::{ensure_finite, ensure_percent, ValuationError};

/// First year in which cumulative discounted cash flow covers the upfront offer
///
/// Returns `None` when the offer is not recovered within `max_years`.
pub fn compute_break_even_year(
    upfront_offer: f64,
    annual_cash_flow: f64,
    rate_percent: f64,
    max_years: u32,
) -> Result<Option<u32>, ValuationError> {
    let upfront = ensure_finite("upfront_offer", upfront_offer)?;
    let cash_flow = ensure_finite("annual_cash_flow", annual_cash_flow)?;
    let rate = ensure_percent("discount_rate_percent", rate_percent)?;

    let mut cumulative = 0.0;
    for t in 1..=max_years {
        cumulative += discounted_term(cash_flow, rate, t);
        if cumulative >= upfront {
            return Ok(Some(t));
        }
    }
    Ok(None)
}

/// Tokens whose combined one-year cash flow equals the upfront offer
pub fn break_even_tokens(
    upfront_offer: f64,
    annual_cash_flow: f64,
    supply: f64,
) -> Result<f64, ValuationError> {
    let upfront = ensure_finite("upfront_offer", upfront_offer)?;
    let cash_flow = ensure_finite("annual_cash_flow", annual_cash_flow)?;
    let supply = ensure_finite("supply", supply)?;
    if cash_flow <= 0.0 {
        return Err(ValuationError::invalid(
            "annual_cash_flow",
            "must be greater than zero",
        ));
    }
    if supply <= 0.0 {
        return Err(ValuationError::invalid("supply", "must be greater than zero"));
    }
    let per_token = cash_flow / supply;
    Ok(upfront / per_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_even_undiscounted() {
        assert_eq!(
            compute_break_even_year(50_000.0, 10_000.0, 0.0, 10).unwrap(),
            Some(5)
        );
    }

    #[test]
    fn test_break_even_discounted_takes_longer() {
        // Discounted: 9090.9, 17355.4, 24868.5, 31698.7, 37907.9, 43552.6
        assert_eq!(
            compute_break_even_year(40_000.0, 10_000.0, 10.0, 10).unwrap(),
            Some(6)
        );
    }

    #[test]
    fn test_break_even_not_reached() {
        assert_eq!(
            compute_break_even_year(100_000.0, 10_000.0, 10.0, 10).unwrap(),
            None
        );
    }

    #[test]
    fn test_break_even_zero_offer_first_year() {
        assert_eq!(compute_break_even_year(0.0, 1.0, 5.0, 3).unwrap(), Some(1));
    }

    #[test]
    fn test_break_even_zero_max_years() {
        assert_eq!(compute_break_even_year(1.0, 10.0, 5.0, 0).unwrap(), None);
    }

    #[test]
    fn test_break_even_invalid_rate() {
        assert!(compute_break_even_year(1.0, 10.0, -150.0, 3).is_err());
        assert!(compute_break_even_year(1.0, 10.0, -0.01, 3).is_err());
        assert!(compute_break_even_year(1.0, 10.0, 100.01, 3).is_err());
    }

    #[test]
    fn test_break_even_tokens() {
        // 500k per year over 1M tokens is 0.5 per token
        let tokens = break_even_tokens(50_000.0, 500_000.0, 1_000_000.0).unwrap();
        assert!((tokens - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_break_even_tokens_requires_cash_flow() {
        assert!(break_even_tokens(50_000.0, 0.0, 1_000.0).is_err());
        assert!(break_even_tokens(50_000.0, 10.0, 0.0).is_err());
    }
}
