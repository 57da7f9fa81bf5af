use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::safe_ratio;
use crate::record::ResolvedRecord;
use crate::types::Multiple;

/// Interest coverage reported when interest expense is exactly zero.
///
/// A sentinel meaning "no debt burden", not a literal coverage multiple.
pub const INTEREST_COVERAGE_SENTINEL: Decimal = dec!(999);

/// Solvency ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageRatios {
    pub debt_to_equity: Multiple,
    pub debt_to_assets: Multiple,
    pub equity_ratio: Multiple,
    pub interest_coverage: Multiple,
}

impl LeverageRatios {
    pub fn entries(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("debt_to_equity", self.debt_to_equity),
            ("debt_to_assets", self.debt_to_assets),
            ("equity_ratio", self.equity_ratio),
            ("interest_coverage", self.interest_coverage),
        ]
    }

    /// True when `interest_coverage` holds the no-interest sentinel rather
    /// than a computed multiple.
    pub fn interest_coverage_is_sentinel(&self) -> bool {
        self.interest_coverage == INTEREST_COVERAGE_SENTINEL
    }
}

pub fn calculate(r: &ResolvedRecord) -> LeverageRatios {
    let interest_coverage = if r.interest_expense.is_zero() {
        INTEREST_COVERAGE_SENTINEL
    } else {
        safe_ratio(r.ebit, r.interest_expense)
    };

    LeverageRatios {
        debt_to_equity: safe_ratio(r.total_liabilities, r.equity),
        debt_to_assets: safe_ratio(r.total_liabilities, r.total_assets),
        equity_ratio: safe_ratio(r.equity, r.total_assets),
        interest_coverage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FinancialRecord;

    #[test]
    fn test_leverage_ratios() {
        let r = FinancialRecord {
            total_assets: Some(dec!(400_000)),
            total_liabilities: Some(dec!(100_000)),
            ebit: Some(dec!(60_000)),
            interest_expense: Some(dec!(12_000)),
            ..Default::default()
        }
        .resolve();
        let l = calculate(&r);

        // equity defaults to 300k
        assert_eq!(l.debt_to_assets, dec!(0.25));
        assert_eq!(l.equity_ratio, dec!(0.75));
        assert_eq!(l.interest_coverage, dec!(5));
        assert_eq!(l.debt_to_equity, dec!(100_000) / dec!(300_000));
        assert!(!l.interest_coverage_is_sentinel());
    }

    #[test]
    fn test_zero_interest_is_sentinel() {
        let r = FinancialRecord {
            ebit: Some(dec!(50_000)),
            ..Default::default()
        }
        .resolve();
        let l = calculate(&r);
        assert_eq!(l.interest_coverage, dec!(999));
        assert!(l.interest_coverage_is_sentinel());
    }

    #[test]
    fn test_negative_interest_is_not_sentinel() {
        let r = FinancialRecord {
            ebit: Some(dec!(50_000)),
            interest_expense: Some(dec!(-1_000)),
            ..Default::default()
        }
        .resolve();
        assert_eq!(calculate(&r).interest_coverage, Decimal::ZERO);
    }

    #[test]
    fn test_non_positive_equity_gives_zero_debt_to_equity() {
        let r = FinancialRecord {
            total_assets: Some(dec!(100_000)),
            total_liabilities: Some(dec!(150_000)),
            ..Default::default()
        }
        .resolve();
        let l = calculate(&r);
        assert_eq!(l.debt_to_equity, Decimal::ZERO);
        assert_eq!(l.debt_to_assets, dec!(1.5));
        // Equity ratio carries the sign of equity
        assert_eq!(l.equity_ratio, dec!(-0.5));
    }
}
