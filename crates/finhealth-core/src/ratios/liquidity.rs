use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::safe_ratio;
use crate::record::ResolvedRecord;
use crate::types::Multiple;

/// Short-term solvency ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityRatios {
    pub current_ratio: Multiple,
    pub quick_ratio: Multiple,
    pub cash_ratio: Multiple,
}

impl LiquidityRatios {
    pub fn entries(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("current_ratio", self.current_ratio),
            ("quick_ratio", self.quick_ratio),
            ("cash_ratio", self.cash_ratio),
        ]
    }
}

pub fn calculate(r: &ResolvedRecord) -> LiquidityRatios {
    let quick_assets = r
        .current_assets
        .checked_sub(r.inventory_value)
        .unwrap_or(Decimal::ZERO);

    LiquidityRatios {
        current_ratio: safe_ratio(r.current_assets, r.current_liabilities),
        quick_ratio: safe_ratio(quick_assets, r.current_liabilities),
        cash_ratio: safe_ratio(r.cash_balance, r.current_liabilities),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FinancialRecord;
    use rust_decimal_macros::dec;

    #[test]
    fn test_liquidity_ratios() {
        let r = FinancialRecord {
            current_assets: Some(dec!(90_000)),
            current_liabilities: Some(dec!(40_000)),
            inventory_value: Some(dec!(30_000)),
            cash_balance: Some(dec!(20_000)),
            ..Default::default()
        }
        .resolve();
        let l = calculate(&r);

        assert_eq!(l.current_ratio, dec!(2.25));
        // (90k - 30k) / 40k
        assert_eq!(l.quick_ratio, dec!(1.5));
        assert_eq!(l.cash_ratio, dec!(0.5));
    }

    #[test]
    fn test_current_assets_default_from_cash_and_receivables() {
        let r = FinancialRecord {
            cash_balance: Some(dec!(30_000)),
            accounts_receivable: Some(dec!(10_000)),
            accounts_payable: Some(dec!(20_000)),
            ..Default::default()
        }
        .resolve();
        assert_eq!(calculate(&r).current_ratio, dec!(2));
    }

    #[test]
    fn test_zero_current_liabilities() {
        let r = FinancialRecord {
            cash_balance: Some(dec!(50_000)),
            inventory_value: Some(dec!(5_000)),
            ..Default::default()
        }
        .resolve();
        let l = calculate(&r);
        assert_eq!(l.current_ratio, Decimal::ZERO);
        assert_eq!(l.quick_ratio, Decimal::ZERO);
        assert_eq!(l.cash_ratio, Decimal::ZERO);
    }
}
