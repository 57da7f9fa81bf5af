use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::safe_percent;
use crate::record::ResolvedRecord;
use crate::types::Percent;

/// Margin and return ratios, all expressed in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityRatios {
    pub gross_profit_margin: Percent,
    pub net_profit_margin: Percent,
    pub return_on_assets: Percent,
    pub return_on_equity: Percent,
}

impl ProfitabilityRatios {
    pub fn entries(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("gross_profit_margin", self.gross_profit_margin),
            ("net_profit_margin", self.net_profit_margin),
            ("return_on_assets", self.return_on_assets),
            ("return_on_equity", self.return_on_equity),
        ]
    }
}

pub fn calculate(r: &ResolvedRecord) -> ProfitabilityRatios {
    ProfitabilityRatios {
        gross_profit_margin: safe_percent(r.gross_profit, r.total_revenue),
        net_profit_margin: safe_percent(r.net_profit, r.total_revenue),
        return_on_assets: safe_percent(r.net_profit, r.total_assets),
        return_on_equity: safe_percent(r.net_profit, r.equity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FinancialRecord;
    use rust_decimal_macros::dec;

    #[test]
    fn test_margins_and_returns() {
        let r = FinancialRecord {
            total_revenue: Some(dec!(200_000)),
            total_expenses: Some(dec!(150_000)),
            gross_profit: Some(dec!(80_000)),
            total_assets: Some(dec!(500_000)),
            equity: Some(dec!(250_000)),
            ..Default::default()
        }
        .resolve();
        let p = calculate(&r);

        // 80k / 200k
        assert_eq!(p.gross_profit_margin, dec!(40));
        // 50k / 200k
        assert_eq!(p.net_profit_margin, dec!(25));
        // 50k / 500k
        assert_eq!(p.return_on_assets, dec!(10));
        // 50k / 250k
        assert_eq!(p.return_on_equity, dec!(20));
    }

    #[test]
    fn test_zero_revenue_gives_zero_margins() {
        let r = FinancialRecord {
            total_expenses: Some(dec!(10_000)),
            total_assets: Some(dec!(100_000)),
            ..Default::default()
        }
        .resolve();
        let p = calculate(&r);
        assert_eq!(p.gross_profit_margin, Decimal::ZERO);
        assert_eq!(p.net_profit_margin, Decimal::ZERO);
        // Loss of 10k against 100k assets still yields a return
        assert_eq!(p.return_on_assets, dec!(-10));
    }

    #[test]
    fn test_negative_equity_gives_zero_roe() {
        let r = FinancialRecord {
            total_revenue: Some(dec!(1_000)),
            total_assets: Some(dec!(1_000)),
            total_liabilities: Some(dec!(2_000)),
            ..Default::default()
        }
        .resolve();
        assert_eq!(calculate(&r).return_on_equity, Decimal::ZERO);
    }
}
