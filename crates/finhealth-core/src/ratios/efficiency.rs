use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::safe_ratio;
use crate::record::ResolvedRecord;
use crate::types::Multiple;

/// Day-count convention for the "days outstanding" ratios.
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Turnover and days-outstanding ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyRatios {
    pub asset_turnover: Multiple,
    pub receivables_turnover: Multiple,
    pub days_sales_outstanding: Decimal,
    pub inventory_turnover: Multiple,
    pub days_inventory_outstanding: Decimal,
}

impl EfficiencyRatios {
    pub fn entries(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("asset_turnover", self.asset_turnover),
            ("receivables_turnover", self.receivables_turnover),
            ("days_sales_outstanding", self.days_sales_outstanding),
            ("inventory_turnover", self.inventory_turnover),
            ("days_inventory_outstanding", self.days_inventory_outstanding),
        ]
    }
}

pub fn calculate(r: &ResolvedRecord) -> EfficiencyRatios {
    let daily_revenue = safe_ratio(r.total_revenue, DAYS_PER_YEAR);
    let daily_cogs = safe_ratio(r.cost_of_goods_sold, DAYS_PER_YEAR);

    EfficiencyRatios {
        asset_turnover: safe_ratio(r.total_revenue, r.total_assets),
        receivables_turnover: safe_ratio(r.total_revenue, r.accounts_receivable),
        days_sales_outstanding: safe_ratio(r.accounts_receivable, daily_revenue),
        inventory_turnover: safe_ratio(r.cost_of_goods_sold, r.inventory_value),
        days_inventory_outstanding: safe_ratio(r.inventory_value, daily_cogs),
    }
}
