use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::ratios::RatioSet;

pub const CREDIT_SCORE_BASE: u32 = 300;
pub const CREDIT_SCORE_MAX: u32 = 900;

/// Payment-history component. No payment-history source feeds the engine, so
/// every business is scored as in good standing.
pub const PAYMENT_HISTORY_POINTS: u32 = 210;

/// Credit score components and the clamped total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditScoreBreakdown {
    pub base: u32,
    /// Fixed at [`PAYMENT_HISTORY_POINTS`].
    pub payment_history: u32,
    /// 60–180, by debt-to-equity.
    pub debt_utilization: u32,
    /// 30–120, by net profit margin.
    pub profitability: u32,
    /// 30–90, by current ratio.
    pub cash_flow: u32,
    pub total: u32,
}

/// Score creditworthiness on the 300–900 scale.
pub fn calculate_credit_score(ratios: &RatioSet) -> CreditScoreBreakdown {
    let debt_utilization = debt_utilization_points(ratios.leverage.debt_to_equity);
    let profitability = profitability_points(ratios.profitability.net_profit_margin);
    let cash_flow = cash_flow_points(ratios.liquidity.current_ratio);

    let total = (CREDIT_SCORE_BASE
        + PAYMENT_HISTORY_POINTS
        + debt_utilization
        + profitability
        + cash_flow)
        .clamp(CREDIT_SCORE_BASE, CREDIT_SCORE_MAX);

    CreditScoreBreakdown {
        base: CREDIT_SCORE_BASE,
        payment_history: PAYMENT_HISTORY_POINTS,
        debt_utilization,
        profitability,
        cash_flow,
        total,
    }
}

fn debt_utilization_points(debt_to_equity: Decimal) -> u32 {
    match debt_to_equity {
        d if d < dec!(0.3) => 180,
        d if d < dec!(0.5) => 150,
        d if d < dec!(1) => 120,
        d if d < dec!(2) => 90,
        _ => 60,
    }
}

fn profitability_points(net_profit_margin: Decimal) -> u32 {
    match net_profit_margin {
        m if m > dec!(15) => 120,
        m if m > dec!(10) => 100,
        m if m > dec!(5) => 80,
        m if m > Decimal::ZERO => 60,
        _ => 30,
    }
}

fn cash_flow_points(current_ratio: Decimal) -> u32 {
    match current_ratio {
        c if c > dec!(2) => 90,
        c if c > dec!(1.5) => 75,
        c if c > dec!(1) => 60,
        _ => 30,
    }
}
