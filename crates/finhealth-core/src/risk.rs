//! Rule-based risk assessment.
//!
//! Rules are evaluated independently; each match appends a factor and adds
//! its weight to the risk score. Recommendations are keyed off the factor
//! wording, so a rule that mentions both profit and cash yields both pieces of
//! advice.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::ratios::{safe_ratio, RatioSet};
use crate::record::ResolvedRecord;

const MONTHS_PER_YEAR: Decimal = dec!(12);

const HIGH_RISK_THRESHOLD: u32 = 60;
const MEDIUM_RISK_THRESHOLD: u32 = 30;

/// Keyword → advice table used to derive recommendations from factors.
static MITIGATIONS: [(&str, &str); 4] = [
    ("profit", "Focus on cost reduction and revenue optimization"),
    (
        "liquidity",
        "Improve cash collection and consider short-term financing",
    ),
    ("debt", "Develop debt reduction plan and avoid new borrowings"),
    (
        "cash",
        "Build emergency cash reserves - target 3-6 months expenses",
    ),
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_RISK_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    /// Matched rules, in evaluation order.
    pub risk_factors: Vec<String>,
    /// Deduplicated mitigation advice.
    pub recommendations: BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Assess risk from the computed ratios and the record's cash position.
pub fn assess_risk(record: &ResolvedRecord, ratios: &RatioSet) -> RiskAssessment {
    let mut factors: Vec<String> = Vec::new();
    let mut score: u32 = 0;

    let margin = ratios.profitability.net_profit_margin;
    if margin < Decimal::ZERO {
        factors.push("Negative profit margins".into());
        score += 30;
    } else if margin < dec!(5) {
        factors.push("Low profit margins".into());
        score += 15;
    }

    let current_ratio = ratios.liquidity.current_ratio;
    if current_ratio < dec!(1) {
        factors.push("Liquidity concerns - current ratio below 1".into());
        score += 25;
    } else if current_ratio < dec!(1.5) {
        factors.push("Moderate liquidity - current ratio below 1.5".into());
        score += 10;
    }

    let debt_to_equity = ratios.leverage.debt_to_equity;
    if debt_to_equity > dec!(3) {
        factors.push("Very high debt levels".into());
        score += 30;
    } else if debt_to_equity > dec!(2) {
        factors.push("High debt levels".into());
        score += 20;
    }

    if let Some(months) = months_of_cash(record) {
        if months < Decimal::ONE {
            factors.push("Low cash reserves (less than 1 month of expenses)".into());
            score += 20;
        }
    }

    RiskAssessment {
        risk_level: RiskLevel::from_score(score),
        risk_score: score,
        recommendations: recommendations_for(&factors),
        risk_factors: factors,
    }
}

/// Months of expenses covered by the cash balance, or `None` when there are
/// no expenses to cover.
pub fn months_of_cash(record: &ResolvedRecord) -> Option<Decimal> {
    let monthly_expenses = safe_ratio(record.total_expenses, MONTHS_PER_YEAR);
    if monthly_expenses <= Decimal::ZERO {
        return None;
    }
    Some(safe_ratio(record.cash_balance, monthly_expenses))
}

/// Map risk factors to mitigation advice by case-insensitive keyword.
pub fn recommendations_for(factors: &[String]) -> BTreeSet<String> {
    factors
        .iter()
        .flat_map(|factor| {
            let lowered = factor.to_lowercase();
            MITIGATIONS
                .iter()
                .filter(move |(keyword, _)| lowered.contains(*keyword))
                .map(|(_, advice)| advice.to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
