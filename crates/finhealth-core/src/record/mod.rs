//! Financial-statement record model.
//!
//! A [`FinancialRecord`] is the loosely-populated snapshot a collaborator hands
//! to the engine: every field is optional and every numeric field is coerced
//! leniently at deserialization time (see [`coerce`]). Calculators never read
//! it directly. It is resolved once, via [`FinancialRecord::resolve`], into a
//! [`ResolvedRecord`] in which the documented defaulting rules have been
//! applied and every value is concrete.

pub mod coerce;
pub mod history;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

pub use coerce::{coerce_value, parse_amount};
pub use history::{order_most_recent_first, HistoricalPoint, HistoricalSeries};

/// Share of total expenses assumed to be cost of goods sold when COGS is not
/// reported.
pub const DEFAULT_COGS_RATIO: Decimal = dec!(0.7);

// ---------------------------------------------------------------------------
// Raw record
// ---------------------------------------------------------------------------

/// One period's financial snapshot as supplied by a record provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialRecord {
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_revenue: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_expenses: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub gross_profit: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub net_profit: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub accounts_receivable: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub accounts_payable: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub inventory_value: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub cash_balance: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_assets: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_liabilities: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub equity: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost_of_goods_sold: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub ebit: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub interest_expense: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_assets: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_liabilities: Option<Money>,
    #[serde(
        deserialize_with = "coerce::lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub period_start: Option<NaiveDate>,
    #[serde(
        deserialize_with = "coerce::lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub period_end: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Resolved record
// ---------------------------------------------------------------------------

/// A record with every default applied. This is the only shape the ratio
/// calculators consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    pub total_revenue: Money,
    pub total_expenses: Money,
    pub gross_profit: Money,
    pub net_profit: Money,
    pub accounts_receivable: Money,
    pub accounts_payable: Money,
    pub inventory_value: Money,
    pub cash_balance: Money,
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub equity: Money,
    pub cost_of_goods_sold: Money,
    pub ebit: Money,
    pub interest_expense: Money,
    pub current_assets: Money,
    pub current_liabilities: Money,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}

impl FinancialRecord {
    /// Apply the defaulting rules and produce a fully-populated record.
    ///
    /// Derived defaults:
    /// - `net_profit` = revenue - expenses
    /// - `gross_profit` = net profit (after its own default)
    /// - `equity` = assets - liabilities
    /// - `current_assets` = cash + receivables
    /// - `current_liabilities` = payables
    /// - `cost_of_goods_sold` = expenses * 0.7
    ///
    /// Any other absent value is zero. Arithmetic overflow resolves to zero.
    pub fn resolve(&self) -> ResolvedRecord {
        let revenue = self.total_revenue.unwrap_or_default();
        let expenses = self.total_expenses.unwrap_or_default();
        let receivables = self.accounts_receivable.unwrap_or_default();
        let payables = self.accounts_payable.unwrap_or_default();
        let cash = self.cash_balance.unwrap_or_default();
        let assets = self.total_assets.unwrap_or_default();
        let liabilities = self.total_liabilities.unwrap_or_default();

        let net_profit = self
            .net_profit
            .unwrap_or_else(|| revenue.checked_sub(expenses).unwrap_or_default());
        let gross_profit = self.gross_profit.unwrap_or(net_profit);
        let equity = self
            .equity
            .unwrap_or_else(|| assets.checked_sub(liabilities).unwrap_or_default());
        let current_assets = self
            .current_assets
            .unwrap_or_else(|| cash.checked_add(receivables).unwrap_or_default());
        let current_liabilities = self.current_liabilities.unwrap_or(payables);
        let cost_of_goods_sold = self
            .cost_of_goods_sold
            .unwrap_or_else(|| expenses.checked_mul(DEFAULT_COGS_RATIO).unwrap_or_default());

        ResolvedRecord {
            total_revenue: revenue,
            total_expenses: expenses,
            gross_profit,
            net_profit,
            accounts_receivable: receivables,
            accounts_payable: payables,
            inventory_value: self.inventory_value.unwrap_or_default(),
            cash_balance: cash,
            total_assets: assets,
            total_liabilities: liabilities,
            equity,
            cost_of_goods_sold,
            ebit: self.ebit.unwrap_or_default(),
            interest_expense: self.interest_expense.unwrap_or_default(),
            current_assets,
            current_liabilities,
            period_start: self.period_start,
            period_end: self.period_end,
        }
    }
}

impl From<&FinancialRecord> for ResolvedRecord {
    fn from(record: &FinancialRecord) -> Self {
        record.resolve()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
