//! Composite scores derived from a [`RatioSet`](crate::ratios::RatioSet).
//!
//! Both scores are additive point grids over a handful of headline ratios.
//! Each bucket is capped independently and the sum is clamped to the score's
//! range, so the result can be explained bucket by bucket.

pub mod credit;
pub mod health;

pub use credit::{
    calculate_credit_score, CreditScoreBreakdown, CREDIT_SCORE_BASE, CREDIT_SCORE_MAX,
    PAYMENT_HISTORY_POINTS,
};
pub use health::{calculate_health_score, HealthGrade, HealthScoreBreakdown, HEALTH_SCORE_MAX};
