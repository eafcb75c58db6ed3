//! Subscription plan and conversation quota shown on the dashboard.
//!
//! Billing is not wired up yet; the API serves [`PlanStatus::mocked`].

use serde::Serialize;

/// Length of one billing period in days.
pub const PLAN_PERIOD_DAYS: i64 = 30;

/// Conversations included in the free tier.
pub const FREE_CONVERSATION_QUOTA: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanTier {
    Free,
    Pro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quota {
    pub limit: u32,
    pub used: u32,
    pub remaining: u32,
}

impl Quota {
    pub fn new(limit: u32, used: u32) -> Self {
        Self {
            limit,
            used,
            remaining: limit.saturating_sub(used),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStatus {
    pub plan: PlanTier,
    pub days_left: i64,
    /// Share of the billing period still remaining, 0..=100.
    pub percent_remaining: u8,
    pub expired: bool,
    /// e.g. `"12 days left"` or `"Expired"`.
    pub label: String,
    pub quota: Quota,
}

impl PlanStatus {
    pub fn compute(plan: PlanTier, days_left: i64, quota: Quota) -> Self {
        let expired = days_left <= 0;
        let percent = (days_left as f64 / PLAN_PERIOD_DAYS as f64 * 100.0).round();
        let label = if expired {
            "Expired".to_string()
        } else {
            format!("{days_left} days left")
        };

        Self {
            plan,
            days_left,
            percent_remaining: percent.clamp(0.0, 100.0) as u8,
            expired,
            label,
            quota,
        }
    }

    /// Free plan, full period, nothing used.
    pub fn mocked() -> Self {
        Self::compute(
            PlanTier::Free,
            PLAN_PERIOD_DAYS,
            Quota::new(FREE_CONVERSATION_QUOTA, 0),
        )
    }
}
