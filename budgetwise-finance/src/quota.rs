//! Monthly receipt-scan quota per subscription plan.

use crate::expense::ExpenseRecord;
use budgetwise_core::SubscriptionTier;
use chrono::{Datelike, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuotaError {
    #[error("{plan} plan allows {limit} receipts per month; {used} already recorded for {month}")]
    Exceeded {
        plan: &'static str,
        limit: u32,
        used: u32,
        month: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptQuota {
    pub tier: SubscriptionTier,
    /// `None` = unlimited
    pub limit: Option<u32>,
    pub used: u32,
}

impl ReceiptQuota {
    /// Count receipts imported in the same calendar month as `month`.
    /// The printed receipt date plays no part, so back-dated receipts
    /// still use up this month's allowance.
    pub fn usage(tier: SubscriptionTier, records: &[ExpenseRecord], month: NaiveDate) -> Self {
        let used = records
            .iter()
            .map(ExpenseRecord::imported_date)
            .filter(|d| d.year() == month.year() && d.month() == month.month())
            .count() as u32;
        Self {
            tier,
            limit: tier.plan().limits.receipts_per_month,
            used,
        }
    }

    /// Ok when one more receipt fits in `month`.
    pub fn check(
        tier: SubscriptionTier,
        records: &[ExpenseRecord],
        month: NaiveDate,
    ) -> Result<Self, QuotaError> {
        let quota = Self::usage(tier, records, month);
        match quota.limit {
            Some(limit) if quota.used >= limit => Err(QuotaError::Exceeded {
                plan: tier.display_name(),
                limit,
                used: quota.used,
                month: month.format("%Y-%m").to_string(),
            }),
            _ => Ok(quota),
        }
    }

    /// `None` = unlimited
    pub fn remaining(&self) -> Option<u32> {
        self.limit.map(|l| l.saturating_sub(self.used))
    }
}
