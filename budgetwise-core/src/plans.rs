//! Subscription plans, tier ordering and feature gating.
//!
//! Tiers are totally ordered; a user on tier `T` can use anything that
//! requires `T` or a lower tier.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Individual,
    Family,
    Business,
    Enterprise,
    Premium,
}

impl SubscriptionTier {
    /// All tiers, lowest first
    pub const ALL: [SubscriptionTier; 5] = [
        SubscriptionTier::Individual,
        SubscriptionTier::Family,
        SubscriptionTier::Business,
        SubscriptionTier::Enterprise,
        SubscriptionTier::Premium,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SubscriptionTier::Individual => "individual",
            SubscriptionTier::Family => "family",
            SubscriptionTier::Business => "business",
            SubscriptionTier::Enterprise => "enterprise",
            SubscriptionTier::Premium => "premium",
        }
    }

    /// Marketing name shown to users. These do not line up with the ids.
    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionTier::Individual => "Basic",
            SubscriptionTier::Family => "Starter",
            SubscriptionTier::Business => "Professional",
            SubscriptionTier::Enterprise => "Business",
            SubscriptionTier::Premium => "Enterprise",
        }
    }

    pub fn plan(&self) -> Plan {
        Plan::for_tier(*self)
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SubscriptionTier {
    type Err = CoreError;

    /// Ids are checked before display names, so "business" resolves to the
    /// business tier even though the enterprise tier is marketed as "Business".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        SubscriptionTier::ALL
            .iter()
            .copied()
            .find(|t| t.id().eq_ignore_ascii_case(needle))
            .or_else(|| {
                SubscriptionTier::ALL
                    .iter()
                    .copied()
                    .find(|t| t.display_name().eq_ignore_ascii_case(needle))
            })
            .ok_or_else(|| CoreError::UnknownTier(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlanPrice {
    /// Price per month when billed monthly
    pub monthly: f64,
    /// Effective price per month when billed yearly
    pub yearly: f64,
}

/// Per-plan quotas. `None` means unlimited.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanLimits {
    pub accounts: Option<u32>,
    pub receipts_per_month: Option<u32>,
    pub investments: Option<u32>,
    pub max_devices: Option<u32>,
    pub ai_insights: bool,
    pub priority_support: bool,
    pub family_sharing: bool,
    pub tax_optimization: bool,
    pub wealth_management: bool,
    pub human_consultation_hours: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub tier: SubscriptionTier,
    pub price: PlanPrice,
    pub popular: bool,
    pub highlight: bool,
    pub limits: PlanLimits,
}

impl Plan {
    pub fn for_tier(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Individual => Plan {
                tier,
                price: PlanPrice { monthly: 4.97, yearly: 3.97 },
                popular: true,
                highlight: false,
                limits: PlanLimits {
                    accounts: Some(10),
                    receipts_per_month: Some(25),
                    investments: Some(5),
                    max_devices: Some(2),
                    ai_insights: false,
                    priority_support: false,
                    family_sharing: false,
                    tax_optimization: false,
                    wealth_management: false,
                    human_consultation_hours: 0,
                },
            },
            SubscriptionTier::Family => Plan {
                tier,
                price: PlanPrice { monthly: 9.99, yearly: 7.99 },
                popular: false,
                highlight: false,
                limits: PlanLimits {
                    accounts: None,
                    receipts_per_month: Some(100),
                    investments: Some(10),
                    max_devices: Some(3),
                    ai_insights: true,
                    priority_support: true,
                    family_sharing: false,
                    tax_optimization: false,
                    wealth_management: false,
                    human_consultation_hours: 0,
                },
            },
            SubscriptionTier::Business => Plan {
                tier,
                price: PlanPrice { monthly: 19.99, yearly: 15.99 },
                popular: false,
                highlight: false,
                limits: PlanLimits {
                    accounts: None,
                    receipts_per_month: Some(500),
                    investments: Some(50),
                    max_devices: Some(10),
                    ai_insights: true,
                    priority_support: true,
                    family_sharing: true,
                    tax_optimization: true,
                    wealth_management: false,
                    human_consultation_hours: 0,
                },
            },
            SubscriptionTier::Enterprise => Plan {
                tier,
                price: PlanPrice { monthly: 39.99, yearly: 31.99 },
                popular: false,
                highlight: false,
                limits: PlanLimits {
                    accounts: None,
                    receipts_per_month: Some(2000),
                    investments: Some(200),
                    max_devices: Some(50),
                    ai_insights: true,
                    priority_support: true,
                    family_sharing: true,
                    tax_optimization: true,
                    wealth_management: true,
                    human_consultation_hours: 0,
                },
            },
            SubscriptionTier::Premium => Plan {
                tier,
                price: PlanPrice { monthly: 99.99, yearly: 79.99 },
                popular: false,
                highlight: true,
                limits: PlanLimits {
                    accounts: None,
                    receipts_per_month: None,
                    investments: None,
                    max_devices: None,
                    ai_insights: true,
                    priority_support: true,
                    family_sharing: true,
                    tax_optimization: true,
                    wealth_management: true,
                    human_consultation_hours: 2,
                },
            },
        }
    }

    pub fn all() -> Vec<Plan> {
        SubscriptionTier::ALL.iter().map(|t| Plan::for_tier(*t)).collect()
    }

    pub fn name(&self) -> &'static str {
        self.tier.display_name()
    }

    /// Savings over a year of yearly billing vs. monthly billing
    pub fn annual_savings(&self) -> f64 {
        (self.price.monthly - self.price.yearly) * 12.0
    }

    pub fn enables(&self, feature: Feature) -> bool {
        let l = &self.limits;
        match feature {
            Feature::ReceiptScanning => l.receipts_per_month.is_none_or(|n| n > 0),
            Feature::AiInsights => l.ai_insights,
            Feature::PrioritySupport => l.priority_support,
            Feature::FamilySharing => l.family_sharing,
            Feature::TaxOptimization => l.tax_optimization,
            Feature::WealthManagement => l.wealth_management,
            Feature::HumanConsultation => l.human_consultation_hours > 0,
        }
    }
}

/// Gated product features
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    ReceiptScanning,
    AiInsights,
    PrioritySupport,
    FamilySharing,
    TaxOptimization,
    WealthManagement,
    HumanConsultation,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::ReceiptScanning,
        Feature::AiInsights,
        Feature::PrioritySupport,
        Feature::FamilySharing,
        Feature::TaxOptimization,
        Feature::WealthManagement,
        Feature::HumanConsultation,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Feature::ReceiptScanning => "receipt-scanning",
            Feature::AiInsights => "ai-insights",
            Feature::PrioritySupport => "priority-support",
            Feature::FamilySharing => "family-sharing",
            Feature::TaxOptimization => "tax-optimization",
            Feature::WealthManagement => "wealth-management",
            Feature::HumanConsultation => "human-consultation",
        }
    }

    /// Lowest tier whose plan enables this feature
    pub fn minimum_tier(&self) -> SubscriptionTier {
        SubscriptionTier::ALL
            .iter()
            .copied()
            .find(|t| Plan::for_tier(*t).enables(*self))
            .unwrap_or(SubscriptionTier::Premium)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Feature {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().replace('_', "-");
        Feature::ALL
            .iter()
            .copied()
            .find(|f| f.slug().eq_ignore_ascii_case(&needle))
            .ok_or_else(|| CoreError::UnknownFeature(s.to_string()))
    }
}

/// Plan hierarchy check: higher tiers include everything below them.
pub fn has_access(user_tier: SubscriptionTier, required: SubscriptionTier) -> bool {
    user_tier >= required
}

pub fn can_use(tier: SubscriptionTier, feature: Feature) -> bool {
    has_access(tier, feature.minimum_tier())
}

/// Plans strictly above `current`, cheapest first
pub fn upgrade_suggestions(current: SubscriptionTier) -> Vec<Plan> {
    SubscriptionTier::ALL
        .iter()
        .copied()
        .filter(|t| *t > current)
        .map(Plan::for_tier)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
}

/// e.g. `$4.97/mo`
pub fn format_price(price: f64, period: BillingPeriod) -> String {
    let suffix = match period {
        BillingPeriod::Monthly => "mo",
        BillingPeriod::Yearly => "yr",
    };
    format!("${:.2}/{}", price, suffix)
}
