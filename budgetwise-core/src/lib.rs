//! budgetwise-core: shared domain types for BudgetWise (categories, plans, trials)

pub mod category;
pub mod error;
pub mod plans;
pub mod trial;

pub use category::{Category, MerchantRule, MerchantRules};
pub use error::CoreError;
pub use plans::{
    BillingPeriod, Feature, Plan, PlanLimits, PlanPrice, SubscriptionTier, can_use, format_price,
    has_access, upgrade_suggestions,
};
pub use trial::{TRIAL_LENGTH_DAYS, TrialStatus, trial_status};
