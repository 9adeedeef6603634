use anyhow::{Context, Result};
use budgetwise_core::plans::{BillingPeriod, Feature, Plan, SubscriptionTier, can_use, format_price, upgrade_suggestions};
use budgetwise_core::trial::{self, TrialStatus};
use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum PlansCommand {
    /// List every plan with prices and limits
    List,

    /// Check whether a tier includes a feature
    Check {
        /// e.g. ai-insights, family-sharing, tax-optimization
        feature: String,

        /// Tier to check (default: config plan.tier)
        #[arg(long)]
        tier: Option<String>,
    },

    /// Plans above the current tier
    Upgrades {
        #[arg(long)]
        tier: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TrialCommand {
    /// Show free-trial status and the message a user would see
    Status {
        /// Trial end, RFC 3339 (default: config plan.trial_ends)
        #[arg(long)]
        ends: Option<String>,
    },
}

pub fn run_plans(command: PlansCommand, cfg: &Config) -> Result<()> {
    match command {
        PlansCommand::List => {
            for plan in Plan::all() {
                print!("{}", render_plan(&plan, cfg.plan.tier));
            }
        }

        PlansCommand::Check { feature, tier } => {
            let feature: Feature = feature.parse()?;
            let tier = resolve_tier(tier, cfg)?;
            println!("{}", describe_access(tier, feature));
        }

        PlansCommand::Upgrades { tier } => {
            let tier = resolve_tier(tier, cfg)?;
            let ups = upgrade_suggestions(tier);
            if ups.is_empty() {
                println!("{} is the top plan.", tier.display_name());
            }
            for plan in ups {
                println!(
                    "- {} ({}) {} or {}",
                    plan.name(),
                    plan.tier,
                    format_price(plan.price.monthly, BillingPeriod::Monthly),
                    format_price(plan.price.yearly, BillingPeriod::Yearly),
                );
            }
        }
    }
    Ok(())
}

pub fn run_trial(command: TrialCommand, cfg: &Config) -> Result<()> {
    match command {
        TrialCommand::Status { ends } => {
            let end = match ends {
                Some(s) => Some(
                    DateTime::parse_from_rfc3339(&s)
                        .with_context(|| format!("parse --ends {}", s))?
                        .with_timezone(&Utc),
                ),
                None => cfg.plan.trial_ends,
            };
            println!("{}", describe_trial(end, Utc::now()));
        }
    }
    Ok(())
}

fn resolve_tier(tier: Option<String>, cfg: &Config) -> Result<SubscriptionTier> {
    match tier {
        Some(t) => Ok(t.parse()?),
        None => Ok(cfg.plan.tier),
    }
}

fn limit(v: Option<u32>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "unlimited".to_string())
}

pub fn render_plan(plan: &Plan, current: SubscriptionTier) -> String {
    let marker = if plan.tier == current { " (current)" } else { "" };
    let mut s = format!(
        "{} [{}]{}: {} or {}, saves ${:.2}/yr on yearly billing\n",
        plan.name(),
        plan.tier,
        marker,
        format_price(plan.price.monthly, BillingPeriod::Monthly),
        format_price(plan.price.yearly, BillingPeriod::Yearly),
        plan.annual_savings()
    );
    let l = &plan.limits;
    s.push_str(&format!(
        "  accounts={} receipts/month={} investments={} devices={}\n",
        limit(l.accounts),
        limit(l.receipts_per_month),
        limit(l.investments),
        limit(l.max_devices)
    ));
    let features: Vec<&str> = Feature::ALL
        .iter()
        .filter(|f| plan.enables(**f))
        .map(|f| f.slug())
        .collect();
    s.push_str(&format!("  features: {}\n", features.join(", ")));
    s
}

pub fn describe_access(tier: SubscriptionTier, feature: Feature) -> String {
    let needed = feature.minimum_tier();
    if can_use(tier, feature) {
        format!("{} is included in {} ({})", feature, tier.display_name(), tier)
    } else {
        format!(
            "{} needs {} ({}) or higher; current plan is {} ({})",
            feature,
            needed.display_name(),
            needed,
            tier.display_name(),
            tier
        )
    }
}

pub fn describe_trial(end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match (trial::trial_status(end, now), end) {
        (TrialStatus::Active { .. }, Some(e)) => format!(
            "{}\n{}",
            trial::format_time_remaining(e, now),
            trial::encouragement_message(end, now)
        ),
        (TrialStatus::Expired { .. }, _) => {
            let mut s = trial::expiration_message(end, now);
            if s.is_empty() {
                s = "Trial expired".to_string();
            }
            if trial::should_show_reminder(end, now) {
                s.push_str("\n(reminder window open)");
            }
            s
        }
        _ => "No trial on record".to_string(),
    }
}
