use anyhow::{Context, Result, anyhow};
use budgetwise_core::{Category, MerchantRules, SubscriptionTier};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_budgetwise_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plan: PlanSection,
    #[serde(default)]
    pub receipts: ReceiptsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSection {
    pub tier: SubscriptionTier,
    /// RFC 3339, e.g. 2026-03-01T00:00:00Z
    pub trial_ends: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptsSection {
    pub default_account: String,
    /// IANA zone used to decide what "today" is for undated receipts
    pub timezone: String,
    /// Checked before the built-in merchant table, in order
    pub merchant_rules: Vec<MerchantRuleEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantRuleEntry {
    pub keyword: String,
    /// Label ("Food & Dining") or slug ("food-and-dining")
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// tracing filter directive used when RUST_LOG and --verbose are absent
    pub level: String,
}

impl Default for PlanSection {
    fn default() -> Self {
        Self {
            tier: SubscriptionTier::Individual,
            trial_ends: None,
        }
    }
}

impl Default for ReceiptsSection {
    fn default() -> Self {
        Self {
            default_account: "Cash".to_string(),
            timezone: "America/Chicago".to_string(),
            merchant_rules: Vec::new(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Built-in merchant table with the user's rules in front.
    pub fn merchant_rules(&self) -> Result<MerchantRules> {
        let mut rules = MerchantRules::default();
        // prepend reverses order, so walk backwards to keep file order
        for entry in self.receipts.merchant_rules.iter().rev() {
            let category: Category = entry
                .category
                .parse()
                .with_context(|| format!("merchant rule for '{}'", entry.keyword))?;
            rules.prepend(entry.keyword.as_str(), category);
        }
        Ok(rules)
    }

    pub fn timezone(&self) -> Result<Tz> {
        let name = &self.receipts.timezone;
        name.parse::<Tz>()
            .map_err(|e| anyhow!("invalid timezone '{}': {}", name, e))
    }

    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.timezone()?).date_naive())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_budgetwise_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// What `config init` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Overwritten,
    /// File was present and `force` was not set; nothing written
    Kept,
}

/// Write a default config to `p`, optionally starting on `tier`.
pub fn init_config_at(p: &Path, tier: Option<SubscriptionTier>, force: bool) -> Result<InitOutcome> {
    let existed = p.exists();
    if existed && !force {
        return Ok(InitOutcome::Kept);
    }

    let mut cfg = Config::default();
    if let Some(tier) = tier {
        cfg.plan.tier = tier;
    }
    save_config_to(p, &cfg)?;
    tracing::info!(path = %p.display(), tier = %cfg.plan.tier, "config written");

    Ok(if existed { InitOutcome::Overwritten } else { InitOutcome::Created })
}
