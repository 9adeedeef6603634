//! Spending categories and the merchant keyword table used to assign them.
//!
//! Matching is deterministic: an ordered list of (keyword, category) pairs is
//! checked against the lowercased merchant name and the first hit wins.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Expense categories, serialized as their display label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Gas & Fuel")]
    GasAndFuel,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Uncategorized")]
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Groceries,
        Category::FoodAndDining,
        Category::GasAndFuel,
        Category::Shopping,
        Category::Healthcare,
        Category::Travel,
        Category::Entertainment,
        Category::Uncategorized,
    ];

    /// Human-readable label, e.g. "Food & Dining"
    pub fn label(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::FoodAndDining => "Food & Dining",
            Category::GasAndFuel => "Gas & Fuel",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Travel => "Travel",
            Category::Entertainment => "Entertainment",
            Category::Uncategorized => "Uncategorized",
        }
    }

    /// Kebab-case identifier, handy on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Groceries => "groceries",
            Category::FoodAndDining => "food-and-dining",
            Category::GasAndFuel => "gas-and-fuel",
            Category::Shopping => "shopping",
            Category::Healthcare => "healthcare",
            Category::Travel => "travel",
            Category::Entertainment => "entertainment",
            Category::Uncategorized => "uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Accepts either the label ("Food & Dining") or the slug ("food-and-dining").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(needle) || c.slug().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// One keyword → category pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantRule {
    pub keyword: String,
    pub category: Category,
}

/// Ordered merchant keyword table. First matching keyword wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantRules {
    rules: Vec<MerchantRule>,
}

const BUILTIN_RULES: &[(&str, Category)] = &[
    // Groceries
    ("whole foods", Category::Groceries),
    ("walmart", Category::Groceries),
    ("grocery", Category::Groceries),
    ("market", Category::Groceries),
    ("safeway", Category::Groceries),
    ("kroger", Category::Groceries),
    // Shopping
    ("target", Category::Shopping),
    ("amazon", Category::Shopping),
    ("costco", Category::Shopping),
    ("online", Category::Shopping),
    // Dining
    ("starbucks", Category::FoodAndDining),
    ("coffee", Category::FoodAndDining),
    ("cafe", Category::FoodAndDining),
    ("mcdonald", Category::FoodAndDining),
    ("burger king", Category::FoodAndDining),
    ("restaurant", Category::FoodAndDining),
    // Fuel
    ("shell", Category::GasAndFuel),
    ("chevron", Category::GasAndFuel),
    ("exxon", Category::GasAndFuel),
    ("gas", Category::GasAndFuel),
    ("petrol", Category::GasAndFuel),
    ("fuel", Category::GasAndFuel),
    // Health
    ("walgreens", Category::Healthcare),
    ("cvs", Category::Healthcare),
    ("pharmacy", Category::Healthcare),
    // Travel
    ("hotel", Category::Travel),
    ("lodging", Category::Travel),
    ("airline", Category::Travel),
    // Entertainment
    ("cinema", Category::Entertainment),
    ("movie", Category::Entertainment),
    ("theater", Category::Entertainment),
];

impl Default for MerchantRules {
    fn default() -> Self {
        Self {
            rules: BUILTIN_RULES
                .iter()
                .map(|(keyword, category)| MerchantRule {
                    keyword: keyword.to_string(),
                    category: *category,
                })
                .collect(),
        }
    }
}

impl MerchantRules {
    /// Insert a rule ahead of every existing rule.
    pub fn prepend(&mut self, keyword: impl Into<String>, category: Category) {
        let keyword = keyword.into().trim().to_lowercase();
        if keyword.is_empty() {
            return;
        }
        self.rules.insert(0, MerchantRule { keyword, category });
    }

    pub fn rules(&self) -> &[MerchantRule] {
        &self.rules
    }

    /// Case-insensitive substring match against the merchant name.
    pub fn categorize(&self, merchant: &str) -> Category {
        let merchant = merchant.to_lowercase();
        self.rules
            .iter()
            .find(|r| merchant.contains(&r.keyword))
            .map(|r| r.category)
            .unwrap_or(Category::Uncategorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_foods_is_groceries() {
        let rules = MerchantRules::default();
        assert_eq!(rules.categorize("WHOLE FOODS"), Category::Groceries);
        assert_eq!(rules.categorize("Whole Foods Market #102"), Category::Groceries);
    }

    #[test]
    fn test_walmart_and_target() {
        let rules = MerchantRules::default();
        assert_eq!(rules.categorize("WALMART SUPERCENTER"), Category::Groceries);
        assert_eq!(rules.categorize("TARGET T-1234"), Category::Shopping);
    }

    #[test]
    fn test_first_match_wins() {
        // "market" (Groceries) is listed before "cafe" (Food & Dining)
        let rules = MerchantRules::default();
        assert_eq!(rules.categorize("MARKET CAFE"), Category::Groceries);
    }

    #[test]
    fn test_unknown_merchant_is_uncategorized() {
        let rules = MerchantRules::default();
        assert_eq!(rules.categorize("ACME WIDGETS"), Category::Uncategorized);
        assert_eq!(rules.categorize(""), Category::Uncategorized);
    }

    #[test]
    fn test_prepend_takes_priority() {
        let mut rules = MerchantRules::default();
        rules.prepend("Whole Foods", Category::FoodAndDining);
        assert_eq!(rules.categorize("WHOLE FOODS"), Category::FoodAndDining);

        rules.prepend("   ", Category::Travel);
        assert_eq!(rules.rules()[0].keyword, "whole foods");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Food & Dining".parse::<Category>().unwrap(), Category::FoodAndDining);
        assert_eq!("gas-and-fuel".parse::<Category>().unwrap(), Category::GasAndFuel);
        assert_eq!("groceries".parse::<Category>().unwrap(), Category::Groceries);
        assert!(matches!(
            "Pets".parse::<Category>(),
            Err(CoreError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::FoodAndDining).unwrap();
        assert_eq!(json, "\"Food & Dining\"");
        let back: Category = serde_json::from_str("\"Groceries\"").unwrap();
        assert_eq!(back, Category::Groceries);
    }
}
