use budgetwise_core::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

/// One priced line on a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub price: f64,
}

/// Structured output of the receipt text parser.
///
/// Fields the parser could not find are `None` (or empty); nothing here is
/// filled in with a guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    /// First non-blank line of the receipt, trimmed
    pub merchant: Option<String>,
    /// Serialized as YYYY-MM-DD
    pub date: Option<NaiveDate>,
    /// Value of the last TOTAL line. Not reconciled against `items`.
    pub amount: Option<f64>,
    pub items: Vec<ReceiptItem>,
    pub category: Category,
    /// Last SUBTOTAL line
    pub subtotal: Option<f64>,
    /// Sum of all TAX lines
    pub tax: Option<f64>,
}

impl ParsedReceipt {
    pub fn date_string(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d").to_string())
    }

    pub fn merchant_or_default(&self) -> &str {
        self.merchant.as_deref().unwrap_or(UNKNOWN_MERCHANT)
    }

    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|i| i.price).sum()
    }

    /// The TOTAL line if there was one, otherwise the sum of items (if any).
    pub fn amount_or_items_total(&self) -> Option<f64> {
        self.amount.or_else(|| {
            if self.items.is_empty() {
                None
            } else {
                Some(round_cents(self.items_total()))
            }
        })
    }
}

pub(crate) fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(amount: Option<f64>, prices: &[f64]) -> ParsedReceipt {
        ParsedReceipt {
            merchant: None,
            date: NaiveDate::from_ymd_opt(2023, 5, 15),
            amount,
            items: prices
                .iter()
                .enumerate()
                .map(|(i, p)| ReceiptItem { name: format!("Item {i}"), price: *p })
                .collect(),
            category: Category::Uncategorized,
            subtotal: None,
            tax: None,
        }
    }

    #[test]
    fn test_amount_fallback_to_items() {
        assert_eq!(receipt(Some(19.60), &[5.99, 12.50]).amount_or_items_total(), Some(19.60));
        assert_eq!(receipt(None, &[5.99, 12.50]).amount_or_items_total(), Some(18.49));
        assert_eq!(receipt(None, &[]).amount_or_items_total(), None);
    }

    #[test]
    fn test_defaults_and_date_format() {
        let r = receipt(None, &[]);
        assert_eq!(r.merchant_or_default(), "Unknown Merchant");
        assert_eq!(r.date_string().as_deref(), Some("2023-05-15"));

        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["date"], "2023-05-15");
        assert_eq!(json["category"], "Uncategorized");
    }
}
