//! Expense records built from parsed receipts.
//!
//! The parser leaves unknown fields empty; this is where the upload flow's
//! fallbacks are applied (today's date, summed items) and recorded.

use budgetwise_core::Category;
use budgetwise_ingest::{ParsedReceipt, ReceiptItem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: String,
    pub date: NaiveDate,
    pub merchant: String,
    /// Always non-negative; receipts are spend
    pub amount: f64,
    pub category: Category,
    #[serde(default)]
    pub items: Vec<ReceiptItem>,
    /// Account/source (Cash, Visa, ...)
    pub account: String,
    /// True when the receipt had no readable date and `today` was used
    #[serde(default)]
    pub date_inferred: bool,
    /// True when the receipt had no TOTAL line
    #[serde(default)]
    pub amount_inferred: bool,
    /// Day the receipt entered the ledger; quota months count from this.
    /// Absent in ledgers written before it was recorded.
    #[serde(default)]
    pub imported_on: Option<NaiveDate>,
}

impl ExpenseRecord {
    pub fn from_receipt(
        id: impl Into<String>,
        receipt: &ParsedReceipt,
        account: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        let amount_inferred = receipt.amount.is_none();
        let amount = receipt.amount_or_items_total().unwrap_or(0.0);

        if amount_inferred {
            tracing::debug!(
                merchant = receipt.merchant_or_default(),
                items = receipt.items.len(),
                amount,
                "no TOTAL line; using item sum"
            );
        }

        Self {
            id: id.into(),
            date: receipt.date.unwrap_or(today),
            merchant: receipt.merchant_or_default().to_string(),
            amount,
            category: receipt.category,
            items: receipt.items.clone(),
            account: account.into(),
            date_inferred: receipt.date.is_none(),
            amount_inferred,
            imported_on: Some(today),
        }
    }

    /// Import day, or the receipt date for older ledger entries
    pub fn imported_date(&self) -> NaiveDate {
        self.imported_on.unwrap_or(self.date)
    }

    /// True when neither a total nor any item price could be read
    pub fn needs_review(&self) -> bool {
        self.amount_inferred && self.items.is_empty()
    }
}

/// Next free id of the form `rcpt-0001` given what is already in the ledger
pub fn next_id(existing: &[ExpenseRecord]) -> String {
    let max = existing
        .iter()
        .filter_map(|r| r.id.strip_prefix("rcpt-"))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("rcpt-{:04}", max + 1)
}
