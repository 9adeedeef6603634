//! Receipt text parser
//!
//! Turns raw OCR output into a `ParsedReceipt`. Best-effort and total: any
//! input, including the empty string, yields a receipt; fields that cannot
//! be found are left empty.
//!
//! Expected shape of the text:
//!   WALMART
//!   05/15/2023
//!   Item One              $5.99
//!   Item Two             $12.50
//!   SUBTOTAL             $18.49
//!   TAX                   $1.11
//!   TOTAL                $19.60

use budgetwise_core::MerchantRules;
use regex::Regex;
use std::sync::OnceLock;

use crate::dates::find_date;
use crate::types::{ParsedReceipt, ReceiptItem, round_cents};

// Optional label, whitespace, then a two-decimal amount at the end of the line.
fn money_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^\s*(?:(?P<label>.*?)\s+)?",
            r"\$?(?P<amount>\d{1,3}(?:,\d{3})+\.\d{2}|\d+\.\d{2})\s*$"
        ))
        .expect("money-line pattern compiles")
    })
}

// Label keywords match anywhere in the label: GRANDTOTAL is a total,
// SALESTAX is tax.
fn subtotal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)sub[\s-]?total").expect("subtotal pattern compiles"))
}

fn total_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)total").expect("total pattern compiles"))
}

fn tax_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)tax").expect("tax pattern compiles"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Subtotal,
    Total,
    Tax,
    Item,
}

#[derive(Debug)]
struct MoneyLine<'a> {
    label: &'a str,
    amount: f64,
}

impl MoneyLine<'_> {
    fn kind(&self) -> LineKind {
        if subtotal_re().is_match(self.label) {
            LineKind::Subtotal
        } else if total_re().is_match(self.label) {
            LineKind::Total
        } else if tax_re().is_match(self.label) {
            LineKind::Tax
        } else {
            LineKind::Item
        }
    }
}

fn money_line(line: &str) -> Option<MoneyLine<'_>> {
    let caps = money_line_re().captures(line)?;
    let amount: f64 = caps["amount"].replace(',', "").parse().ok()?;
    // "Tea $ 3.00" leaves a dangling currency sign on the label
    let label = caps
        .name("label")
        .map(|m| m.as_str().trim_end_matches('$').trim())
        .unwrap_or("");
    Some(MoneyLine { label, amount })
}

/// Parser over a merchant keyword table.
#[derive(Debug, Clone, Default)]
pub struct ReceiptParser {
    rules: MerchantRules,
}

impl ReceiptParser {
    pub fn with_rules(rules: MerchantRules) -> Self {
        Self { rules }
    }

    pub fn parse(&self, text: &str) -> ParsedReceipt {
        let lines: Vec<&str> = text.split(['\n', '\r']).collect();

        let merchant = lines
            .iter()
            .map(|l| l.trim())
            .find(|l| !l.is_empty())
            .map(str::to_string);

        let date = lines.iter().find_map(|l| find_date(l));

        let mut amount = None;
        let mut subtotal = None;
        let mut tax: Option<f64> = None;
        let mut items = Vec::new();
        let mut money_lines = 0usize;

        for ml in lines.iter().filter_map(|l| money_line(l)) {
            money_lines += 1;
            match ml.kind() {
                LineKind::Total => amount = Some(ml.amount),
                LineKind::Subtotal => subtotal = Some(ml.amount),
                LineKind::Tax => tax = Some(round_cents(tax.unwrap_or(0.0) + ml.amount)),
                LineKind::Item => {
                    // A bare amount or OCR debris is not an item
                    if ml.label.chars().any(char::is_alphanumeric) {
                        items.push(ReceiptItem {
                            name: ml.label.to_string(),
                            price: ml.amount,
                        });
                    }
                }
            }
        }

        let category = self.rules.categorize(merchant.as_deref().unwrap_or(""));

        tracing::debug!(
            lines = lines.len(),
            money_lines,
            items = items.len(),
            found_total = amount.is_some(),
            found_date = date.is_some(),
            "parsed receipt text"
        );

        ParsedReceipt {
            merchant,
            date,
            amount,
            items,
            category,
            subtotal,
            tax,
        }
    }
}

/// Parse receipt text with the built-in merchant table.
pub fn parse_receipt_text(text: &str) -> ParsedReceipt {
    ReceiptParser::default().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetwise_core::Category;

    const WALMART: &str = r#"WALMART
123 Main St
Anytown, ST 12345
(555) 123-4567

Item 1                 $5.99
Item 2                $12.50

SUBTOTAL              $18.49
TAX                    $1.11
TOTAL                 $19.60"#;

    fn item(name: &str, price: f64) -> ReceiptItem {
        ReceiptItem { name: name.to_string(), price }
    }

    #[test]
    fn test_merchant_is_first_non_blank_line() {
        let r = parse_receipt_text(WALMART);
        assert_eq!(r.merchant.as_deref(), Some("WALMART"));

        let r = parse_receipt_text("\n\n   \n  Corner Store  \nTOTAL 1.00");
        assert_eq!(r.merchant.as_deref(), Some("Corner Store"));
    }

    #[test]
    fn test_total_beats_subtotal() {
        let r = parse_receipt_text(WALMART);
        assert_eq!(r.amount, Some(19.60));
        assert_eq!(r.subtotal, Some(18.49));
        assert_eq!(r.tax, Some(1.11));
    }

    #[test]
    fn test_items_in_order_without_summary_lines() {
        let text = r#"STORE

Item One              $5.99
Item Two             $12.50

TOTAL                $18.49"#;
        let r = parse_receipt_text(text);
        assert_eq!(r.items, vec![item("Item One", 5.99), item("Item Two", 12.50)]);
        assert_eq!(r.amount, Some(18.49));
    }

    #[test]
    fn test_summary_lines_never_items() {
        let r = parse_receipt_text(WALMART);
        assert_eq!(r.items, vec![item("Item 1", 5.99), item("Item 2", 12.50)]);
        assert!(r.items.iter().all(|i| !i.name.to_uppercase().contains("TOTAL")));
        assert!(r.items.iter().all(|i| !i.name.to_uppercase().contains("TAX")));
    }

    #[test]
    fn test_date_normalized() {
        let text = "STORE\n05/15/2023\n\nItem                 $5.99\n\nTOTAL                $5.99";
        let r = parse_receipt_text(text);
        assert_eq!(r.date_string().as_deref(), Some("2023-05-15"));
    }

    #[test]
    fn test_no_date_is_absent() {
        let r = parse_receipt_text("Some receipt without date");
        assert_eq!(r.date, None);
    }

    #[test]
    fn test_whole_foods_category() {
        let r = parse_receipt_text("WHOLE FOODS\n\nItem                 $5.99\n\nTOTAL                $5.99");
        assert_eq!(r.category, Category::Groceries);
        assert_eq!(r.category.label(), "Groceries");
    }

    #[test]
    fn test_empty_input() {
        for text in ["", "   ", "\n\n\r\n"] {
            let r = parse_receipt_text(text);
            assert_eq!(r.merchant, None);
            assert_eq!(r.date, None);
            assert_eq!(r.amount, None);
            assert!(r.items.is_empty());
            assert_eq!(r.category, Category::Uncategorized);
            assert_eq!(r.merchant_or_default(), "Unknown Merchant");
        }
    }

    #[test]
    fn test_missing_total_stays_absent() {
        let text = r#"STORE

Item One              $5.99
Item Two             $12.50

SUBTOTAL             $18.49"#;
        let r = parse_receipt_text(text);
        assert_eq!(r.amount, None);
        assert_eq!(r.subtotal, Some(18.49));
        assert_eq!(r.amount_or_items_total(), Some(18.49));
    }

    #[test]
    fn test_last_total_wins() {
        let text = "SHOP\nWidget 3.00\nTOTAL 3.00\nTOTAL DUE 3.25";
        let r = parse_receipt_text(text);
        assert_eq!(r.amount, Some(3.25));
        assert_eq!(r.items, vec![item("Widget", 3.00)]);
    }

    #[test]
    fn test_sub_total_spellings() {
        for label in ["SUB TOTAL", "Sub-Total", "subtotal:"] {
            let text = format!("SHOP\nWidget 3.00\n{} 3.00", label);
            let r = parse_receipt_text(&text);
            assert_eq!(r.amount, None, "{} should not be a total", label);
            assert_eq!(r.subtotal, Some(3.00));
        }
    }

    #[test]
    fn test_labels_match_as_substrings() {
        let r = parse_receipt_text("SHOP\nWidget 10.00\nSALESTAX 0.60\nGRANDTOTAL 10.60");
        assert_eq!(r.amount, Some(10.60));
        assert_eq!(r.tax, Some(0.60));
        assert_eq!(r.items, vec![item("Widget", 10.00)]);

        let r = parse_receipt_text("CITY CAB\nTAXI FARE 12.00\nTOTAL 12.00");
        assert!(r.items.is_empty());
        assert_eq!(r.amount, Some(12.00));
    }

    #[test]
    fn test_noisy_lines_excluded() {
        let text = r#"SHOP
Item5.99
Coffee 4.5
Tea $ 3.00
Muffin 2.99 x
Bagel    $1.25
$9.99
-- 4.00
TOTAL $1,234.56"#;
        let r = parse_receipt_text(text);
        assert_eq!(r.items, vec![item("Tea", 3.00), item("Bagel", 1.25)]);
        assert_eq!(r.amount, Some(1234.56));
    }

    #[test]
    fn test_crlf_and_colon_labels() {
        let text = "Corner Cafe\r\nDate: 12/04/2025\r\nLatte            4.75\r\nTotal:           4.75\r\n";
        let r = parse_receipt_text(text);
        assert_eq!(r.merchant.as_deref(), Some("Corner Cafe"));
        assert_eq!(r.date_string().as_deref(), Some("2025-12-04"));
        assert_eq!(r.items, vec![item("Latte", 4.75)]);
        assert_eq!(r.amount, Some(4.75));
        assert_eq!(r.category, Category::FoodAndDining);
    }

    #[test]
    fn test_full_pos_receipt() {
        let text = r#"WALMART
123 Main Street
Anytown, ST 12345
(555) 123-4567

Cashier: John D.     Register: 5
Date: 12/04/2025     Time: 14:30

Items:
Bananas             1.99
Apple Juice         3.49
Bread               2.29
Milk                3.99

Subtotal:           11.76
Tax:                0.94
Total:              12.70

Payment Method: Credit Card
Approval Code: 123456"#;
        let r = parse_receipt_text(text);
        assert_eq!(r.merchant.as_deref(), Some("WALMART"));
        assert_eq!(r.date_string().as_deref(), Some("2025-12-04"));
        assert_eq!(r.amount, Some(12.70));
        assert_eq!(r.subtotal, Some(11.76));
        assert_eq!(r.tax, Some(0.94));
        assert_eq!(
            r.items,
            vec![
                item("Bananas", 1.99),
                item("Apple Juice", 3.49),
                item("Bread", 2.29),
                item("Milk", 3.99),
            ]
        );
        assert_eq!(r.category, Category::Groceries);
    }

    #[test]
    fn test_multiple_tax_lines_sum() {
        let text = "SHOP\nWidget 10.00\nSTATE TAX 0.60\nCITY TAX 0.25\nTOTAL 10.85";
        let r = parse_receipt_text(text);
        assert_eq!(r.tax, Some(0.85));
        assert_eq!(r.items.len(), 1);
    }

    #[test]
    fn test_custom_rules() {
        let mut rules = MerchantRules::default();
        rules.prepend("corner store", Category::Shopping);
        let parser = ReceiptParser::with_rules(rules);
        let r = parser.parse("Corner Store\nTOTAL 1.00");
        assert_eq!(r.category, Category::Shopping);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let a = parse_receipt_text(WALMART);
        let b = parse_receipt_text(WALMART);
        assert_eq!(a, b);
    }
}
