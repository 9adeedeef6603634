//! CSV export of expense records.
//!
//! Columns: id,date,merchant,category,amount,account,items
//! `items` is `name=price` pairs joined with `; `.

use crate::expense::ExpenseRecord;
use anyhow::{Context, Result};
use std::io::Write;

pub fn write_expenses_csv<W: Write>(writer: W, records: &[ExpenseRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["id", "date", "merchant", "category", "amount", "account", "items"])?;

    for r in records {
        let items = r
            .items
            .iter()
            .map(|i| format!("{}={:.2}", i.name, i.price))
            .collect::<Vec<_>>()
            .join("; ");

        let date = r.date.format("%Y-%m-%d").to_string();
        let amount = format!("{:.2}", r.amount);

        wtr.write_record([
            r.id.as_str(),
            date.as_str(),
            r.merchant.as_str(),
            r.category.label(),
            amount.as_str(),
            r.account.as_str(),
            items.as_str(),
        ])
        .with_context(|| format!("writing record {}", r.id))?;
    }

    wtr.flush().context("flushing csv")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetwise_ingest::parse_receipt_text;
    use chrono::NaiveDate;

    #[test]
    fn test_csv_output() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        let r = parse_receipt_text("Corner Cafe, Downtown\n02/01/2026\nLatte 4.75\nScone 3.25\nTOTAL 8.00");
        let e = crate::ExpenseRecord::from_receipt("rcpt-0001", &r, "Visa", today);

        let mut buf = Vec::new();
        write_expenses_csv(&mut buf, &[e]).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let mut lines = out.lines();

        assert_eq!(lines.next(), Some("id,date,merchant,category,amount,account,items"));
        assert_eq!(
            lines.next(),
            Some("rcpt-0001,2026-02-01,\"Corner Cafe, Downtown\",Food & Dining,8.00,Visa,Latte=4.75; Scone=3.25")
        );
        assert_eq!(lines.next(), None);
    }
}
