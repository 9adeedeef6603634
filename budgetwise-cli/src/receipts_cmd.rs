use anyhow::{Context, Result};
use budgetwise_finance::expense::next_id;
use budgetwise_finance::{CategorySummary, ExpenseRecord, ReceiptQuota, write_expenses_csv};
use budgetwise_ingest::{ParsedReceipt, ReceiptParser};
use chrono::NaiveDate;
use clap::Subcommand;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::state::{ledger_path, read_ledger, write_ledger};

#[derive(Subcommand, Debug)]
pub enum ReceiptCommand {
    /// Parse OCR text of one receipt and print what was found
    Parse {
        /// Text file with the OCR output ("-" for stdin)
        file: PathBuf,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Parse a receipt and add it to the local ledger
    Import {
        file: PathBuf,

        /// Account label (default: config receipts.default_account)
        #[arg(long)]
        account: Option<String>,

        /// Ledger file (default: ~/.budgetwise/ledger.json)
        #[arg(long)]
        ledger: Option<PathBuf>,
    },

    /// Spending per category across the ledger
    Summary {
        #[arg(long)]
        ledger: Option<PathBuf>,
    },

    /// Export the ledger as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long)]
        ledger: Option<PathBuf>,
    },
}

pub fn run(command: ReceiptCommand, cfg: &Config) -> Result<()> {
    match command {
        ReceiptCommand::Parse { file, json } => {
            let text = read_text(&file)?;
            let parser = ReceiptParser::with_rules(cfg.merchant_rules()?);
            let receipt = parser.parse(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
            } else {
                print!("{}", render_receipt(&receipt));
            }
        }

        ReceiptCommand::Import { file, account, ledger } => {
            let text = read_text(&file)?;
            let ledger = resolve_ledger(ledger)?;
            let account = account.unwrap_or_else(|| cfg.receipts.default_account.clone());
            let record = import_receipt(&text, cfg, &ledger, &account, cfg.today()?)?;

            println!(
                "Imported {} | {} | {} | ${:.2} | {}",
                record.id,
                record.date,
                record.merchant,
                record.amount,
                record.category
            );
            if record.date_inferred {
                println!("  note: no date found, used today");
            }
            if record.amount_inferred {
                println!("  note: no TOTAL line, amount is the sum of items");
            }
            if record.needs_review() {
                println!("  warning: nothing priced was found; edit {} by hand", ledger.display());
            }
        }

        ReceiptCommand::Summary { ledger } => {
            let ledger = resolve_ledger(ledger)?;
            let records = read_ledger(&ledger)?;
            if records.is_empty() {
                println!("Ledger is empty: {}", ledger.display());
                return Ok(());
            }

            let rows = CategorySummary::summarize(&records);
            let grand: f64 = rows.iter().map(|r| r.total).sum();
            println!("{} receipts, ${:.2} total\n", records.len(), grand);
            for r in &rows {
                println!(
                    "{:<15} ${:>10.2}  {:>5.1}%  ({} receipts)",
                    r.category.label(),
                    r.total,
                    r.share_of(grand) * 100.0,
                    r.count
                );
            }
        }

        ReceiptCommand::Export { out, ledger } => {
            let ledger = resolve_ledger(ledger)?;
            let records = read_ledger(&ledger)?;
            match out {
                Some(path) => {
                    let f = fs::File::create(&path)
                        .with_context(|| format!("create {}", path.display()))?;
                    write_expenses_csv(f, &records)?;
                    println!("Wrote {} records to {}", records.len(), path.display());
                }
                None => write_expenses_csv(io::stdout().lock(), &records)?,
            }
        }
    }

    Ok(())
}

/// Parse `text`, check the plan's monthly quota, and append to the ledger.
pub fn import_receipt(
    text: &str,
    cfg: &Config,
    ledger: &Path,
    account: &str,
    today: NaiveDate,
) -> Result<ExpenseRecord> {
    let parser = ReceiptParser::with_rules(cfg.merchant_rules()?);
    let receipt = parser.parse(text);

    let mut records = read_ledger(ledger)?;
    let record = ExpenseRecord::from_receipt(next_id(&records), &receipt, account, today);

    let quota = ReceiptQuota::check(cfg.plan.tier, &records, today)?;
    tracing::info!(
        tier = %cfg.plan.tier,
        used = quota.used,
        remaining = ?quota.remaining(),
        "receipt quota ok"
    );

    records.push(record.clone());
    write_ledger(ledger, &records)?;
    Ok(record)
}

pub fn render_receipt(r: &ParsedReceipt) -> String {
    let mut s = String::new();
    s.push_str(&format!("Merchant: {}\n", r.merchant_or_default()));
    s.push_str(&format!(
        "Date:     {}\n",
        r.date_string().unwrap_or_else(|| "(not found)".to_string())
    ));
    s.push_str(&format!("Category: {}\n", r.category));

    if !r.items.is_empty() {
        s.push_str("Items:\n");
        for item in &r.items {
            s.push_str(&format!("  {:<28} ${:>8.2}\n", item.name, item.price));
        }
    }
    if let Some(sub) = r.subtotal {
        s.push_str(&format!("Subtotal: ${:.2}\n", sub));
    }
    if let Some(tax) = r.tax {
        s.push_str(&format!("Tax:      ${:.2}\n", tax));
    }
    match r.amount {
        Some(total) => s.push_str(&format!("Total:    ${:.2}\n", total)),
        None => s.push_str("Total:    (not found)\n"),
    }
    s
}

fn resolve_ledger(ledger: Option<PathBuf>) -> Result<PathBuf> {
    match ledger {
        Some(p) => Ok(p),
        None => ledger_path(),
    }
}

fn read_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut s = String::new();
        io::stdin().read_to_string(&mut s).context("read stdin")?;
        return Ok(s);
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
