use anyhow::{Context, Result};
use budgetwise_finance::ExpenseRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// `$BUDGETWISE_HOME`, else `~/.budgetwise`
pub fn budgetwise_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BUDGETWISE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".budgetwise"))
}

pub fn ensure_budgetwise_home() -> Result<PathBuf> {
    let dir = budgetwise_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn ledger_path() -> Result<PathBuf> {
    Ok(ensure_budgetwise_home()?.join("ledger.json"))
}

/// Missing ledger reads as empty.
pub fn read_ledger(path: &Path) -> Result<Vec<ExpenseRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn write_ledger(path: &Path, records: &[ExpenseRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetwise_ingest::parse_receipt_text;
    use chrono::NaiveDate;

    #[test]
    fn test_ledger_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.json");
        assert!(read_ledger(&path).unwrap().is_empty());

        let today = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        let r = parse_receipt_text("CVS PHARMACY\nTOTAL 12.00");
        let rec = ExpenseRecord::from_receipt("rcpt-0001", &r, "Cash", today);
        write_ledger(&path, &[rec.clone()]).unwrap();

        assert_eq!(read_ledger(&path).unwrap(), vec![rec]);
    }

    #[test]
    fn test_corrupt_ledger_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "{not json").unwrap();
        assert!(read_ledger(&path).is_err());
    }
}
