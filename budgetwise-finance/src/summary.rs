//! Per-category spending totals over a set of expenses.

use crate::expense::ExpenseRecord;
use budgetwise_core::Category;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total: f64,
    pub count: usize,
}

impl CategorySummary {
    /// One row per category present, largest total first (ties by label).
    pub fn summarize(records: &[ExpenseRecord]) -> Vec<CategorySummary> {
        let mut groups: HashMap<Category, (f64, usize)> = HashMap::new();
        for r in records {
            let entry = groups.entry(r.category).or_insert((0.0, 0));
            entry.0 += r.amount;
            entry.1 += 1;
        }

        let mut rows: Vec<CategorySummary> = groups
            .into_iter()
            .map(|(category, (total, count))| CategorySummary {
                category,
                total: (total * 100.0).round() / 100.0,
                count,
            })
            .collect();

        rows.sort_by(|a, b| {
            b.total
                .total_cmp(&a.total)
                .then_with(|| a.category.label().cmp(b.category.label()))
        });
        rows
    }

    pub fn share_of(&self, grand_total: f64) -> f64 {
        if grand_total <= 0.0 { 0.0 } else { self.total / grand_total }
    }
}
