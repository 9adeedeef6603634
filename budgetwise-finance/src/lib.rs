//! budgetwise-finance: receipt expenses, category summaries, plan quotas and CSV export

pub mod expense;
pub mod export;
pub mod quota;
pub mod summary;

pub use expense::ExpenseRecord;
pub use export::write_expenses_csv;
pub use quota::{QuotaError, ReceiptQuota};
pub use summary::CategorySummary;
