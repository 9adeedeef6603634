//! budgetwise-ingest: receipt text ingestion (OCR output → structured receipts).

pub mod dates;
pub mod parsers;
pub mod types;

pub use parsers::receipt_text::{ReceiptParser, parse_receipt_text};
pub use types::{ParsedReceipt, ReceiptItem};
