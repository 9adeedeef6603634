pub mod receipt_text;
