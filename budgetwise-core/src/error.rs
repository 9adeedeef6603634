//! Error types for budgetwise-core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown subscription tier: {0}")]
    UnknownTier(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown feature: {0}")]
    UnknownFeature(String),
}
