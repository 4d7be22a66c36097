use crate::symbol::Symbol;
use thiserror::Error;

/// All errors generated while preparing price data for analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("no usable price data for symbol after cleaning: {symbol}")]
    NoUsableData { symbol: Symbol },

    #[error("aligned price history has {rows} dates, need at least 2")]
    InsufficientData { rows: usize },

    #[error("price source failure: {detail}")]
    Fetch { detail: String },
}
