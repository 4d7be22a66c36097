use chrono::NaiveDate;
use folio_data::{DataError, Symbol};
use thiserror::Error;

/// All errors generated while validating and running an analysis request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("analysis request contains no symbols")]
    NoSymbols,

    #[error("analysis request contains {count} symbols, maximum is {max}")]
    TooManySymbols { count: usize, max: usize },

    #[error("invalid symbol: {symbol}")]
    InvalidSymbol { symbol: Symbol },

    #[error("invalid date range: {start} to {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("date range too short: {days} days, minimum is {min}")]
    RangeTooShort { days: i64, min: i64 },

    #[error(transparent)]
    Data(#[from] DataError),
}
