/// Compound annual growth rate over a fractional-year period.
pub mod cagr;

/// Annualised Sharpe ratio.
pub mod sharpe;

/// Annualised Sortino ratio.
pub mod sortino;

/// Compounded total return.
pub mod total_return;
