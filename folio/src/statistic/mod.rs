/// One-pass dataset statistics and downside-deviation estimators.
pub mod dataset;

/// Metric value types - total return, CAGR, Sharpe and Sortino ratios.
pub mod metric;

/// Risk-free rate and its compounding de-annualisation.
pub mod rate;

/// Time intervals used for ratio annualisation.
pub mod time;
