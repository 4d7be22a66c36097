#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::pedantic, clippy::type_complexity)]
#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    rust_2018_idioms
)]

//! # Folio
//! Portfolio performance analytics over historical daily price series. It provides:
//! * **Metrics**: compounded total return, CAGR over fractional 365.25-day years, and
//!   Sharpe & Sortino ratios annualised by √365 on the calendar-day convention.
//! * **Methodology pair**: a primary compounding engine over date-matched returns and a
//!   reference-library-style engine, both behind the
//!   [`MetricEngine`](engine::MetricEngine) trait.
//! * **Reconciliation**: advisory cross-validation of the two methodologies within
//!   documented tolerance bands.
//! * **Pipeline**: the [`Analyser`](analysis::Analyser) orchestrating fetch → align →
//!   returns → metrics → reconciliation for one request.
//!
//! Price preparation (cleaning, alignment, date-matching) lives in [`folio_data`].
//!
//! Every analysis request is processed independently over its own in-memory tables -
//! synchronous, CPU-bound, fail-fast on preprocessing errors, with per-metric degeneracies
//! reported via flags instead of failures.

/// End-to-end analysis pipeline and report types.
pub mod analysis;

/// Metric engines - the two methodologies behind one trait.
pub mod engine;

/// Analysis-level error taxonomy.
pub mod error;

/// Advisory cross-validation of the two methodologies.
pub mod reconcile;

/// Statistics: dataset summaries, risk-free rate, metric value types, time intervals.
pub mod statistic;

pub use analysis::{AnalysisReport, AnalysisRequest, Analyser};
pub use error::AnalysisError;
pub use statistic::rate::RiskFreeRate;
