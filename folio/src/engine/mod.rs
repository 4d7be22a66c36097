use crate::statistic::{
    metric::{sharpe::SharpeRatio, sortino::SortinoRatio},
    rate::RiskFreeRate,
    time::Annual365,
};
use chrono::NaiveDate;
use derive_more::{Constructor, Display};
use folio_data::{PriceSeries, ReturnSeries, Symbol, Timed};
use serde::{Deserialize, Serialize};

/// Primary methodology: compounded returns over the date-matched series.
pub mod compound;

/// Reference-library methodology computed side-by-side for cross-validation.
pub mod reference;

/// Identifies which methodology produced a [`MetricResult`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize, Display)]
pub enum EngineId {
    #[display("compound")]
    Compound,
    #[display("reference")]
    Reference,
}

/// An annualised risk-adjusted ratio with its degeneracy flag.
///
/// Zero-variance (or zero-downside) input leaves `value` NaN with `degenerate` set - partial
/// metric reporting is preferred over failing the whole analysis.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct RatioMetric {
    pub value: f64,
    pub degenerate: bool,
}

impl From<SharpeRatio<Annual365>> for RatioMetric {
    fn from(ratio: SharpeRatio<Annual365>) -> Self {
        Self {
            value: ratio.value,
            degenerate: ratio.is_degenerate(),
        }
    }
}

impl From<SortinoRatio<Annual365>> for RatioMetric {
    fn from(ratio: SortinoRatio<Annual365>) -> Self {
        Self {
            value: ratio.value,
            degenerate: ratio.is_degenerate(),
        }
    }
}

/// Performance metrics for one symbol, as computed by one engine.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MetricResult {
    pub symbol: Symbol,
    pub engine: EngineId,
    pub total_return: f64,
    pub cagr: f64,
    pub sharpe: RatioMetric,
    pub sortino: RatioMetric,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub sample_size: usize,
    pub nonzero_returns: usize,
}

/// Per-symbol input shared by every [`MetricEngine`]: the aligned prices and the
/// date-matched, zero-filled returns derived from them.
#[derive(Debug, Copy, Clone, Constructor)]
pub struct MetricInput<'a> {
    pub symbol: &'a Symbol,
    pub prices: &'a PriceSeries,
    pub returns: &'a ReturnSeries,
}

/// A performance-metric methodology.
///
/// Both implementations are invoked side-by-side over identical inputs; the reconciler bounds
/// their divergence.
pub trait MetricEngine {
    fn id(&self) -> EngineId;

    fn compute(&self, input: MetricInput<'_>, risk_free: RiskFreeRate) -> MetricResult;
}

/// Effective analysis window: the return series when present, otherwise the price series.
fn period(returns: &ReturnSeries, prices: &PriceSeries) -> (NaiveDate, NaiveDate) {
    let bounds = |first: Option<&Timed<f64>>, last: Option<&Timed<f64>>| match (first, last) {
        (Some(first), Some(last)) => Some((first.date, last.date)),
        _ => None,
    };

    bounds(returns.first(), returns.last())
        .or_else(|| bounds(prices.first(), prices.last()))
        .unwrap_or_default()
}
