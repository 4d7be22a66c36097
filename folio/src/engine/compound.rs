use crate::{
    engine::{EngineId, MetricEngine, MetricInput, MetricResult, period},
    statistic::{
        dataset::{DataSetSummary, downside_deviation},
        metric::{
            cagr::Cagr, sharpe::SharpeRatio, sortino::SortinoRatio, total_return::TotalReturn,
        },
        rate::RiskFreeRate,
        time::{Annual365, Daily},
    },
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Primary methodology: metrics over the date-matched, zero-filled return series.
///
/// Total return compounds the daily simple returns; CAGR uses fractional 365.25-day years
/// over the effective window; Sharpe uses the unbiased sample standard deviation of excess
/// returns; Sortino uses the full-sample-denominator downside deviation. Ratios annualise
/// daily → annual by √365.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Deserialize, Serialize)]
pub struct CompoundEngine;

impl MetricEngine for CompoundEngine {
    fn id(&self) -> EngineId {
        EngineId::Compound
    }

    fn compute(&self, input: MetricInput<'_>, risk_free: RiskFreeRate) -> MetricResult {
        let rf_daily = risk_free.daily();

        let returns: Vec<f64> = input.returns.values().collect();
        let excess: Vec<f64> = returns.iter().map(|simple| simple - rf_daily).collect();
        let summary = DataSetSummary::from_slice(&excess);

        let (period_start, period_end) = period(input.returns, input.prices);

        let total_return = TotalReturn::calculate(returns.iter().copied());
        let cagr = Cagr::calculate(total_return, period_end - period_start);

        let sharpe = SharpeRatio::calculate(summary.mean, summary.std_dev(), Daily).scale(Annual365);
        let sortino =
            SortinoRatio::calculate(summary.mean, downside_deviation(&excess), Daily).scale(Annual365);

        debug!(
            symbol = %input.symbol,
            engine = %self.id(),
            sample_size = returns.len(),
            mean_excess = summary.mean,
            std_dev = summary.std_dev(),
            "computed performance metrics"
        );

        MetricResult {
            symbol: input.symbol.clone(),
            engine: self.id(),
            total_return: total_return.value,
            cagr: cagr.value,
            sharpe: sharpe.into(),
            sortino: sortino.into(),
            period_start,
            period_end,
            sample_size: returns.len(),
            nonzero_returns: input.returns.nonzero_count(),
        }
    }
}
