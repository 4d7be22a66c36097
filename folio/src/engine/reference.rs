use crate::{
    engine::{EngineId, MetricEngine, MetricInput, MetricResult},
    statistic::{
        dataset::{DataSetSummary, clamped_downside_sample_std},
        metric::{
            cagr::Cagr, sharpe::SharpeRatio, sortino::SortinoRatio, total_return::TotalReturn,
        },
        rate::RiskFreeRate,
        time::{Annual365, Daily},
    },
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reference-library methodology, computed side-by-side with [`CompoundEngine`] for
/// cross-validation.
///
/// Differences from the primary methodology, preserved deliberately:
/// * derives its own simple returns from the aligned prices - no zero-fill date-matching, so
///   "time in market" filtering differs,
/// * total return is `last_price / first_price - 1` on the prices directly,
/// * CAGR spans the full aligned price window,
/// * the Sortino downside estimator is the sample standard deviation of the clamped series
///   `min(excess, 0)`.
///
/// Annualisation and risk-free de-annualisation match the primary methodology (365-day
/// calendar convention).
///
/// [`CompoundEngine`]: crate::engine::compound::CompoundEngine
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Deserialize, Serialize)]
pub struct ReferenceEngine;

impl MetricEngine for ReferenceEngine {
    fn id(&self) -> EngineId {
        EngineId::Reference
    }

    fn compute(&self, input: MetricInput<'_>, risk_free: RiskFreeRate) -> MetricResult {
        let rf_daily = risk_free.daily();

        let returns = input.prices.returns();
        let values: Vec<f64> = returns.values().collect();
        let excess: Vec<f64> = values.iter().map(|simple| simple - rf_daily).collect();
        let summary = DataSetSummary::from_slice(&excess);

        let total_return = match (input.prices.first(), input.prices.last()) {
            (Some(first), Some(last)) => TotalReturn::from_prices(first.value, last.value),
            _ => TotalReturn { value: f64::NAN },
        };

        let (period_start, period_end) = match (input.prices.first(), input.prices.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => Default::default(),
        };
        let cagr = Cagr::calculate(total_return, period_end - period_start);

        let sharpe = SharpeRatio::calculate(summary.mean, summary.std_dev(), Daily).scale(Annual365);
        let sortino =
            SortinoRatio::calculate(summary.mean, clamped_downside_sample_std(&excess), Daily)
                .scale(Annual365);

        debug!(
            symbol = %input.symbol,
            engine = %self.id(),
            sample_size = values.len(),
            "computed reference metrics"
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
            sample_size: values.len(),
            nonzero_returns: returns.nonzero_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use folio_data::{PriceSeries, Symbol, Timed};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, day).unwrap()
    }

    #[test]
    fn test_reference_engine_price_based_total_return() {
        let symbol = Symbol::new("AAA");
        let prices = PriceSeries::from_raw(vec![
            Timed::new(date(1), 100.0),
            Timed::new(date(2), 100.0),
            Timed::new(date(3), 104.0),
            Timed::new(date(4), 110.0),
        ]);
        let returns = prices.returns();

        let result = ReferenceEngine.compute(
            MetricInput::new(&symbol, &prices, &returns),
            RiskFreeRate::default(),
        );

        assert_relative_eq!(result.total_return, 0.10, epsilon = 1e-12);
        assert_eq!(result.period_start, date(1));
        assert_eq!(result.period_end, date(4));
        assert_eq!(result.sample_size, 3);
        assert_eq!(result.nonzero_returns, 2);
        assert_eq!(result.engine, EngineId::Reference);
    }

    #[test]
    fn test_reference_engine_diverges_from_flat_leading_prices() {
        // The reference methodology keeps the flat leading period in its window, so its CAGR
        // spans day 1..4 while a date-matched window would start later
        let symbol = Symbol::new("AAA");
        let prices = PriceSeries::from_raw(vec![
            Timed::new(date(1), 100.0),
            Timed::new(date(2), 100.0),
            Timed::new(date(3), 104.0),
            Timed::new(date(4), 110.0),
        ]);
        let returns = prices.returns();

        let result = ReferenceEngine.compute(
            MetricInput::new(&symbol, &prices, &returns),
            RiskFreeRate::default(),
        );

        let years = 3.0 * 86_400.0 / (365.25 * 86_400.0);
        assert_relative_eq!(
            result.cagr,
            1.1_f64.powf(1.0 / years) - 1.0,
            epsilon = 1e-9
        );
    }
}
