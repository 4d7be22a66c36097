use crate::statistic::time::TimeInterval;
use serde::{Deserialize, Serialize};

/// Represents a Sharpe Ratio value over a specific [`TimeInterval`].
///
/// Sharpe Ratio measures the risk-adjusted return of an investment by comparing its excess
/// returns (over the risk-free rate) to their standard deviation.
///
/// See docs: <https://www.investopedia.com/articles/07/sharpe_ratio.asp>
#[derive(Debug, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct SharpeRatio<Interval> {
    pub value: f64,
    pub interval: Interval,
}

impl<Interval> SharpeRatio<Interval>
where
    Interval: TimeInterval,
{
    /// Calculate the [`SharpeRatio`] over the provided [`TimeInterval`].
    ///
    /// A zero or non-finite standard deviation (constant returns, single observation) is a
    /// degenerate input: the value is NaN, to be reported with a flag rather than a silent
    /// infinity.
    pub fn calculate(
        mean_excess_return: f64,
        std_dev_excess_returns: f64,
        returns_period: Interval,
    ) -> Self {
        if std_dev_excess_returns == 0.0 || !std_dev_excess_returns.is_finite() {
            Self {
                value: f64::NAN,
                interval: returns_period,
            }
        } else {
            Self {
                value: mean_excess_return / std_dev_excess_returns,
                interval: returns_period,
            }
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.value.is_nan()
    }

    /// Scale the [`SharpeRatio`] from the current [`TimeInterval`] to the provided
    /// [`TimeInterval`].
    ///
    /// This scaling assumes the returns are independently and identically distributed (IID).
    pub fn scale<TargetInterval>(self, target: TargetInterval) -> SharpeRatio<TargetInterval>
    where
        TargetInterval: TimeInterval,
    {
        // Scale factor: square root of number of Self Intervals in TargetIntervals
        let scale = (target.interval().num_seconds() as f64
            / self.interval.interval().num_seconds() as f64)
            .sqrt();

        SharpeRatio {
            value: self.value * scale,
            interval: target,
        }
    }
}
