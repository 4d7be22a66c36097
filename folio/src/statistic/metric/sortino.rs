use crate::statistic::time::TimeInterval;
use serde::{Deserialize, Serialize};

/// Represents a Sortino Ratio value over a specific [`TimeInterval`].
///
/// Similar to the Sharpe Ratio, but only considers downside volatility rather than total
/// volatility. The downside deviation is expected on the full-sample denominator convention -
/// see [`downside_deviation`](crate::statistic::dataset::downside_deviation).
#[derive(Debug, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct SortinoRatio<Interval> {
    pub value: f64,
    pub interval: Interval,
}

impl<Interval> SortinoRatio<Interval>
where
    Interval: TimeInterval,
{
    /// Calculate the [`SortinoRatio`] over the provided [`TimeInterval`].
    ///
    /// A zero or non-finite downside deviation (no negative excess returns) is a degenerate
    /// input: the value is NaN, to be reported with a flag rather than a sentinel extreme.
    pub fn calculate(
        mean_excess_return: f64,
        downside_deviation: f64,
        returns_period: Interval,
    ) -> Self {
        if downside_deviation == 0.0 || !downside_deviation.is_finite() {
            Self {
                value: f64::NAN,
                interval: returns_period,
            }
        } else {
            Self {
                value: mean_excess_return / downside_deviation,
                interval: returns_period,
            }
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.value.is_nan()
    }

    /// Scale the [`SortinoRatio`] from the current [`TimeInterval`] to the provided
    /// [`TimeInterval`].
    ///
    /// This scaling assumes the returns are independently and identically distributed (IID),
    /// an assumption that is less appropriate for downside deviation.
    pub fn scale<TargetInterval>(self, target: TargetInterval) -> SortinoRatio<TargetInterval>
    where
        TargetInterval: TimeInterval,
    {
        // Scale factor: square root of number of Self Intervals in TargetIntervals
        let scale = (target.interval().num_seconds() as f64
            / self.interval.interval().num_seconds() as f64)
            .sqrt();

        SortinoRatio {
            value: self.value * scale,
            interval: target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistic::{
        dataset::downside_deviation,
        time::{Annual365, Daily},
    };
    use approx::assert_relative_eq;

    #[test]
    fn test_sortino_ratio_normal_case() {
        // mean excess 0.1%, downside deviation 2%
        let actual = SortinoRatio::calculate(0.001, 0.02, Daily);

        assert_relative_eq!(actual.value, 0.05, epsilon = 1e-12);
        assert_eq!(actual.interval, Daily);
    }

    #[test]
    fn test_sortino_ratio_zero_downside_is_degenerate() {
        let actual = SortinoRatio::calculate(0.002, 0.0, Daily);
        assert!(actual.is_degenerate());
    }

    #[test]
    fn test_sortino_ratio_negative_mean_excess() {
        let actual = SortinoRatio::calculate(-0.003, 0.015, Daily);
        assert_relative_eq!(actual.value, -0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_sortino_ratio_from_full_sample_downside() {
        // Returns [0.01, -0.02, 0.01, -0.01] with zero risk-free rate:
        // downside deviation = sqrt((0.02² + 0.01²) / 4)
        let excess = [0.01, -0.02, 0.01, -0.01];
        let mean = excess.iter().sum::<f64>() / excess.len() as f64;
        let downside = downside_deviation(&excess);

        let actual = SortinoRatio::calculate(mean, downside, Daily);

        let expected_downside = ((0.0004 + 0.0001) / 4.0_f64).sqrt();
        assert_relative_eq!(downside, expected_downside, epsilon = 1e-12);
        assert_relative_eq!(actual.value, mean / expected_downside, epsilon = 1e-12);
    }

    #[test]
    fn test_sortino_ratio_scale_daily_to_annual_365() {
        let daily = SortinoRatio {
            value: 0.05,
            interval: Daily,
        };

        let actual = daily.scale(Annual365);

        assert_relative_eq!(actual.value, 0.05 * 365.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(actual.interval, Annual365);
    }
}
