use crate::statistic::metric::total_return::TotalReturn;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Seconds in a leap-aware average calendar year (365.25 days).
pub const SECONDS_PER_YEAR: f64 = 365.25 * 86_400.0;

/// Compound Annual Growth Rate: the constant annual rate producing the same total return over
/// the elapsed period.
///
/// See docs: <https://www.investopedia.com/terms/c/cagr.asp>
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct Cagr {
    pub value: f64,
}

impl Cagr {
    /// Calculate the [`Cagr`] of a [`TotalReturn`] achieved over the provided period.
    ///
    /// Years are fractional, `total_seconds / (365.25 × 86400)`. NaN when the period is not
    /// positive or the compounded growth factor is not positive.
    pub fn calculate(total_return: TotalReturn, period: TimeDelta) -> Self {
        let years = period.num_seconds() as f64 / SECONDS_PER_YEAR;
        let factor = total_return.compound_factor();

        if years <= 0.0 || factor <= 0.0 {
            return Self { value: f64::NAN };
        }

        Self {
            value: factor.powf(1.0 / years) - 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cagr_one_year_flat_ten_percent() {
        let total_return = TotalReturn { value: 0.10 };
        let actual = Cagr::calculate(total_return, TimeDelta::days(365));

        // 365 elapsed days vs the 365.25-day year leaves a sub-basis-point residual
        assert_relative_eq!(actual.value, 0.10, epsilon = 1e-3);
    }

    #[test]
    fn test_cagr_two_years_compounding() {
        let total_return = TotalReturn { value: 0.10 };
        let actual = Cagr::calculate(total_return, TimeDelta::days(730));

        // (1.1)^(1/2) - 1 ≈ 4.88%
        assert_relative_eq!(actual.value, 0.0488, epsilon = 1e-3);
    }

    #[test]
    fn test_cagr_exact_fractional_year() {
        let total_return = TotalReturn { value: 0.21 };
        let half_year = TimeDelta::seconds((SECONDS_PER_YEAR / 2.0) as i64);

        let actual = Cagr::calculate(total_return, half_year);

        assert_relative_eq!(actual.value, 1.21_f64.powf(2.0) - 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cagr_degenerate_inputs_are_nan() {
        assert!(
            Cagr::calculate(TotalReturn { value: 0.1 }, TimeDelta::zero())
                .value
                .is_nan()
        );
        assert!(
            Cagr::calculate(TotalReturn { value: -1.5 }, TimeDelta::days(365))
                .value
                .is_nan()
        );
    }
}
