use serde::{Deserialize, Serialize};

/// Grouping of [Welford Online](https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Welford's_online_algorithm)
/// algorithms for calculating running values such as mean and variance in one pass through.
pub mod welford_online {
    /// Calculates the next mean.
    pub fn calculate_mean(mut prev_mean: f64, next_value: f64, count: f64) -> f64 {
        prev_mean += (next_value - prev_mean) / count;
        prev_mean
    }

    /// Calculates the next Welford Online recurrence relation M.
    pub fn calculate_recurrence_relation_m(
        prev_m: f64,
        prev_mean: f64,
        new_value: f64,
        new_mean: f64,
    ) -> f64 {
        prev_m + ((new_value - prev_mean) * (new_value - new_mean))
    }

    /// Calculates the next unbiased 'Sample' Variance using Bessel's correction (count - 1),
    /// and the Welford Online recurrence relation M.
    pub fn calculate_sample_variance(recurrence_relation_m: f64, count: usize) -> f64 {
        match count < 2 {
            true => 0.0,
            false => recurrence_relation_m / (count - 1) as f64,
        }
    }
}

/// Maintains running statistical summaries of a dataset using Welford's online algorithm.
///
/// Tracks count, sum, running mean, and the recurrence relation M from which the unbiased
/// sample variance (ddof = 1) and standard deviation derive. O(1) memory regardless of
/// dataset size.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct DataSetSummary {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub recurrence_relation_m: f64,
}

impl DataSetSummary {
    /// Build a summary from a complete dataset.
    pub fn from_slice(values: &[f64]) -> Self {
        let mut summary = Self::default();
        for value in values {
            summary.update(*value);
        }
        summary
    }

    /// Updates dataset statistics with the next value.
    pub fn update(&mut self, next_value: f64) {
        self.count += 1;
        self.sum += next_value;

        let prev_mean = self.mean;
        self.mean = welford_online::calculate_mean(self.mean, next_value, self.count as f64);

        self.recurrence_relation_m = welford_online::calculate_recurrence_relation_m(
            self.recurrence_relation_m,
            prev_mean,
            next_value,
            self.mean,
        );
    }

    /// Unbiased sample variance (ddof = 1). Zero when fewer than two observations.
    pub fn sample_variance(&self) -> f64 {
        welford_online::calculate_sample_variance(self.recurrence_relation_m, self.count)
    }

    /// Sample standard deviation (ddof = 1).
    pub fn std_dev(&self) -> f64 {
        self.sample_variance().abs().sqrt()
    }
}

/// Downside deviation with the full-sample denominator:
/// `sqrt(Σ negative_excess² / N)` where N is the **total** observation count, not the count
/// of negative observations.
pub fn downside_deviation(excess_returns: &[f64]) -> f64 {
    if excess_returns.is_empty() {
        return f64::NAN;
    }

    let sum_squares: f64 = excess_returns
        .iter()
        .filter(|excess| **excess < 0.0)
        .map(|excess| excess * excess)
        .sum();

    (sum_squares / excess_returns.len() as f64).sqrt()
}

/// Reference-methodology downside estimator: sample standard deviation (ddof = 1) of the
/// clamped series `min(excess, 0)` - zeros included, mean subtracted.
pub fn clamped_downside_sample_std(excess_returns: &[f64]) -> f64 {
    if excess_returns.len() < 2 {
        return f64::NAN;
    }

    let clamped: Vec<f64> = excess_returns.iter().map(|excess| excess.min(0.0)).collect();
    DataSetSummary::from_slice(&clamped).std_dev()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_data_set_summary_running_statistics() {
        struct TestCase {
            input_next_value: f64,
            expected_count: usize,
            expected_mean: f64,
            expected_sample_variance: f64,
        }

        let mut summary = DataSetSummary::default();

        // Dataset = [1.1, 1.2, 1.3, 1.4, 0.6]
        let cases = vec![
            TestCase {
                input_next_value: 1.1,
                expected_count: 1,
                expected_mean: 1.1,
                expected_sample_variance: 0.0,
            },
            TestCase {
                input_next_value: 1.2,
                expected_count: 2,
                expected_mean: 1.15,
                expected_sample_variance: 0.005,
            },
            TestCase {
                input_next_value: 1.3,
                expected_count: 3,
                expected_mean: 1.2,
                expected_sample_variance: 0.01,
            },
            TestCase {
                input_next_value: 1.4,
                expected_count: 4,
                expected_mean: 1.25,
                expected_sample_variance: 0.016666666667,
            },
            TestCase {
                input_next_value: 0.6,
                expected_count: 5,
                expected_mean: 1.12,
                expected_sample_variance: 0.097,
            },
        ];

        for (index, case) in cases.into_iter().enumerate() {
            summary.update(case.input_next_value);

            assert_eq!(summary.count, case.expected_count, "TC{index} count");
            assert_relative_eq!(summary.mean, case.expected_mean, epsilon = 1e-9);
            assert_relative_eq!(
                summary.sample_variance(),
                case.expected_sample_variance,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_sample_variance_single_observation_is_zero() {
        let summary = DataSetSummary::from_slice(&[0.42]);
        assert_eq!(summary.sample_variance(), 0.0);
        assert_eq!(summary.std_dev(), 0.0);
    }

    #[test]
    fn test_downside_deviation_full_sample_denominator() {
        // 4 observations, 2 negative: sqrt((0.02² + 0.01²) / 4), never / 2
        let excess = [0.01, -0.02, 0.01, -0.01];
        let expected = ((0.02_f64.powi(2) + 0.01_f64.powi(2)) / 4.0).sqrt();
        assert_relative_eq!(downside_deviation(&excess), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_downside_deviation_no_negatives_is_zero() {
        assert_eq!(downside_deviation(&[0.01, 0.02, 0.0]), 0.0);
    }

    #[test]
    fn test_clamped_downside_sample_std() {
        // Clamped series = [0, -0.02, 0, -0.01], sample std with mean subtraction
        let excess = [0.01, -0.02, 0.01, -0.01];
        let clamped = [0.0, -0.02, 0.0, -0.01];
        let mean: f64 = clamped.iter().sum::<f64>() / 4.0;
        let expected = (clamped
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / 3.0)
            .sqrt();

        assert_relative_eq!(
            clamped_downside_sample_std(&excess),
            expected,
            epsilon = 1e-12
        );
    }
}
