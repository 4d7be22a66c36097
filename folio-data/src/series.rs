use chrono::NaiveDate;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// A value observed on a specific calendar date.
#[derive(
    Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize, Constructor,
)]
pub struct Timed<T> {
    pub date: NaiveDate,
    pub value: T,
}

/// Cleaned daily price history for a single symbol.
///
/// Invariants: dates strictly increasing, every price finite and positive, no duplicate dates.
#[derive(Debug, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct PriceSeries(Vec<Timed<f64>>);

impl PriceSeries {
    /// Clean raw observations into a [`PriceSeries`].
    ///
    /// Drops non-finite and non-positive prices, orders by date, and drops duplicate dates
    /// keeping the first occurrence.
    pub fn from_raw<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Timed<f64>>,
    {
        let mut points = observations
            .into_iter()
            .filter(|point| point.value.is_finite() && point.value > 0.0)
            .collect::<Vec<_>>();

        // Stable sort, so the first occurrence of a duplicated date survives the dedup
        points.sort_by_key(|point| point.date);
        points.dedup_by_key(|point| point.date);

        Self(points)
    }

    /// Construct from observations already upholding the [`PriceSeries`] invariants.
    pub fn from_sorted(points: Vec<Timed<f64>>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Timed<f64>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Timed<f64>> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Timed<f64>> {
        self.0.last()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().map(|point| point.date)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|point| point.value)
    }

    /// Simple daily returns: `price[t] / price[t-1] - 1`, dropping the first date.
    ///
    /// Non-finite ratios are replaced with `0.0` so downstream consumers never observe NaN.
    pub fn returns(&self) -> ReturnSeries {
        let points = self
            .0
            .windows(2)
            .map(|window| {
                let ratio = window[1].value / window[0].value;
                let simple = if ratio.is_finite() { ratio - 1.0 } else { 0.0 };
                Timed::new(window[1].date, simple)
            })
            .collect();

        ReturnSeries(points)
    }
}

/// Simple daily returns for a single symbol, one observation per date after the first
/// price date.
#[derive(Debug, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize, Constructor)]
pub struct ReturnSeries(Vec<Timed<f64>>);

impl ReturnSeries {
    pub fn points(&self) -> &[Timed<f64>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Timed<f64>> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Timed<f64>> {
        self.0.last()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|point| point.value)
    }

    /// Index of the first non-zero return, if any.
    pub fn first_nonzero(&self) -> Option<usize> {
        self.0.iter().position(|point| point.value != 0.0)
    }

    /// Count of non-zero return observations.
    pub fn nonzero_count(&self) -> usize {
        self.0.iter().filter(|point| point.value != 0.0).count()
    }
}
