use serde::{Deserialize, Serialize};

/// Compounded total return over a return series: `Π(1 + rᵢ) - 1`.
///
/// When no leading observations were truncated this equals `last_price / first_price - 1`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct TotalReturn {
    pub value: f64,
}

impl TotalReturn {
    /// Calculate the [`TotalReturn`] by compounding the provided simple returns.
    pub fn calculate<I>(returns: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let factor = returns
            .into_iter()
            .fold(1.0, |factor, simple| factor * (1.0 + simple));

        Self {
            value: factor - 1.0,
        }
    }

    /// Calculate the [`TotalReturn`] directly from the first and last price of a series.
    pub fn from_prices(first: f64, last: f64) -> Self {
        Self {
            value: last / first - 1.0,
        }
    }

    /// The compounding growth factor `1 + value`.
    pub fn compound_factor(&self) -> f64 {
        1.0 + self.value
    }
}
