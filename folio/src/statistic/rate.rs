use serde::{Deserialize, Serialize};

/// Calendar days per year on the 365-day convention used throughout the analytics.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Theoretical rate of return of an investment with zero risk, held as an annual fraction.
///
/// See docs: <https://www.investopedia.com/terms/r/risk-freerate.asp>
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct RiskFreeRate(f64);

impl RiskFreeRate {
    /// From an annual fraction, eg/ `0.05` for 5%.
    pub fn from_fraction(annual: f64) -> Self {
        Self(annual)
    }

    /// From an annual percentage, eg/ `5.0` for 5%.
    pub fn from_percent(percent: f64) -> Self {
        Self(percent / 100.0)
    }

    pub fn annual(&self) -> f64 {
        self.0
    }

    /// Compounding de-annualisation onto a daily basis:
    /// `(1 + annual)^(1/365) - 1`.
    ///
    /// Not `annual / 365` - the simple division ignores compounding and overstates the daily
    /// rate.
    pub fn daily(&self) -> f64 {
        (1.0 + self.0).powf(1.0 / DAYS_PER_YEAR) - 1.0
    }
}
