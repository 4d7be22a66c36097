use crate::{
    FnvIndexMap,
    symbol::Symbol,
    table::{PriceTable, ReturnTable},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Simple daily returns over a price column: `price[t] / price[t-1] - 1`.
///
/// Output is one shorter than the input. Non-finite ratios are replaced with `0.0` so the
/// column stays aligned with its siblings.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|window| {
            let ratio = window[1] / window[0];
            if ratio.is_finite() { ratio - 1.0 } else { 0.0 }
        })
        .collect()
}

/// Convert an aligned [`PriceTable`] into a date-matched [`ReturnTable`].
///
/// Every symbol's return series starts at the latest first-non-zero-return date across the
/// table, so no symbol's "dead" pre-listing or stale-price period is counted and all symbols
/// share one analysis window. Symbols whose returns are all zero carry no information about
/// that date - they are excluded from the truncation decision, kept in the table, and flagged
/// stale.
pub fn return_table(prices: &PriceTable) -> ReturnTable {
    let index: Vec<NaiveDate> = prices.index().iter().skip(1).copied().collect();

    let columns: FnvIndexMap<Symbol, Vec<f64>> = prices
        .columns()
        .iter()
        .map(|(symbol, column)| (symbol.clone(), simple_returns(column)))
        .collect();

    let mut stale = Vec::new();
    let mut matched_row: Option<usize> = None;
    for (symbol, column) in &columns {
        match column.iter().position(|value| *value != 0.0) {
            Some(first_nonzero) => {
                matched_row = Some(matched_row.map_or(first_nonzero, |row| row.max(first_nonzero)));
            }
            None => {
                warn!(%symbol, "symbol has all-zero returns, excluded from date matching");
                stale.push(symbol.clone());
            }
        }
    }

    let (index, columns, matched_start) = match matched_row {
        Some(row) if row > 0 => {
            let start = index[row];
            info!(%start, dropped = row, "applied return-series date matching");
            let index = index[row..].to_vec();
            let columns = columns
                .into_iter()
                .map(|(symbol, column)| (symbol, column[row..].to_vec()))
                .collect();
            (index, columns, Some(start))
        }
        Some(_) => {
            let start = index.first().copied();
            (index, columns, start)
        }
        None => (index, columns, None),
    };

    ReturnTable::new(index, columns, stale, matched_start)
}

/// Pearson correlation matrix of date-matched daily returns.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CorrelationMatrix {
    pub symbols: Vec<Symbol>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &Symbol, b: &Symbol) -> Option<f64> {
        let row = self.symbols.iter().position(|symbol| symbol == a)?;
        let col = self.symbols.iter().position(|symbol| symbol == b)?;
        Some(self.values[row][col])
    }
}

/// Pairwise Pearson correlation over the table's return columns.
///
/// A zero-variance column yields NaN against every other symbol.
pub fn correlation(returns: &ReturnTable) -> CorrelationMatrix {
    let symbols: Vec<Symbol> = returns.symbols().cloned().collect();
    let values = symbols
        .iter()
        .map(|a| {
            symbols
                .iter()
                .map(|b| {
                    let a = returns.column(a).unwrap_or(&[]);
                    let b = returns.column(b).unwrap_or(&[]);
                    pearson(a, b)
                })
                .collect()
        })
        .collect();

    CorrelationMatrix { symbols, values }
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return f64::NAN;
    }

    let mean_a = a[..n].iter().sum::<f64>() / n as f64;
    let mean_b = b[..n].iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut variance_a = 0.0;
    let mut variance_b = 0.0;
    for (x, y) in a[..n].iter().zip(&b[..n]) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        variance_a += dx * dx;
        variance_b += dy * dy;
    }

    let denominator = (variance_a * variance_b).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }
    covariance / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FnvIndexMap;
    use approx::assert_relative_eq;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, day).unwrap()
    }

    fn price_table(columns: Vec<(&str, Vec<f64>)>) -> PriceTable {
        let rows = columns.first().map(|(_, prices)| prices.len()).unwrap_or(0);
        let index = (0..rows).map(|row| date(row as u32 + 1)).collect();
        let columns: FnvIndexMap<Symbol, Vec<f64>> = columns
            .into_iter()
            .map(|(symbol, prices)| (Symbol::new(symbol), prices))
            .collect();
        PriceTable::new(index, columns)
    }

    #[test]
    fn test_simple_returns() {
        let returns = simple_returns(&[100.0, 110.0, 99.0]);
        assert_relative_eq!(returns[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(returns[1], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_date_matching_uses_latest_first_nonzero() {
        // AAA first moves on day 3 of the return index, BBB on day 5 - the shared series
        // must start where the later symbol wakes up
        let table = price_table(vec![
            ("AAA", vec![10.0, 10.0, 10.0, 11.0, 11.0, 11.5, 12.0]),
            ("BBB", vec![20.0, 20.0, 20.0, 20.0, 20.0, 21.0, 21.5]),
        ]);

        let returns = return_table(&table);

        // Return index covers days 2..=7; AAA's first non-zero return is on day 4,
        // BBB's on day 6
        assert_eq!(returns.matched_start(), Some(date(6)));
        assert_eq!(returns.index(), &[date(6), date(7)]);
        for symbol in [Symbol::new("AAA"), Symbol::new("BBB")] {
            assert_eq!(returns.column(&symbol).unwrap().len(), 2);
        }
    }

    #[test]
    fn test_all_zero_symbol_flagged_stale_not_constraining() {
        let table = price_table(vec![
            ("AAA", vec![10.0, 10.0, 11.0, 11.5]),
            ("FLAT", vec![5.0, 5.0, 5.0, 5.0]),
        ]);

        let returns = return_table(&table);

        assert_eq!(returns.stale(), &[Symbol::new("FLAT")]);
        assert!(returns.is_stale(&Symbol::new("FLAT")));
        // Truncation driven by AAA alone: first non-zero return lands on day 3
        assert_eq!(returns.matched_start(), Some(date(3)));
        assert_eq!(returns.num_dates(), 2);
    }

    #[test]
    fn test_no_truncation_when_first_return_nonzero() {
        let table = price_table(vec![("AAA", vec![10.0, 11.0, 12.0])]);

        let returns = return_table(&table);

        assert_eq!(returns.num_dates(), 2);
        assert_eq!(returns.matched_start(), Some(date(2)));
    }

    #[test]
    fn test_correlation_perfectly_correlated_and_inverse() {
        let mut columns = FnvIndexMap::default();
        columns.insert(Symbol::new("AAA"), vec![0.01, -0.02, 0.03, 0.01]);
        columns.insert(Symbol::new("BBB"), vec![0.02, -0.04, 0.06, 0.02]);
        columns.insert(Symbol::new("CCC"), vec![-0.01, 0.02, -0.03, -0.01]);
        let index = (1..=4).map(date).collect();
        let returns = ReturnTable::new(index, columns, vec![], None);

        let matrix = correlation(&returns);

        let aaa = Symbol::new("AAA");
        assert_relative_eq!(matrix.get(&aaa, &aaa).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            matrix.get(&aaa, &Symbol::new("BBB")).unwrap(),
            1.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            matrix.get(&aaa, &Symbol::new("CCC")).unwrap(),
            -1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_correlation_zero_variance_is_nan() {
        let mut columns = FnvIndexMap::default();
        columns.insert(Symbol::new("AAA"), vec![0.01, -0.02, 0.03]);
        columns.insert(Symbol::new("FLAT"), vec![0.0, 0.0, 0.0]);
        let index = (1..=3).map(date).collect();
        let returns = ReturnTable::new(index, columns, vec![], None);

        let matrix = correlation(&returns);

        assert!(
            matrix
                .get(&Symbol::new("AAA"), &Symbol::new("FLAT"))
                .unwrap()
                .is_nan()
        );
    }
}
