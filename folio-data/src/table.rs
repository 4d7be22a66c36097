use crate::{
    FnvIndexMap,
    series::{PriceSeries, ReturnSeries, Timed},
    symbol::Symbol,
};
use chrono::NaiveDate;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Aligned multi-symbol price table.
///
/// Invariant: every column holds exactly one price per date in `index`, with `index` strictly
/// increasing - the output contract of [`align`](crate::align::align).
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize, Constructor)]
pub struct PriceTable {
    index: Vec<NaiveDate>,
    columns: FnvIndexMap<Symbol, Vec<f64>>,
}

impl PriceTable {
    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn columns(&self) -> &FnvIndexMap<Symbol, Vec<f64>> {
        &self.columns
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.columns.keys()
    }

    pub fn num_dates(&self) -> usize {
        self.index.len()
    }

    pub fn num_symbols(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, symbol: &Symbol) -> Option<&[f64]> {
        self.columns.get(symbol).map(Vec::as_slice)
    }

    /// Per-symbol [`PriceSeries`] view over the shared index.
    pub fn series(&self, symbol: &Symbol) -> Option<PriceSeries> {
        self.columns.get(symbol).map(|column| {
            PriceSeries::from_sorted(
                self.index
                    .iter()
                    .zip(column)
                    .map(|(date, price)| Timed::new(*date, *price))
                    .collect(),
            )
        })
    }

    /// First aligned price per symbol.
    pub fn first_prices(&self) -> FnvIndexMap<Symbol, f64> {
        self.columns
            .iter()
            .filter_map(|(symbol, column)| column.first().map(|price| (symbol.clone(), *price)))
            .collect()
    }

    /// Last aligned price per symbol.
    pub fn last_prices(&self) -> FnvIndexMap<Symbol, f64> {
        self.columns
            .iter()
            .filter_map(|(symbol, column)| column.last().map(|price| (symbol.clone(), *price)))
            .collect()
    }
}

/// Date-matched daily returns for all symbols on a shared index.
///
/// `stale` names symbols whose returns were all zero - they are kept in the table but were
/// excluded from the date-matching truncation. `matched_start` is the start of the
/// date-matched analysis window, `None` when every symbol is stale.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize, Constructor)]
pub struct ReturnTable {
    index: Vec<NaiveDate>,
    columns: FnvIndexMap<Symbol, Vec<f64>>,
    stale: Vec<Symbol>,
    matched_start: Option<NaiveDate>,
}

impl ReturnTable {
    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn columns(&self) -> &FnvIndexMap<Symbol, Vec<f64>> {
        &self.columns
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.columns.keys()
    }

    pub fn num_dates(&self) -> usize {
        self.index.len()
    }

    pub fn column(&self, symbol: &Symbol) -> Option<&[f64]> {
        self.columns.get(symbol).map(Vec::as_slice)
    }

    pub fn stale(&self) -> &[Symbol] {
        &self.stale
    }

    pub fn is_stale(&self, symbol: &Symbol) -> bool {
        self.stale.contains(symbol)
    }

    pub fn matched_start(&self) -> Option<NaiveDate> {
        self.matched_start
    }

    /// Per-symbol [`ReturnSeries`] view over the shared index.
    pub fn series(&self, symbol: &Symbol) -> Option<ReturnSeries> {
        self.columns.get(symbol).map(|column| {
            ReturnSeries::new(
                self.index
                    .iter()
                    .zip(column)
                    .map(|(date, value)| Timed::new(*date, *value))
                    .collect(),
            )
        })
    }

    /// Cumulative returns rebased to zero: `cumprod(1 + r) - 1` per symbol.
    pub fn cumulative(&self) -> ReturnTable {
        let columns = self
            .columns
            .iter()
            .map(|(symbol, column)| {
                let mut factor = 1.0;
                let cumulative = column
                    .iter()
                    .map(|value| {
                        factor *= 1.0 + value;
                        factor - 1.0
                    })
                    .collect();
                (symbol.clone(), cumulative)
            })
            .collect();

        ReturnTable {
            index: self.index.clone(),
            columns,
            stale: self.stale.clone(),
            matched_start: self.matched_start,
        }
    }

    /// Fraction of observations with a non-zero return - a data-quality diagnostic.
    pub fn time_in_market(&self, symbol: &Symbol) -> Option<f64> {
        self.columns.get(symbol).map(|column| {
            if column.is_empty() {
                return 0.0;
            }
            let nonzero = column.iter().filter(|value| **value != 0.0).count();
            nonzero as f64 / column.len() as f64
        })
    }
}
