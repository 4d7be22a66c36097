use crate::{FnvIndexMap, error::DataError, series::Timed, symbol::Symbol};
use chrono::NaiveDate;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Raw per-symbol price observations as returned by a market-data provider, prior to any
/// cleaning or alignment.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize, Constructor)]
pub struct RawPriceData {
    observations: FnvIndexMap<Symbol, Vec<Timed<f64>>>,
}

impl RawPriceData {
    pub fn insert(&mut self, symbol: Symbol, observations: Vec<Timed<f64>>) {
        self.observations.insert(symbol, observations);
    }

    pub fn observations(&self) -> &FnvIndexMap<Symbol, Vec<Timed<f64>>> {
        &self.observations
    }

    pub fn into_observations(self) -> FnvIndexMap<Symbol, Vec<Timed<f64>>> {
        self.observations
    }

    /// `true` when no symbol returned a single observation.
    pub fn is_empty(&self) -> bool {
        self.observations
            .values()
            .all(|observations| observations.is_empty())
    }
}

/// Injected market-data source.
///
/// Implementations fetch daily prices for the requested symbols over an inclusive date range.
/// The fetch blocks before the analysis pipeline starts; the pipeline itself never performs IO
/// and never retries.
pub trait PriceSource {
    fn fetch(
        &self,
        symbols: &[Symbol],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawPriceData, DataError>;
}

/// In-memory [`PriceSource`] used in tests and demos.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize, Constructor)]
pub struct InMemorySource {
    observations: FnvIndexMap<Symbol, Vec<Timed<f64>>>,
}

impl InMemorySource {
    pub fn insert<I>(&mut self, symbol: Symbol, observations: I)
    where
        I: IntoIterator<Item = Timed<f64>>,
    {
        self.observations
            .insert(symbol, observations.into_iter().collect());
    }
}

impl PriceSource for InMemorySource {
    fn fetch(
        &self,
        symbols: &[Symbol],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawPriceData, DataError> {
        let observations = symbols
            .iter()
            .map(|symbol| {
                let in_range = self
                    .observations
                    .get(symbol)
                    .map(|points| {
                        points
                            .iter()
                            .filter(|point| point.date >= start && point.date <= end)
                            .copied()
                            .collect()
                    })
                    .unwrap_or_default();
                (symbol.clone(), in_range)
            })
            .collect();

        Ok(RawPriceData::new(observations))
    }
}
