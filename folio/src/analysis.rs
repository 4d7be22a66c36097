use crate::{
    engine::{MetricEngine, MetricInput, MetricResult, compound::CompoundEngine, reference::ReferenceEngine},
    error::AnalysisError,
    reconcile::Reconciliation,
    statistic::rate::RiskFreeRate,
};
use chrono::NaiveDate;
use derive_more::Constructor;
use folio_data::{
    FnvIndexMap, PriceTable, ReturnTable, Symbol,
    align::clean_and_align,
    returns::{CorrelationMatrix, correlation, return_table},
    source::PriceSource,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Maximum number of symbols accepted per analysis request.
pub const MAX_SYMBOLS: usize = 10;

/// Minimum inclusive calendar-day span of an analysis request.
pub const MIN_RANGE_DAYS: i64 = 30;

/// A single portfolio analysis request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Constructor)]
pub struct AnalysisRequest {
    pub symbols: Vec<Symbol>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub risk_free_rate: RiskFreeRate,
}

impl AnalysisRequest {
    fn validate(&self) -> Result<(), AnalysisError> {
        if self.symbols.is_empty() {
            return Err(AnalysisError::NoSymbols);
        }
        if self.symbols.len() > MAX_SYMBOLS {
            return Err(AnalysisError::TooManySymbols {
                count: self.symbols.len(),
                max: MAX_SYMBOLS,
            });
        }
        if let Some(symbol) = self.symbols.iter().find(|symbol| !symbol.is_well_formed()) {
            return Err(AnalysisError::InvalidSymbol {
                symbol: symbol.clone(),
            });
        }
        if self.start_date >= self.end_date {
            return Err(AnalysisError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        let days = (self.end_date - self.start_date).num_days();
        if days < MIN_RANGE_DAYS {
            return Err(AnalysisError::RangeTooShort {
                days,
                min: MIN_RANGE_DAYS,
            });
        }

        Ok(())
    }
}

/// Windowing and data-quality facts about one analysis, for the reporting collaborators.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DataSummary {
    /// First and last date of the aligned price table.
    pub raw_start: NaiveDate,
    pub raw_end: NaiveDate,
    pub raw_dates: usize,

    /// First and last date of the date-matched return window actually analysed.
    pub effective_start: NaiveDate,
    pub effective_end: NaiveDate,
    pub effective_dates: usize,

    pub first_prices: FnvIndexMap<Symbol, f64>,
    pub last_prices: FnvIndexMap<Symbol, f64>,

    /// Symbols with all-zero returns, excluded from the date-matching decision.
    pub stale_symbols: Vec<Symbol>,
}

/// Everything one analysis produced for a single symbol.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SymbolReview {
    pub symbol: Symbol,
    pub primary: MetricResult,
    pub reference: MetricResult,
    pub reconciliation: Reconciliation,
    /// Fraction of observations with a non-zero return.
    pub time_in_market: f64,
}

/// Full output of one analysis request.
///
/// Carries the aligned prices and date-matched returns alongside the metrics - the CSV export
/// and charting collaborators consume them directly.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisReport {
    pub summary: DataSummary,
    pub prices: PriceTable,
    pub returns: ReturnTable,
    pub cumulative_returns: ReturnTable,
    pub correlation: CorrelationMatrix,
    pub reviews: Vec<SymbolReview>,
}

/// Runs the full analysis pipeline: fetch → clean + align → returns + date-matching → both
/// metric engines → reconciliation.
///
/// Stateless apart from the injected [`PriceSource`]; every request operates on its own
/// in-memory tables, so concurrent analyses never share mutable state. Preprocessing failures
/// abort the whole request; per-metric degeneracies never do.
#[derive(Debug, Clone, Default, Constructor)]
pub struct Analyser<Source> {
    source: Source,
}

impl<Source> Analyser<Source>
where
    Source: PriceSource,
{
    pub fn analyse(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        request.validate()?;

        info!(
            symbols = %request.symbols.iter().format(","),
            start = %request.start_date,
            end = %request.end_date,
            risk_free = request.risk_free_rate.annual(),
            "starting portfolio analysis"
        );

        let raw = self
            .source
            .fetch(&request.symbols, request.start_date, request.end_date)?;
        if raw.is_empty() {
            return Err(AnalysisError::InvalidDateRange {
                start: request.start_date,
                end: request.end_date,
            });
        }

        let prices = clean_and_align(raw)?;
        let returns = return_table(&prices);
        let cumulative_returns = returns.cumulative();
        let correlation = correlation(&returns);

        let primary_engine = CompoundEngine;
        let reference_engine = ReferenceEngine;

        let mut reviews = Vec::with_capacity(prices.num_symbols());
        for symbol in prices.symbols().cloned().collect::<Vec<_>>() {
            let (Some(price_series), Some(return_series)) =
                (prices.series(&symbol), returns.series(&symbol))
            else {
                continue;
            };

            let input = MetricInput::new(&symbol, &price_series, &return_series);
            let primary = primary_engine.compute(input, request.risk_free_rate);
            let reference = reference_engine.compute(input, request.risk_free_rate);
            let reconciliation = Reconciliation::compare(&primary, &reference);
            let time_in_market = returns.time_in_market(&symbol).unwrap_or(0.0);

            reviews.push(SymbolReview {
                symbol,
                primary,
                reference,
                reconciliation,
                time_in_market,
            });
        }

        let summary = data_summary(&prices, &returns);
        info!(
            symbols = reviews.len(),
            effective_dates = summary.effective_dates,
            "portfolio analysis complete"
        );

        Ok(AnalysisReport {
            summary,
            prices,
            returns,
            cumulative_returns,
            correlation,
            reviews,
        })
    }
}

fn data_summary(prices: &PriceTable, returns: &ReturnTable) -> DataSummary {
    let raw_bounds = (prices.index().first(), prices.index().last());
    let (raw_start, raw_end) = match raw_bounds {
        (Some(start), Some(end)) => (*start, *end),
        _ => Default::default(),
    };

    let (effective_start, effective_end) = match (returns.index().first(), returns.index().last()) {
        (Some(start), Some(end)) => (*start, *end),
        _ => (raw_start, raw_end),
    };

    DataSummary {
        raw_start,
        raw_end,
        raw_dates: prices.num_dates(),
        effective_start,
        effective_end,
        effective_dates: returns.num_dates(),
        first_prices: prices.first_prices(),
        last_prices: prices.last_prices(),
        stale_symbols: returns.stale().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_data::{DataError, Timed, source::InMemorySource};

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, month, day).unwrap()
    }

    fn request(symbols: Vec<Symbol>) -> AnalysisRequest {
        AnalysisRequest::new(
            symbols,
            date(1, 1),
            date(6, 30),
            RiskFreeRate::from_percent(5.0),
        )
    }

    #[test]
    fn test_validate_rejects_empty_symbols() {
        let analyser = Analyser::new(InMemorySource::default());
        let err = analyser.analyse(&request(vec![])).unwrap_err();
        assert_eq!(err, AnalysisError::NoSymbols);
    }

    #[test]
    fn test_validate_rejects_too_many_symbols() {
        let symbols = (0..11).map(|i| Symbol::new(format!("SYM{i}"))).collect();
        let analyser = Analyser::new(InMemorySource::default());

        let err = analyser.analyse(&request(symbols)).unwrap_err();

        assert_eq!(
            err,
            AnalysisError::TooManySymbols {
                count: 11,
                max: MAX_SYMBOLS
            }
        );
    }

    #[test]
    fn test_validate_rejects_malformed_symbol() {
        let analyser = Analyser::new(InMemorySource::default());
        let err = analyser
            .analyse(&request(vec![Symbol::new("AA PL")]))
            .unwrap_err();

        assert_eq!(
            err,
            AnalysisError::InvalidSymbol {
                symbol: Symbol::new("AA PL")
            }
        );
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let analyser = Analyser::new(InMemorySource::default());
        let request = AnalysisRequest::new(
            vec![Symbol::new("AAA")],
            date(6, 30),
            date(1, 1),
            RiskFreeRate::default(),
        );

        let err = analyser.analyse(&request).unwrap_err();

        assert_eq!(
            err,
            AnalysisError::InvalidDateRange {
                start: date(6, 30),
                end: date(1, 1)
            }
        );
    }

    #[test]
    fn test_validate_rejects_short_range() {
        let analyser = Analyser::new(InMemorySource::default());
        let request = AnalysisRequest::new(
            vec![Symbol::new("AAA")],
            date(1, 1),
            date(1, 15),
            RiskFreeRate::default(),
        );

        let err = analyser.analyse(&request).unwrap_err();

        assert_eq!(
            err,
            AnalysisError::RangeTooShort {
                days: 14,
                min: MIN_RANGE_DAYS
            }
        );
    }

    #[test]
    fn test_empty_fetch_maps_to_invalid_date_range() {
        let analyser = Analyser::new(InMemorySource::default());
        let err = analyser
            .analyse(&request(vec![Symbol::new("AAA")]))
            .unwrap_err();

        assert_eq!(
            err,
            AnalysisError::InvalidDateRange {
                start: date(1, 1),
                end: date(6, 30)
            }
        );
    }

    #[test]
    fn test_symbol_without_data_fails_fast() {
        let mut source = InMemorySource::default();
        source.insert(
            Symbol::new("AAA"),
            (1..=60).map(|offset| {
                Timed::new(
                    date(1, 1) + chrono::Days::new(offset),
                    100.0 + offset as f64,
                )
            }),
        );

        let analyser = Analyser::new(source);
        let err = analyser
            .analyse(&request(vec![Symbol::new("AAA"), Symbol::new("NODATA")]))
            .unwrap_err();

        assert_eq!(
            err,
            AnalysisError::Data(DataError::NoUsableData {
                symbol: Symbol::new("NODATA")
            })
        );
    }
}
