use crate::{
    FnvIndexMap,
    error::DataError,
    series::PriceSeries,
    source::RawPriceData,
    symbol::Symbol,
    table::PriceTable,
};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Maximum number of consecutive missing entries bridged by forward-fill.
pub const MAX_FILL_GAP: usize = 5;

/// Minimum number of aligned dates required for analysis.
pub const MIN_ALIGNED_DATES: usize = 2;

/// Forward-fill missing entries, bridging at most `max_gap` consecutive holes.
///
/// Runs longer than `max_gap` are filled for the first `max_gap` entries and left missing
/// beyond that. Leading holes are never filled.
pub fn forward_fill(column: &[Option<f64>], max_gap: usize) -> Vec<Option<f64>> {
    let mut last_value = None;
    let mut gap = 0usize;

    column
        .iter()
        .map(|entry| match entry {
            Some(value) => {
                gap = 0;
                last_value = Some(*value);
                Some(*value)
            }
            None => {
                gap += 1;
                match last_value {
                    Some(value) if gap <= max_gap => Some(value),
                    _ => None,
                }
            }
        })
        .collect()
}

/// Clean raw per-symbol observations and align them onto a shared date index.
pub fn clean_and_align(raw: RawPriceData) -> Result<PriceTable, DataError> {
    let cleaned = raw
        .into_observations()
        .into_iter()
        .map(|(symbol, observations)| {
            let series = PriceSeries::from_raw(observations);
            match series.is_empty() {
                true => Err(DataError::NoUsableData { symbol }),
                false => Ok((symbol, series)),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    align(cleaned)
}

/// Align cleaned per-symbol price series onto the intersection of dates where every symbol
/// has a valid price, after gap-limited forward-fill across the union index.
pub fn align(series: Vec<(Symbol, PriceSeries)>) -> Result<PriceTable, DataError> {
    for (symbol, prices) in &series {
        if prices.is_empty() {
            return Err(DataError::NoUsableData {
                symbol: symbol.clone(),
            });
        }
    }

    // Outer-join: union of every symbol's date index
    let union: Vec<NaiveDate> = series
        .iter()
        .flat_map(|(_, prices)| prices.dates())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // Project each symbol onto the union index, then forward-fill bounded gaps
    let filled: Vec<(Symbol, Vec<Option<f64>>)> = series
        .iter()
        .map(|(symbol, prices)| {
            let mut points = prices.points().iter().peekable();
            let sparse: Vec<Option<f64>> = union
                .iter()
                .map(|date| match points.peek() {
                    Some(point) if point.date == *date => points.next().map(|point| point.value),
                    _ => None,
                })
                .collect();

            (symbol.clone(), forward_fill(&sparse, MAX_FILL_GAP))
        })
        .collect();

    // Intersection: keep only the dates where every symbol has a value
    let mask: Vec<bool> = (0..union.len())
        .map(|row| filled.iter().all(|(_, column)| column[row].is_some()))
        .collect();

    let index: Vec<NaiveDate> = union
        .iter()
        .zip(&mask)
        .filter_map(|(date, keep)| keep.then_some(*date))
        .collect();

    let rows = index.len();
    if rows < MIN_ALIGNED_DATES {
        return Err(DataError::InsufficientData { rows });
    }

    let columns: FnvIndexMap<Symbol, Vec<f64>> = filled
        .into_iter()
        .map(|(symbol, column)| {
            let values = column
                .into_iter()
                .zip(&mask)
                .filter_map(|(entry, keep)| if *keep { entry } else { None })
                .collect::<Vec<f64>>();
            (symbol, values)
        })
        .collect();

    debug!(
        union_dates = union.len(),
        aligned_dates = rows,
        symbols = columns.len(),
        "aligned price histories"
    );
    if let (Some(start), Some(end)) = (index.first(), index.last()) {
        info!(%start, %end, dates = rows, "final aligned price table");
    }

    Ok(PriceTable::new(index, columns))
}
