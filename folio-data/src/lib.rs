#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::pedantic, clippy::type_complexity)]
#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    rust_2018_idioms
)]

//! # Folio-Data
//! Price history preparation for the Folio portfolio analytics engine. It provides:
//! * **Cleaning**: per-symbol removal of missing, non-positive and duplicate price observations.
//! * **Alignment**: outer-join of all symbols' date indices, gap-limited forward-fill, and
//!   intersection down to the dates where every symbol has a valid price.
//! * **Returns**: simple daily returns with the date-matching truncation required for
//!   QuantStats-compatible performance metrics, plus cumulative returns, time-in-market and
//!   cross-symbol correlation diagnostics.
//! * **Sources**: the [`PriceSource`](source::PriceSource) abstraction behind which market-data
//!   providers are injected.
//!
//! All transforms are pure functions over explicit ordered, date-indexed sequences - no global
//! mutable tables - so each stage is independently testable.

use fnv::FnvBuildHasher;
use indexmap::IndexMap;

/// Cleaning and alignment of multi-symbol price histories onto a shared date index.
pub mod align;

/// Data-level error taxonomy.
pub mod error;

/// Simple returns, date-matching truncation, and return-series diagnostics.
pub mod returns;

/// Ordered date-indexed series for a single symbol.
pub mod series;

/// Injected market-data source abstraction.
pub mod source;

/// Symbol identifier.
pub mod symbol;

/// Aligned multi-symbol tables.
pub mod table;

/// [`IndexMap`] with `fnv` hasher - insertion-ordered symbol-keyed collections.
pub type FnvIndexMap<K, V> = IndexMap<K, V, FnvBuildHasher>;

pub use error::DataError;
pub use series::{PriceSeries, ReturnSeries, Timed};
pub use symbol::Symbol;
pub use table::{PriceTable, ReturnTable};
