use crate::engine::MetricResult;
use derive_more::Display;
use folio_data::Symbol;
use serde::{Deserialize, Serialize};

/// Divergence at or below this percentage classifies as an acceptable near-match.
pub const ACCEPTABLE_DIVERGENCE_PCT: f64 = 5.0;

/// Classification of the divergence between two methodologies for one metric.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Serialize, Display)]
pub enum Agreement {
    /// Zero divergence.
    #[display("perfect match")]
    Perfect,

    /// Within the acceptable tolerance band.
    #[display("acceptable")]
    Acceptable,

    /// Beyond tolerance - needs investigation.
    #[display("divergent")]
    Divergent,

    /// One or both sides degenerate (NaN) - no meaningful comparison.
    #[display("incomparable")]
    Incomparable,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Serialize, Display)]
pub enum MetricKind {
    #[display("total_return")]
    TotalReturn,
    #[display("cagr")]
    Cagr,
    #[display("sharpe")]
    Sharpe,
    #[display("sortino")]
    Sortino,
}

/// One metric compared across the two methodologies.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct MetricComparison {
    pub metric: MetricKind,
    pub primary: f64,
    pub reference: f64,
    /// Relative divergence `|primary - reference| / |reference| × 100`.
    pub divergence_pct: f64,
    pub agreement: Agreement,
}

impl MetricComparison {
    pub fn new(metric: MetricKind, primary: f64, reference: f64) -> Self {
        let (divergence_pct, agreement) = classify(primary, reference);
        Self {
            metric,
            primary,
            reference,
            divergence_pct,
            agreement,
        }
    }
}

/// Advisory cross-validation of two [`MetricResult`]s computed over the same inputs by
/// independent methodologies.
///
/// Surfaces and bounds the expected divergence between them - it never blocks the analysis
/// output, only annotates it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Reconciliation {
    pub symbol: Symbol,
    pub comparisons: Vec<MetricComparison>,
}

impl Reconciliation {
    pub fn compare(primary: &MetricResult, reference: &MetricResult) -> Self {
        Self {
            symbol: primary.symbol.clone(),
            comparisons: vec![
                MetricComparison::new(
                    MetricKind::TotalReturn,
                    primary.total_return,
                    reference.total_return,
                ),
                MetricComparison::new(MetricKind::Cagr, primary.cagr, reference.cagr),
                MetricComparison::new(MetricKind::Sharpe, primary.sharpe.value, reference.sharpe.value),
                MetricComparison::new(
                    MetricKind::Sortino,
                    primary.sortino.value,
                    reference.sortino.value,
                ),
            ],
        }
    }

    /// `true` when every comparable metric agrees within tolerance.
    pub fn is_acceptable(&self) -> bool {
        self.comparisons
            .iter()
            .all(|comparison| comparison.agreement != Agreement::Divergent)
    }
}

fn classify(primary: f64, reference: f64) -> (f64, Agreement) {
    if primary.is_nan() || reference.is_nan() {
        return (f64::NAN, Agreement::Incomparable);
    }

    if primary == reference {
        return (0.0, Agreement::Perfect);
    }

    if reference == 0.0 {
        return (f64::INFINITY, Agreement::Divergent);
    }

    let divergence_pct = (primary - reference).abs() / reference.abs() * 100.0;
    let agreement = if divergence_pct <= ACCEPTABLE_DIVERGENCE_PCT {
        Agreement::Acceptable
    } else {
        Agreement::Divergent
    };

    (divergence_pct, agreement)
}
