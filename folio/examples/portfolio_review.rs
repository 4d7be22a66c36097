use chrono::{Days, NaiveDate};
use folio::{AnalysisRequest, Analyser, RiskFreeRate};
use folio_data::{Symbol, Timed, source::InMemorySource};

fn main() {
    // Initialise INFO and above logging without JSON formatting
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();

    // Synthetic daily closes for two securities over one year
    let mut source = InMemorySource::default();
    source.insert(
        Symbol::new("AAA"),
        price_path(start, 100.0, |t| if t % 5 == 0 { -0.006 } else { 0.004 }),
    );
    source.insert(
        Symbol::new("BBB"),
        price_path(start, 250.0, |t| if t % 7 == 0 { -0.004 } else { 0.003 }),
    );

    let analyser = Analyser::new(source);
    let request = AnalysisRequest::new(
        vec![Symbol::new("AAA"), Symbol::new("BBB")],
        start,
        NaiveDate::from_ymd_opt(2023, 12, 29).unwrap(),
        RiskFreeRate::from_percent(5.0),
    );

    let report = analyser.analyse(&request).expect("analysis should succeed");

    for review in &report.reviews {
        println!(
            "{}",
            serde_json::to_string_pretty(review).expect("review serializes")
        );
    }
}

fn price_path<F>(start: NaiveDate, start_price: f64, pattern: F) -> Vec<Timed<f64>>
where
    F: Fn(usize) -> f64,
{
    let mut price = start_price;
    (0..252)
        .map(|t| {
            if t > 0 {
                price *= 1.0 + pattern(t);
            }
            Timed::new(start + Days::new(t as u64), price)
        })
        .collect()
}
