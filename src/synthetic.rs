//! Deterministic stand-in datasets
//!
//! Used when a source file has not been provided yet. Every function is pure
//! apart from its `today` argument.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::datasets::{
    InvestmentReport, InvestmentReports, Recommendation, Recommendations, TradeHistory,
    TradeHistoryRecord,
};

/// Number of daily records in the sample performance series
pub const SAMPLE_DAYS: usize = 60;

/// Symbols of the demo portfolio, in display order
pub const DEMO_SYMBOLS: [&str; 5] = ["AAPL", "MSFT", "NVDA", "AMZN", "META"];

const DEMO_SCORES: [i64; 5] = [92, 88, 85, 83, 81];

const DEMO_NARRATIVES: [&str; 5] = [
    "Strong momentum and AI-driven growth; services revenue keeps expanding margins.",
    "Cloud and AI platform leadership with durable enterprise demand.",
    "Dominant accelerator franchise; data-center demand still outpacing supply.",
    "Retail efficiency gains and AWS re-acceleration support earnings growth.",
    "Ad engagement recovering on AI ranking; cost discipline lifts free cash flow.",
];

fn starting_value() -> Decimal {
    Decimal::from(100_000)
}

fn daily_growth() -> Decimal {
    // 1.005
    Decimal::new(1005, 3)
}

/// Sixty days of compounding portfolio value ending the day before `today`
///
/// The first record is dated `today - 60 days` with value 100000; each
/// following record is one day later and 1.005 times the previous value.
pub fn sample_trade_history(today: NaiveDate) -> TradeHistory {
    let start = today - Duration::days(SAMPLE_DAYS as i64);
    let mut value = starting_value();
    let mut records = Vec::with_capacity(SAMPLE_DAYS);

    for day in 0..SAMPLE_DAYS {
        records.push(TradeHistoryRecord {
            date: start + Duration::days(day as i64),
            portfolio_value: value,
        });
        value *= daily_growth();
    }

    TradeHistory::new(records)
}

/// Five demo research notes, best score first
pub fn demo_reports() -> InvestmentReports {
    let rows = DEMO_SYMBOLS
        .iter()
        .zip(DEMO_SCORES.iter())
        .zip(DEMO_NARRATIVES.iter())
        .map(|((symbol, score), narrative)| InvestmentReport {
            symbol: symbol.to_string(),
            inv_score: Decimal::from(*score),
            inv_report: narrative.to_string(),
        })
        .collect();

    InvestmentReports::new(rows)
}

/// Equal 0.2 weight for each demo symbol
pub fn equal_weight_recommendations() -> Recommendations {
    let weight = Decimal::ONE / Decimal::from(DEMO_SYMBOLS.len());
    let rows = DEMO_SYMBOLS
        .iter()
        .map(|symbol| Recommendation {
            symbol: symbol.to_string(),
            weight,
        })
        .collect();

    Recommendations::new(rows)
}
