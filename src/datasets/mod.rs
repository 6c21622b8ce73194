// Dataset module - dashboard tables and the holdings join

pub mod holdings;
pub mod models;

pub use holdings::{reconcile, MergedHoldings};
pub use models::{
    InvestmentReport, InvestmentReports, MergedHolding, Recommendation, Recommendations,
    TradeHistory, TradeHistoryRecord,
};
