use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// One day of portfolio valuation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeHistoryRecord {
    pub date: NaiveDate,
    pub portfolio_value: Decimal,
}

/// Daily portfolio values, ordered by date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TradeHistory {
    records: Vec<TradeHistoryRecord>,
}

impl TradeHistory {
    pub fn new(records: Vec<TradeHistoryRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TradeHistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&TradeHistoryRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&TradeHistoryRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TradeHistoryRecord> {
        self.records.iter()
    }

    /// True when every date is later than the one before it
    pub fn is_strictly_increasing(&self) -> bool {
        self.records.windows(2).all(|w| w[0].date < w[1].date)
    }
}

/// Scored research note for one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestmentReport {
    pub symbol: String,
    pub inv_score: Decimal,
    pub inv_report: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InvestmentReports {
    rows: Vec<InvestmentReport>,
}

impl InvestmentReports {
    pub fn new(rows: Vec<InvestmentReport>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[InvestmentReport] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InvestmentReport> {
        self.rows.iter()
    }
}

/// Target allocation for one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub symbol: String,
    pub weight: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Recommendations {
    rows: Vec<Recommendation>,
}

impl Recommendations {
    pub fn new(rows: Vec<Recommendation>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Recommendation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation> {
        self.rows.iter()
    }

    /// Sum of all weights as loaded. Never renormalized. Saturates at
    /// `Decimal::MAX`.
    pub fn total_weight(&self) -> Decimal {
        self.rows
            .iter()
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.weight))
    }
}

/// Investment report joined with its recommended weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedHolding {
    pub symbol: String,
    pub inv_score: Decimal,
    pub weight: Decimal,
    pub inv_report: String,
}
