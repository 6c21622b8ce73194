//! Holdings reconciliation
//!
//! Joins investment reports with recommendations on symbol. Reports drive the
//! join: every report produces exactly one holding, and a report with no
//! recommendation gets a zero weight.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::models::{InvestmentReports, MergedHolding, Recommendations};

/// Reports joined with weights, in report order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MergedHoldings {
    rows: Vec<MergedHolding>,
}

impl MergedHoldings {
    pub fn rows(&self) -> &[MergedHolding] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MergedHolding> {
        self.rows.iter()
    }

    /// Highest scores first. Ties keep report order.
    pub fn top_by_score(&self, n: usize) -> Vec<&MergedHolding> {
        let mut ranked: Vec<&MergedHolding> = self.rows.iter().collect();
        ranked.sort_by(|a, b| b.inv_score.cmp(&a.inv_score));
        ranked.truncate(n);
        ranked
    }

    /// Narrative for `symbol` (case-insensitive). First matching row wins.
    pub fn report_for(&self, symbol: &str) -> Option<&str> {
        let wanted = symbol.trim();
        self.rows
            .iter()
            .find(|h| h.symbol.eq_ignore_ascii_case(wanted))
            .map(|h| h.inv_report.as_str())
    }

    /// Unique symbols in the order they first appear
    pub fn symbols(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .map(|h| h.symbol.as_str())
            .filter(|s| seen.insert(*s))
            .collect()
    }
}

/// Left-join reports with recommendations on symbol
///
/// If a symbol is recommended more than once, the first weight is used so
/// the join never duplicates report rows. Weights are copied as-is.
pub fn reconcile(reports: &InvestmentReports, recommendations: &Recommendations) -> MergedHoldings {
    let mut weights: HashMap<&str, Decimal> = HashMap::with_capacity(recommendations.len());
    for rec in recommendations.iter() {
        if weights.contains_key(rec.symbol.as_str()) {
            warn!(
                "Duplicate recommendation for {}; keeping the first weight",
                rec.symbol
            );
            continue;
        }
        weights.insert(rec.symbol.as_str(), rec.weight);
    }

    let rows: Vec<MergedHolding> = reports
        .iter()
        .map(|report| MergedHolding {
            symbol: report.symbol.clone(),
            inv_score: report.inv_score,
            weight: weights
                .get(report.symbol.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO),
            inv_report: report.inv_report.clone(),
        })
        .collect();

    let unmatched = rows.iter().filter(|h| h.weight.is_zero()).count();
    debug!(
        "Reconciled {} holdings ({} without a recommended weight)",
        rows.len(),
        unmatched
    );

    MergedHoldings { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::models::{InvestmentReport, Recommendation};
    use rust_decimal_macros::dec;

    fn report(symbol: &str, score: Decimal) -> InvestmentReport {
        InvestmentReport {
            symbol: symbol.to_string(),
            inv_score: score,
            inv_report: format!("{} note", symbol),
        }
    }

    fn rec(symbol: &str, weight: Decimal) -> Recommendation {
        Recommendation {
            symbol: symbol.to_string(),
            weight,
        }
    }

    #[test]
    fn test_unmatched_reports_get_zero_weight() {
        let reports = InvestmentReports::new(vec![report("AAPL", dec!(90)), report("NVDA", dec!(80))]);
        let recs = Recommendations::new(vec![rec("AAPL", dec!(1.0))]);

        let merged = reconcile(&reports, &recs);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.rows()[0].weight, dec!(1.0));
        assert_eq!(merged.rows()[1].weight, Decimal::ZERO);
    }

    #[test]
    fn test_recommendation_without_report_is_dropped() {
        let reports = InvestmentReports::new(vec![report("AAPL", dec!(90))]);
        let recs = Recommendations::new(vec![rec("AAPL", dec!(0.5)), rec("TSLA", dec!(0.5))]);

        let merged = reconcile(&reports, &recs);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged.symbols(), vec!["AAPL"]);
    }

    #[test]
    fn test_duplicate_recommendation_does_not_duplicate_rows() {
        let reports = InvestmentReports::new(vec![report("AAPL", dec!(90))]);
        let recs = Recommendations::new(vec![rec("AAPL", dec!(0.3)), rec("AAPL", dec!(0.7))]);

        let merged = reconcile(&reports, &recs);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged.rows()[0].weight, dec!(0.3));
    }

    #[test]
    fn test_top_by_score_is_descending_and_stable() {
        let reports = InvestmentReports::new(vec![
            report("AMZN", dec!(83)),
            report("AAPL", dec!(92)),
            report("META", dec!(83)),
            report("MSFT", dec!(88)),
        ]);
        let merged = reconcile(&reports, &Recommendations::default());

        let top: Vec<&str> = merged
            .top_by_score(3)
            .iter()
            .map(|h| h.symbol.as_str())
            .collect();
        assert_eq!(top, vec!["AAPL", "MSFT", "AMZN"]);
    }

    #[test]
    fn test_report_lookup_ignores_case() {
        let reports = InvestmentReports::new(vec![report("NVDA", dec!(85))]);
        let merged = reconcile(&reports, &Recommendations::default());

        assert_eq!(merged.report_for("nvda"), Some("NVDA note"));
        assert_eq!(merged.report_for("TSLA"), None);
    }
}
