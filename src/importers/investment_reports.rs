use std::path::Path;
use tracing::{debug, info};

use super::read_table;
use super::tabular::{cell_text, parse_decimal};
use crate::datasets::{InvestmentReport, InvestmentReports};
use crate::error::{LoadError, SourceKind};

const KIND: SourceKind = SourceKind::InvestmentReports;

/// Load per-symbol research notes (`Symbol`, `InvScore`, `InvReport`)
pub fn load<P: AsRef<Path>>(file_path: P) -> Result<InvestmentReports, LoadError> {
    let path = file_path.as_ref();
    let table = read_table(KIND, path)?;

    let columns = ["Symbol", "InvScore", "InvReport"]
        .iter()
        .map(|name| table.require_column(name))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|reason| LoadError::malformed(KIND, path, reason))?;
    let (symbol_col, score_col, report_col) = (columns[0], columns[1], columns[2]);

    let mut rows = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        let symbol = cell_text(row.get(symbol_col)).to_uppercase();
        if symbol.is_empty() {
            debug!("Skipping row {}: empty symbol", row.line);
            continue;
        }

        let inv_score = parse_decimal(row.get(score_col)).map_err(|e| {
            LoadError::malformed(KIND, path, format!("row {} ({}): InvScore {}", row.line, symbol, e))
        })?;

        rows.push(InvestmentReport {
            symbol,
            inv_score,
            inv_report: cell_text(row.get(report_col)),
        });
    }

    info!("Loaded {} investment reports", rows.len());
    Ok(InvestmentReports::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_reports_with_quoted_narratives() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stock_investment_reports.csv");
        fs::write(
            &path,
            "Symbol,InvScore,InvReport\n\
             aapl,92,\"Strong momentum, AI-driven growth.\"\n\
             ,50,orphan row\n\
             TSLA,70.5,\n",
        )
        .unwrap();

        let reports = load(&path).unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports.rows()[0].symbol, "AAPL");
        assert_eq!(reports.rows()[0].inv_report, "Strong momentum, AI-driven growth.");
        assert_eq!(reports.rows()[1].inv_score, dec!(70.5));
        assert_eq!(reports.rows()[1].inv_report, "");
    }

    #[test]
    fn test_non_numeric_score_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stock_investment_reports.csv");
        fs::write(&path, "Symbol,InvScore,InvReport\nAAPL,high,note\n").unwrap();

        let err = load(&path).unwrap_err();
        assert_eq!(err.kind(), SourceKind::InvestmentReports);
        assert!(err.to_string().contains("InvScore"));
    }
}
