use std::path::Path;
use tracing::{info, warn};

use super::read_table;
use super::tabular::{parse_date, parse_decimal};
use crate::datasets::{TradeHistory, TradeHistoryRecord};
use crate::error::{LoadError, SourceKind};

const KIND: SourceKind = SourceKind::TradeHistory;

/// Load daily portfolio values from a workbook or CSV file
///
/// Requires `Date` and `PortfolioValue` columns. Every row must parse and
/// every value must be positive; any failure makes the whole source
/// malformed. Records are returned in file order.
pub fn load<P: AsRef<Path>>(file_path: P) -> Result<TradeHistory, LoadError> {
    let path = file_path.as_ref();
    let table = read_table(KIND, path)?;

    let date_col = table
        .require_column("Date")
        .map_err(|reason| LoadError::malformed(KIND, path, reason))?;
    let value_col = table
        .require_column("PortfolioValue")
        .map_err(|reason| LoadError::malformed(KIND, path, reason))?;

    let mut records = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        let date = parse_date(row.get(date_col))
            .map_err(|e| LoadError::malformed(KIND, path, format!("row {}: {}", row.line, e)))?;
        let portfolio_value = parse_decimal(row.get(value_col))
            .map_err(|e| LoadError::malformed(KIND, path, format!("row {}: {}", row.line, e)))?;

        if portfolio_value <= rust_decimal::Decimal::ZERO {
            return Err(LoadError::malformed(
                KIND,
                path,
                format!(
                    "row {}: PortfolioValue must be positive, found {}",
                    row.line, portfolio_value
                ),
            ));
        }

        records.push(TradeHistoryRecord {
            date,
            portfolio_value,
        });
    }

    if records.is_empty() {
        return Err(LoadError::malformed(KIND, path, "no trade history records"));
    }

    let history = TradeHistory::new(records);
    if !history.is_strictly_increasing() {
        warn!(
            "Trade history dates in {:?} are not strictly increasing; using them as-is",
            path
        );
    }

    info!("Loaded {} trade history records", history.len());
    Ok(history)
}
