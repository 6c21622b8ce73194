use rust_decimal::Decimal;
use std::path::Path;
use tracing::{debug, info};

use super::read_table;
use super::tabular::{cell_text, parse_decimal};
use crate::datasets::{Recommendation, Recommendations};
use crate::error::{LoadError, SourceKind};

const KIND: SourceKind = SourceKind::Recommendations;

/// Load target weights (`Symbol`, `Weight`). Weights must be non-negative.
pub fn load<P: AsRef<Path>>(file_path: P) -> Result<Recommendations, LoadError> {
    let path = file_path.as_ref();
    let table = read_table(KIND, path)?;

    let symbol_col = table
        .require_column("Symbol")
        .map_err(|reason| LoadError::malformed(KIND, path, reason))?;
    let weight_col = table
        .require_column("Weight")
        .map_err(|reason| LoadError::malformed(KIND, path, reason))?;

    let mut rows = Vec::with_capacity(table.rows.len());
    let mut total = Decimal::ZERO;

    for row in &table.rows {
        let symbol = cell_text(row.get(symbol_col)).to_uppercase();
        if symbol.is_empty() {
            debug!("Skipping row {}: empty symbol", row.line);
            continue;
        }

        let weight = parse_decimal(row.get(weight_col)).map_err(|e| {
            LoadError::malformed(KIND, path, format!("row {} ({}): Weight {}", row.line, symbol, e))
        })?;

        if weight < Decimal::ZERO {
            return Err(LoadError::malformed(
                KIND,
                path,
                format!("row {} ({}): Weight must not be negative, found {}", row.line, symbol, weight),
            ));
        }

        total = total.checked_add(weight).ok_or_else(|| {
            LoadError::malformed(
                KIND,
                path,
                format!("row {} ({}): total weight is out of range", row.line, symbol),
            )
        })?;

        rows.push(Recommendation { symbol, weight });
    }

    let recommendations = Recommendations::new(rows);
    info!(
        "Loaded {} recommendations (total weight {})",
        recommendations.len(),
        total
    );
    Ok(recommendations)
}
