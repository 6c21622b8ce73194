//! Command dispatcher that renders one command against resolved data.
//!
//! Rendering returns the text to print so the caller decides where it goes.

use anyhow::anyhow;
use fundboard::error::Result;
use fundboard::resolver::ResolvedData;
use serde_json::json;

use crate::cli::formatters;
use crate::cli::Commands;

/// Render a parsed command as table text or JSON
pub fn render(command: Commands, data: &ResolvedData, json_output: bool) -> Result<String> {
    match command {
        Commands::Summary => Ok(if json_output {
            formatters::to_json(data)
        } else {
            formatters::format_summary(data)
        }),

        Commands::Sources => Ok(if json_output {
            formatters::to_json(&data.notices)
        } else {
            formatters::format_sources_table(&data.notices)
        }),

        Commands::History { tail, all } => {
            let tail = if all { None } else { Some(tail) };
            if json_output {
                let records = data.trade_history.records();
                let skip = tail.map(|n| records.len().saturating_sub(n)).unwrap_or(0);
                Ok(formatters::to_json(&records[skip..]))
            } else {
                Ok(formatters::format_history_table(&data.trade_history, tail))
            }
        }

        Commands::Holdings { top } => Ok(if json_output {
            formatters::to_json(&data.merged_holdings.top_by_score(top))
        } else {
            formatters::format_holdings_table(&data.merged_holdings, top)
        }),

        Commands::Allocation => Ok(if json_output {
            formatters::to_json(&json!({
                "recommendations": data.recommendations,
                "total_weight": data.recommendations.total_weight(),
            }))
        } else {
            formatters::format_allocation_table(&data.recommendations)
        }),

        Commands::Report { symbol } => {
            let report = data.merged_holdings.report_for(&symbol).ok_or_else(|| {
                anyhow!(
                    "No investment report for {}. Available symbols: {}",
                    symbol.to_uppercase(),
                    data.merged_holdings.symbols().join(", ")
                )
            })?;
            Ok(if json_output {
                formatters::to_json(&json!({
                    "symbol": symbol.to_uppercase(),
                    "report": report,
                }))
            } else {
                formatters::format_report(&symbol, report)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fundboard::resolver::DataResolver;
    use tempfile::TempDir;

    fn demo_data() -> ResolvedData {
        let dir = TempDir::new().unwrap();
        DataResolver::in_dir(dir.path())
            .with_today(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
            .resolve()
            .unwrap()
    }

    #[test]
    fn report_for_unknown_symbol_lists_available() {
        let err = render(
            Commands::Report {
                symbol: "tsla".to_string(),
            },
            &demo_data(),
            false,
        )
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No investment report for TSLA"));
        assert!(msg.contains("AAPL, MSFT, NVDA, AMZN, META"));
    }

    #[test]
    fn holdings_json_is_ranked() {
        let output = render(Commands::Holdings { top: 2 }, &demo_data(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["symbol"], "AAPL");
        assert_eq!(rows[1]["symbol"], "MSFT");
    }

    #[test]
    fn history_json_respects_tail() {
        let output = render(
            Commands::History {
                tail: 3,
                all: false,
            },
            &demo_data(),
            true,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2]["date"], "2025-03-14");
    }

    #[test]
    fn sources_json_marks_synthesized_origin() {
        let output = render(Commands::Sources, &demo_data(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["kind"], "trade_history");
        assert_eq!(rows[0]["origin"], "synthesized");
        assert_eq!(rows[0]["reason"], "not found");
    }
}
