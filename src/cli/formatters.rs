//! Output formatting module for CLI display
//!
//! Turns resolved datasets into terminal tables or JSON. Nothing here
//! touches the sources.

use colored::Colorize;
use fundboard::datasets::{MergedHoldings, Recommendations, TradeHistory};
use fundboard::resolver::{Origin, ResolvedData, SourceNotice};
use fundboard::utils::{format_currency, format_score, format_weight_pct};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

/// Warning lines for synthesized sources (empty when everything was loaded)
pub fn format_notices(notices: &[SourceNotice]) -> String {
    notices
        .iter()
        .filter(|n| n.is_synthesized())
        .map(|n| format!("{} {}\n", "⚠️".yellow(), n.message().yellow()))
        .collect()
}

pub fn format_sources_table(notices: &[SourceNotice]) -> String {
    #[derive(Tabled)]
    struct SourceRow {
        #[tabled(rename = "Dataset")]
        dataset: String,
        #[tabled(rename = "Origin")]
        origin: String,
        #[tabled(rename = "Rows")]
        rows: usize,
        #[tabled(rename = "Path")]
        path: String,
    }

    let rows: Vec<SourceRow> = notices
        .iter()
        .map(|n| SourceRow {
            dataset: n.kind.to_string(),
            origin: match &n.origin {
                Origin::File => "file".green().to_string(),
                Origin::Synthesized { reason } => format!("sample ({})", reason).yellow().to_string(),
            },
            rows: n.rows,
            path: n.path.display().to_string(),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.modify(Columns::new(2..3), Alignment::right());

    format!("\n{} Data Sources\n\n{}\n", "🗂".cyan().bold(), table)
}

/// Trade history table; `tail` limits output to the most recent records
pub fn format_history_table(history: &TradeHistory, tail: Option<usize>) -> String {
    #[derive(Tabled)]
    struct HistoryRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Portfolio Value")]
        value: String,
        #[tabled(rename = "Day Change")]
        change: String,
    }

    let records = history.records();
    let skip = tail.map(|n| records.len().saturating_sub(n)).unwrap_or(0);

    let rows: Vec<HistoryRow> = records
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(idx, record)| {
            let change = match idx.checked_sub(1).and_then(|prev| records.get(prev)) {
                Some(prev) => {
                    let delta = record.portfolio_value - prev.portfolio_value;
                    if delta >= Decimal::ZERO {
                        format!("+{}", format_currency(delta)).green().to_string()
                    } else {
                        format_currency(delta).red().to_string()
                    }
                }
                None => "-".to_string(),
            };
            HistoryRow {
                date: record.date.format("%Y-%m-%d").to_string(),
                value: format_currency(record.portfolio_value),
                change,
            }
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());

    let mut output = format!("\n{} Portfolio Value Over Time\n\n", "📈".cyan().bold());
    output.push_str(&table.to_string());

    if skip > 0 {
        output.push_str(&format!(
            "\n\n{} earlier records not shown (use --all)",
            skip
        ));
    }
    output.push('\n');
    output
}

pub fn format_holdings_table(holdings: &MergedHoldings, top: usize) -> String {
    #[derive(Tabled)]
    struct HoldingRow {
        #[tabled(rename = "#")]
        rank: usize,
        #[tabled(rename = "Symbol")]
        symbol: String,
        #[tabled(rename = "Score")]
        score: String,
        #[tabled(rename = "Weight")]
        weight: String,
        #[tabled(rename = "Report")]
        report: String,
    }

    let rows: Vec<HoldingRow> = holdings
        .top_by_score(top)
        .into_iter()
        .enumerate()
        .map(|(idx, h)| HoldingRow {
            rank: idx + 1,
            symbol: h.symbol.clone(),
            score: format_score(h.inv_score),
            weight: if h.weight.is_zero() {
                format_weight_pct(h.weight).bright_black().to_string()
            } else {
                format_weight_pct(h.weight)
            },
            report: truncate(&h.inv_report, 60),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(2..4), Alignment::right());

    format!("\n{} Top Holdings\n\n{}\n", "🏆".cyan().bold(), table)
}

pub fn format_allocation_table(recommendations: &Recommendations) -> String {
    #[derive(Tabled)]
    struct AllocationRow {
        #[tabled(rename = "Symbol")]
        symbol: String,
        #[tabled(rename = "Weight")]
        weight: String,
    }

    if recommendations.is_empty() {
        return format!("\n{} No weight data available.\n", "ℹ".blue().bold());
    }

    let rows: Vec<AllocationRow> = recommendations
        .iter()
        .map(|r| AllocationRow {
            symbol: r.symbol.clone(),
            weight: format_weight_pct(r.weight),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());

    let total = recommendations.total_weight();
    let total_str = if total == Decimal::ONE {
        format_weight_pct(total).green()
    } else {
        format_weight_pct(total).yellow()
    };

    format!(
        "\n{} Portfolio Allocation\n\n{}\n{:<14} {}\n",
        "💼".cyan().bold(),
        table,
        "Total weight:".bold(),
        total_str
    )
}

pub fn format_report(symbol: &str, report: &str) -> String {
    let body = if report.is_empty() {
        "(no report text)".bright_black().to_string()
    } else {
        report.to_string()
    };
    format!(
        "\n{} {} Investment Report\n\n{}\n",
        "📑".cyan().bold(),
        symbol.to_uppercase().bold(),
        body
    )
}

/// Performance range line: first and last value with the overall change
pub fn format_history_summary(history: &TradeHistory) -> String {
    match (history.first(), history.last()) {
        (Some(first), Some(last)) => {
            let change = (last.portfolio_value - first.portfolio_value)
                .checked_div(first.portfolio_value)
                .unwrap_or(Decimal::ZERO);
            let change_str = if change >= Decimal::ZERO {
                format!("+{}", format_weight_pct(change)).green()
            } else {
                format_weight_pct(change).red()
            };
            format!(
                "\n{} {} days: {} ({}) → {} ({})  {}\n",
                "📈".cyan().bold(),
                history.len(),
                format_currency(first.portfolio_value),
                first.date.format("%Y-%m-%d"),
                format_currency(last.portfolio_value),
                last.date.format("%Y-%m-%d"),
                change_str
            )
        }
        _ => format!("\n{} No trade history records.\n", "ℹ".blue().bold()),
    }
}

pub fn format_summary(data: &ResolvedData) -> String {
    let mut output = format!("\n{} Fund Dashboard\n", "🤖".cyan().bold());
    output.push_str(&format_history_summary(&data.trade_history));
    output.push_str(&format_holdings_table(&data.merged_holdings, 10));
    output.push_str(&format_allocation_table(&data.recommendations));
    output
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
