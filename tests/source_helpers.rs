#![allow(dead_code)]

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::fs;
use std::path::{Path, PathBuf};

pub const TRADE_HISTORY_FILE: &str = "trade_history.xlsx";
pub const REPORTS_FILE: &str = "stock_investment_reports.csv";
pub const RECOMMENDATIONS_FILE: &str = "recommendations.csv";

/// Fixed synthesis anchor so sample dates are predictable
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Write a trade history workbook with real Excel date cells
pub fn write_trade_history_xlsx(dir: &Path, rows: &[(NaiveDate, f64)]) -> PathBuf {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("History").unwrap();

    worksheet.write_string(0, 0, "Date").unwrap();
    worksheet.write_string(0, 1, "PortfolioValue").unwrap();

    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    for (idx, (day, value)) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        let excel_date =
            ExcelDateTime::from_ymd(day.year() as u16, day.month() as u8, day.day() as u8).unwrap();
        worksheet
            .write_datetime_with_format(row, 0, &excel_date, &date_format)
            .unwrap();
        worksheet.write_number(row, 1, *value).unwrap();
    }

    let path = dir.join(TRADE_HISTORY_FILE);
    workbook.save(&path).unwrap();
    path
}

/// Write a workbook whose header row is given verbatim and cells are strings
pub fn write_text_workbook(dir: &Path, name: &str, headers: &[&str], rows: &[Vec<&str>]) -> PathBuf {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string((r + 1) as u32, col as u16, *value)
                .unwrap();
        }
    }

    let path = dir.join(name);
    workbook.save(&path).unwrap();
    path
}

pub fn write_reports_csv(dir: &Path, rows: &[(&str, &str, &str)]) -> PathBuf {
    let mut content = String::from("Symbol,InvScore,InvReport\n");
    for (symbol, score, report) in rows {
        content.push_str(&format!("{},{},\"{}\"\n", symbol, score, report));
    }
    let path = dir.join(REPORTS_FILE);
    fs::write(&path, content).unwrap();
    path
}

pub fn write_recommendations_csv(dir: &Path, rows: &[(&str, &str)]) -> PathBuf {
    let mut content = String::from("Symbol,Weight\n");
    for (symbol, weight) in rows {
        content.push_str(&format!("{},{}\n", symbol, weight));
    }
    let path = dir.join(RECOMMENDATIONS_FILE);
    fs::write(&path, content).unwrap();
    path
}

/// Three days of real trade history
pub fn sample_history_rows() -> Vec<(NaiveDate, f64)> {
    vec![
        (date(2025, 1, 2), 250000.0),
        (date(2025, 1, 3), 251200.5),
        (date(2025, 1, 6), 249875.25),
    ]
}

pub fn sample_report_rows() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("TSLA", "77", "Volatile; delivery growth slowing."),
        ("GOOGL", "90", "Search moat intact, cloud margins rising."),
        ("IBM", "64", "Steady consulting, limited growth."),
    ]
}
