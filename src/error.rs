//! Error handling for fundboard
//!
//! Source loading failures are typed with `LoadError` so the resolver can
//! decide per tag whether to synthesize or propagate. Everything above the
//! library (config, CLI) uses anyhow for context chaining.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The three logical datasets a dashboard session consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    TradeHistory,
    InvestmentReports,
    Recommendations,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::TradeHistory => "trade history",
            SourceKind::InvestmentReports => "investment reports",
            SourceKind::Recommendations => "recommendations",
        }
    }

    /// File name used when no path is configured
    pub fn default_file_name(&self) -> &'static str {
        match self {
            SourceKind::TradeHistory => "trade_history.xlsx",
            SourceKind::InvestmentReports => "stock_investment_reports.csv",
            SourceKind::Recommendations => "recommendations.csv",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to load one source
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{kind} source not found: {}", .path.display())]
    Absent { kind: SourceKind, path: PathBuf },

    #[error("{kind} source {} is malformed: {reason}", .path.display())]
    Malformed {
        kind: SourceKind,
        path: PathBuf,
        reason: String,
    },
}

impl LoadError {
    pub fn absent(kind: SourceKind, path: impl Into<PathBuf>) -> Self {
        LoadError::Absent {
            kind,
            path: path.into(),
        }
    }

    pub fn malformed(kind: SourceKind, path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        LoadError::Malformed {
            kind,
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            LoadError::Absent { kind, .. } | LoadError::Malformed { kind, .. } => *kind,
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Absent { path, .. } | LoadError::Malformed { path, .. } => path,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, LoadError::Absent { .. })
    }

    /// What the user should do about the failure
    pub fn hint(&self) -> String {
        match self {
            LoadError::Absent { kind, .. } => format!(
                "Add {} to the data directory to replace the sample data.",
                kind.default_file_name()
            ),
            LoadError::Malformed {
                kind: SourceKind::TradeHistory,
                ..
            } => "Re-save the trade history as an .xlsx workbook (or .csv) with \
                  'Date' and 'PortfolioValue' columns."
                .to_string(),
            LoadError::Malformed {
                kind: SourceKind::InvestmentReports,
                ..
            } => "Re-save the investment reports as CSV with 'Symbol', 'InvScore' and \
                  'InvReport' columns."
                .to_string(),
            LoadError::Malformed {
                kind: SourceKind::Recommendations,
                ..
            } => "Re-save the recommendations as CSV with 'Symbol' and a non-negative \
                  'Weight' column."
                .to_string(),
        }
    }
}

/// Result type alias for config and command code
pub type Result<T> = anyhow::Result<T>;
