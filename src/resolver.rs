//! Data resolution
//!
//! `DataResolver::resolve` produces the three dashboard tables. Each source is
//! loaded from disk; an absent source is replaced by its synthetic dataset and
//! recorded as a `SourceNotice`. A malformed trade history always fails the
//! resolution. Malformed auxiliary sources follow `MalformedPolicy`.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{error, info, warn};

use crate::cache::CacheKey;
use crate::datasets::{
    reconcile, InvestmentReports, MergedHoldings, Recommendations, TradeHistory,
};
use crate::error::{LoadError, SourceKind};
use crate::importers::{investment_reports, recommendations, trade_history};
use crate::synthetic;

/// What to do when an investment reports or recommendations file is present
/// but cannot be read. Trade history ignores this and always fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    #[default]
    Fail,
    Synthesize,
}

impl FromStr for MalformedPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(MalformedPolicy::Fail),
            "synthesize" | "synthesise" => Ok(MalformedPolicy::Synthesize),
            _ => Err(()),
        }
    }
}

/// Location of each source file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePaths {
    pub trade_history: PathBuf,
    pub investment_reports: PathBuf,
    pub recommendations: PathBuf,
}

impl SourcePaths {
    /// Default file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            trade_history: dir.join(SourceKind::TradeHistory.default_file_name()),
            investment_reports: dir.join(SourceKind::InvestmentReports.default_file_name()),
            recommendations: dir.join(SourceKind::Recommendations.default_file_name()),
        }
    }

    pub fn get(&self, kind: SourceKind) -> &Path {
        match kind {
            SourceKind::TradeHistory => &self.trade_history,
            SourceKind::InvestmentReports => &self.investment_reports,
            SourceKind::Recommendations => &self.recommendations,
        }
    }
}

/// Where a resolved dataset came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum Origin {
    File,
    Synthesized { reason: String },
}

/// Per-source outcome of a resolution, for the user-facing warning line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceNotice {
    pub kind: SourceKind,
    pub path: PathBuf,
    #[serde(flatten)]
    pub origin: Origin,
    pub rows: usize,
}

impl SourceNotice {
    pub fn is_synthesized(&self) -> bool {
        matches!(self.origin, Origin::Synthesized { .. })
    }

    /// One-line description suitable for a warning banner
    pub fn message(&self) -> String {
        let file = self
            .path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());

        match &self.origin {
            Origin::File => format!("Loaded {} rows of {} from {}", self.rows, self.kind, file),
            Origin::Synthesized { reason } => {
                format!("{}: {}; {}", file, reason, fallback_description(self.kind))
            }
        }
    }
}

fn fallback_description(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::TradeHistory => "loading sample performance data",
        SourceKind::InvestmentReports => "using demo data",
        SourceKind::Recommendations => "using equal-weight portfolio",
    }
}

/// The resolved dashboard tables. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedData {
    pub trade_history: TradeHistory,
    pub merged_holdings: MergedHoldings,
    pub recommendations: Recommendations,
    pub notices: Vec<SourceNotice>,
}

impl ResolvedData {
    pub fn notice(&self, kind: SourceKind) -> Option<&SourceNotice> {
        self.notices.iter().find(|n| n.kind == kind)
    }

    /// True when any dataset is synthetic
    pub fn has_synthetic_data(&self) -> bool {
        self.notices.iter().any(SourceNotice::is_synthesized)
    }
}

/// Anything that can produce `ResolvedData` under a cache key
pub trait Resolve {
    fn cache_key(&self) -> CacheKey;
    fn resolve(&self) -> Result<ResolvedData, LoadError>;
}

trait RowCount {
    fn row_count(&self) -> usize;
}

impl RowCount for TradeHistory {
    fn row_count(&self) -> usize {
        self.len()
    }
}

impl RowCount for InvestmentReports {
    fn row_count(&self) -> usize {
        self.len()
    }
}

impl RowCount for Recommendations {
    fn row_count(&self) -> usize {
        self.len()
    }
}

/// Resolves the three dashboard datasets from a set of source paths
#[derive(Debug, Clone)]
pub struct DataResolver {
    sources: SourcePaths,
    policy: MalformedPolicy,
    today: Option<NaiveDate>,
}

impl DataResolver {
    pub fn new(sources: SourcePaths) -> Self {
        Self {
            sources,
            policy: MalformedPolicy::default(),
            today: None,
        }
    }

    /// Resolver for the default file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(SourcePaths::in_dir(dir))
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fix the date synthetic trade history is anchored to
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn sources(&self) -> &SourcePaths {
        &self.sources
    }

    pub fn policy(&self) -> MalformedPolicy {
        self.policy
    }

    fn synthesis_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Load every source, substitute synthetic data where needed, and join
    /// reports with recommendations
    pub fn resolve(&self) -> Result<ResolvedData, LoadError> {
        let today = self.synthesis_date();
        let mut notices = Vec::with_capacity(3);

        let trade_history = settle(
            SourceKind::TradeHistory,
            &self.sources.trade_history,
            trade_history::load(&self.sources.trade_history),
            MalformedPolicy::Fail,
            || synthetic::sample_trade_history(today),
            &mut notices,
        )?;

        let reports = settle(
            SourceKind::InvestmentReports,
            &self.sources.investment_reports,
            investment_reports::load(&self.sources.investment_reports),
            self.policy,
            synthetic::demo_reports,
            &mut notices,
        )?;

        let recommendations = settle(
            SourceKind::Recommendations,
            &self.sources.recommendations,
            recommendations::load(&self.sources.recommendations),
            self.policy,
            synthetic::equal_weight_recommendations,
            &mut notices,
        )?;

        let merged_holdings = reconcile(&reports, &recommendations);

        info!(
            "Resolved {} trade history records, {} holdings, {} recommendations",
            trade_history.len(),
            merged_holdings.len(),
            recommendations.len()
        );

        Ok(ResolvedData {
            trade_history,
            merged_holdings,
            recommendations,
            notices,
        })
    }
}

impl Resolve for DataResolver {
    fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.sources.clone(), self.policy, self.today)
    }

    fn resolve(&self) -> Result<ResolvedData, LoadError> {
        DataResolver::resolve(self)
    }
}

/// Turn one loader result into a dataset, synthesizing where the policy allows
fn settle<T: RowCount>(
    kind: SourceKind,
    path: &Path,
    loaded: Result<T, LoadError>,
    policy: MalformedPolicy,
    synthesize: impl FnOnce() -> T,
    notices: &mut Vec<SourceNotice>,
) -> Result<T, LoadError> {
    let err = match loaded {
        Ok(data) => {
            notices.push(SourceNotice {
                kind,
                path: path.to_path_buf(),
                origin: Origin::File,
                rows: data.row_count(),
            });
            return Ok(data);
        }
        Err(err) => err,
    };

    let recoverable = err.is_absent()
        || (policy == MalformedPolicy::Synthesize && kind != SourceKind::TradeHistory);
    if !recoverable {
        error!("{}", err);
        return Err(err);
    }

    if err.is_absent() {
        info!("{}; {}", err, fallback_description(kind));
    } else {
        warn!("{}; {}", err, fallback_description(kind));
    }

    let reason = match &err {
        LoadError::Absent { .. } => "not found".to_string(),
        LoadError::Malformed { reason, .. } => format!("unreadable ({})", reason),
    };
    let data = synthesize();
    notices.push(SourceNotice {
        kind,
        path: path.to_path_buf(),
        origin: Origin::Synthesized { reason },
        rows: data.row_count(),
    });
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    #[test]
    fn test_empty_dir_resolves_to_demo_data() {
        let dir = TempDir::new().unwrap();
        let data = DataResolver::in_dir(dir.path())
            .with_today(today())
            .resolve()
            .unwrap();

        assert_eq!(data.trade_history.len(), 60);
        assert_eq!(data.merged_holdings.len(), 5);
        assert_eq!(data.recommendations.total_weight(), Decimal::ONE);
        assert!(data.notices.iter().all(SourceNotice::is_synthesized));
        assert!(data.has_synthetic_data());
    }

    #[test]
    fn test_loaded_sources_are_recorded_as_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("recommendations.csv"),
            "Symbol,Weight\nAAPL,1\n",
        )
        .unwrap();

        let data = DataResolver::in_dir(dir.path())
            .with_today(today())
            .resolve()
            .unwrap();

        let notice = data.notice(SourceKind::Recommendations).unwrap();
        assert_eq!(notice.origin, Origin::File);
        assert_eq!(notice.rows, 1);
        assert_eq!(
            notice.message(),
            "Loaded 1 rows of recommendations from recommendations.csv"
        );
    }

    #[test]
    fn test_synthesized_notice_message() {
        let dir = TempDir::new().unwrap();
        let data = DataResolver::in_dir(dir.path())
            .with_today(today())
            .resolve()
            .unwrap();

        let notice = data.notice(SourceKind::Recommendations).unwrap();
        assert_eq!(
            notice.message(),
            "recommendations.csv: not found; using equal-weight portfolio"
        );
    }

    #[test]
    fn test_malformed_reports_fail_by_default() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("stock_investment_reports.csv"),
            "Ticker,Score\nAAPL,1\n",
        )
        .unwrap();

        let err = DataResolver::in_dir(dir.path())
            .with_today(today())
            .resolve()
            .unwrap_err();

        assert_eq!(err.kind(), SourceKind::InvestmentReports);
        assert!(!err.is_absent());
    }

    #[test]
    fn test_malformed_recommendations_synthesize_when_allowed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("recommendations.csv"), "Symbol,Weight\nAAPL,heavy\n").unwrap();

        let data = DataResolver::in_dir(dir.path())
            .with_today(today())
            .with_policy(MalformedPolicy::Synthesize)
            .resolve()
            .unwrap();

        assert_eq!(data.recommendations.len(), 5);
        assert!(data.recommendations.iter().all(|r| r.weight == dec!(0.2)));
        match &data.notice(SourceKind::Recommendations).unwrap().origin {
            Origin::Synthesized { reason } => assert!(reason.starts_with("unreadable")),
            other => panic!("expected synthesized origin, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_trade_history_fails_under_synthesize_policy() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("trade_history.xlsx"), "this is not a workbook").unwrap();

        let err = DataResolver::in_dir(dir.path())
            .with_today(today())
            .with_policy(MalformedPolicy::Synthesize)
            .resolve()
            .unwrap_err();

        assert_eq!(err.kind(), SourceKind::TradeHistory);
        assert!(err.hint().contains(".xlsx"));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("FAIL".parse(), Ok(MalformedPolicy::Fail));
        assert_eq!(" synthesize ".parse(), Ok(MalformedPolicy::Synthesize));
        assert_eq!("ignore".parse::<MalformedPolicy>(), Err(()));
    }
}
